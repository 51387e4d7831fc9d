use fund_assistant::calculator::{calculate_dca, Scenario};
use fund_assistant::data_provider::FundCatalog;
use fund_assistant::models::{FundType, Frequency};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载内置基金目录
    let catalog = FundCatalog::bundled()?;
    println!("目录基金数量: {}", catalog.len());

    // 按分类统计
    for fund_type in FundType::ALL {
        let funds = catalog.list(Some(fund_type));
        let hot = catalog.hot(Some(fund_type));
        println!("{:<6} {} 只，热门 {} 只", fund_type.label(), funds.len(), hot.len());
    }

    // 获取特定基金
    let code = "110022"; // 易方达消费行业
    match catalog.get(code) {
        Some(fund) => {
            println!("\n基金: {} ({})", fund.name, fund.code);
            println!("类型: {}  风险: {}", fund.fund_type.label(), fund.risk_level);
        }
        None => println!("\n未找到基金: {}", code),
    }

    // 搜索
    println!("\n搜索 \"白酒\":");
    for fund in catalog.search("白酒") {
        println!("  {} {}", fund.code, fund.name);
    }

    // 每月定投 1000 元，持续 3 年
    let projection = calculate_dca(code, Decimal::from(1000), 3, Frequency::Monthly)?;
    println!("\n定投 {} 期，总投入 {}", projection.periods, projection.total_invested);
    for scenario in Scenario::ALL {
        if let Some(result) = projection.scenario(scenario) {
            println!("{:<10} 预计价值 {:>12}  收益 {:>10}", scenario.label(), result.future_value, result.profit);
        }
    }

    Ok(())
}
