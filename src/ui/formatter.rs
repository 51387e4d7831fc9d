//! 终端输出
//!
//! 表格使用 prettytable，面板为带标题的分隔线加缩进文本，涨跌用颜色区分。

use colored::*;
use prettytable::{format, Cell, Row, Table};
use rust_decimal::Decimal;
use std::io::{self, Write};

use crate::calculator::DcaProjection;
use crate::errors::Result;
use crate::models::{FundBasic, FundDetail, FundHolding, FundPrice, HistoryPage};
use crate::scrapers::base::FetchOutcome;
use crate::services::Comparison;
use crate::util::DATETIME_FORMAT;

const PLACEHOLDER: &str = "---";
const RULE_WIDTH: usize = 60;

/// 格式化终端输出
pub struct FundFormatter<W: Write> {
    out: W,
    // 输出到终端时表格带颜色
    tty: bool,
}

impl FundFormatter<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            tty: true,
        }
    }
}

impl<W: Write> FundFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out, tty: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 基金详情面板
    pub fn display_fund_detail(&mut self, outcome: &FetchOutcome<FundDetail>) -> Result<()> {
        let detail = match outcome {
            FetchOutcome::Found(detail) => detail,
            failure => return self.failure("基金详情 / fund detail", failure),
        };

        let mut lines = vec![
            "基本信息 / Basic Info".bold().to_string(),
            format!("  类型: {}", detail.fund_type),
            format!("  成立日期: {}", text_or_placeholder(detail.establish_date.map(|d| d.to_string()))),
            format!("  基金公司: {}", text_or_placeholder(detail.company.clone())),
            format!("  基金经理: {}", text_or_placeholder(detail.manager.clone())),
        ];
        if let Some(size) = detail.size_in_yi() {
            lines.push(format!("  基金规模: {:.2} 亿", size.round_dp(2)));
        }

        lines.push(String::new());
        lines.push("费率与风险 / Fees & Risk".bold().to_string());
        lines.push(format!("  管理费率: {}", text_or_placeholder(detail.management_fee.clone())));
        lines.push(format!("  风险等级: {}", text_or_placeholder(detail.risk_level.clone())));

        lines.push(String::new());
        lines.push("阶段涨幅 / Performance".bold().to_string());
        lines.push(format!("  近1月: {}", colored_change(detail.return_1m)));
        lines.push(format!("  近6月: {}", colored_change(detail.return_6m)));
        lines.push(format!("  近1年: {}", colored_change(detail.return_1y)));
        lines.push(format!("  近3年: {}", colored_change(detail.return_3y)));
        lines.push(format!("  成立来: {}", colored_change(detail.return_inception)));

        let title = format!("ℹ️ 基金详情 / Fund Details - {} ({})", detail.name, detail.code);
        self.panel(&title, &lines)
    }

    /// 基金经理
    pub fn display_manager(&mut self, outcome: &FetchOutcome<FundDetail>) -> Result<()> {
        let detail = match outcome {
            FetchOutcome::Found(detail) => detail,
            failure => return self.failure("基金经理 / fund manager", failure),
        };

        writeln!(
            self.out,
            "🧑‍💼 基金经理: {}",
            text_or_placeholder(detail.manager.clone()).cyan().bold()
        )?;
        writeln!(self.out, "🏢 基金公司: {}", text_or_placeholder(detail.company.clone()))?;
        Ok(())
    }

    /// 持仓表
    pub fn display_fund_holdings(&mut self, outcome: &FetchOutcome<FundHolding>) -> Result<()> {
        let holding = match outcome {
            FetchOutcome::Found(holding) => holding,
            failure => return self.failure("持仓信息 / holdings", failure),
        };

        writeln!(
            self.out,
            "{}",
            format!("📊 持仓分析 / Holdings Analysis - {} ({})", holding.name, holding.code).bold()
        )?;

        let mut table = new_table(&["股票代码\nCode", "名称\nName", "占比\n%"]);
        for stock in &holding.top_stocks {
            table.add_row(Row::new(vec![
                Cell::new(&stock.code).style_spec("Fc"),
                Cell::new(&stock.name),
                Cell::new(&format!("{:.2}%", stock.percentage.round_dp(2))).style_spec("Fyr"),
            ]));
        }
        self.print_table(&table)?;

        writeln!(self.out, "{}", format!("报告期: {}", holding.report_date).dimmed())?;
        Ok(())
    }

    /// 基金对比表，每只基金一列
    pub fn display_comparison(&mut self, comparison: &Comparison) -> Result<()> {
        for (code, reason) in &comparison.skipped {
            writeln!(self.out, "{}", format!("⚠️ 跳过 {}: {}", code, reason).yellow())?;
        }

        let details = &comparison.details;
        if details.is_empty() {
            writeln!(self.out, "{}", "无数据对比 / No data to compare".yellow())?;
            return Ok(());
        }

        let mut headers = vec!["指标\nMetric".to_string()];
        headers.extend(details.iter().map(|d| format!("{}\n{}", d.name, d.code)));
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        let mut table = new_table(&header_refs);

        table.add_row(metric_row("类型", details.iter().map(|d| Cell::new(&d.fund_type).style_spec("c"))));
        table.add_row(metric_row(
            "规模",
            details.iter().map(|d| {
                let size = d.size_in_yi().map(|s| format!("{:.2} 亿", s.round_dp(2)));
                Cell::new(&text_or_placeholder(size)).style_spec("c")
            }),
        ));
        table.add_row(metric_row(
            "经理",
            details.iter().map(|d| Cell::new(&text_or_placeholder(d.manager.clone())).style_spec("c")),
        ));
        table.add_row(metric_row(
            "风险",
            details.iter().map(|d| Cell::new(&text_or_placeholder(d.risk_level.clone())).style_spec("c")),
        ));
        table.add_row(metric_row("近1年", details.iter().map(|d| change_cell(d.return_1y))));
        table.add_row(metric_row("近3年", details.iter().map(|d| change_cell(d.return_3y))));
        table.add_row(metric_row("成立来", details.iter().map(|d| change_cell(d.return_inception))));

        writeln!(self.out, "{}", "🆚 基金对比 / Fund Comparison".bold())?;
        self.print_table(&table)?;
        Ok(())
    }

    /// 目录列表
    pub fn display_fund_list(&mut self, funds: &[&FundBasic]) -> Result<()> {
        if funds.is_empty() {
            writeln!(self.out, "{}", "未找到基金 / No funds found".yellow())?;
            return Ok(());
        }
        writeln!(self.out, "{}", "📋 基金列表 / Fund List".bold())?;
        self.basic_table(funds)
    }

    pub fn display_hot_funds(&mut self, funds: &[&FundBasic]) -> Result<()> {
        if funds.is_empty() {
            writeln!(self.out, "{}", "未找到热门基金 / No hot funds found".yellow())?;
            return Ok(());
        }
        writeln!(self.out, "{}", "🔥 热门基金 / Hot Funds".bold())?;
        self.basic_table(funds)
    }

    pub fn display_search_results(&mut self, results: &[&FundBasic], keyword: &str) -> Result<()> {
        if results.is_empty() {
            writeln!(
                self.out,
                "{}",
                format!("未找到匹配 \"{}\" 的基金 / No funds found matching \"{}\"", keyword, keyword).yellow()
            )?;
            return Ok(());
        }
        writeln!(self.out, "{}", format!("🔍 搜索结果 / Search Results - \"{}\"", keyword).bold())?;
        self.basic_table(results)?;
        writeln!(self.out, "\n找到 {} 个结果 / Found {} results", results.len(), results.len())?;
        Ok(())
    }

    /// 实时估值与确认净值面板
    pub fn display_fund_price(&mut self, outcome: &FetchOutcome<FundPrice>) -> Result<()> {
        let price = match outcome {
            FetchOutcome::Found(price) => price,
            failure => return self.failure("基金数据 / fund data", failure),
        };

        let mut lines = Vec::new();
        if let Some(kind) = price.fund_type {
            let risk = price.risk_level.map(|r| r.label()).unwrap_or(PLACEHOLDER);
            lines.push(format!("  {} · {}", kind.label(), risk));
        }

        if let Some(time) = price.estimate_time {
            let estimate = price
                .estimate_value
                .map(|v| format!("¥{:.4}", v))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            lines.push(String::new());
            lines.push("实时估值 / Real-time Estimate".bold().to_string());
            lines.push(format!("  估算净值: {}", estimate.green()));
            lines.push(format!("  估值时间: {}", time.format(DATETIME_FORMAT)));
            if let Some(change) = price.estimate_change {
                let symbol = if change >= Decimal::ZERO { "📈" } else { "📉" };
                lines.push(format!("  估算涨跌: {} {}", colored_change(Some(change)), symbol));
            }
        }

        if let Some(nav) = price.nav {
            lines.push(String::new());
            lines.push("确认净值 / Confirmed NAV".bold().to_string());
            lines.push(format!("  单位净值: {}", format!("¥{:.4}", nav).cyan()));
            if let Some(accumulated) = price.accumulated_nav {
                lines.push(format!("  累计净值: ¥{:.4}", accumulated));
            }
            if let Some(date) = price.nav_date {
                lines.push(format!("  净值日期: {}", date));
            }
        }

        if let Some(scale) = price.scale {
            lines.push(format!("  基金规模: {:.2} 亿", scale.round_dp(2)));
        }
        if let Some(manager) = &price.manager_name {
            lines.push(format!("  基金经理: {}", manager));
        }

        lines.push(String::new());
        lines.push("💡 提示: 估值仅供参考，以当日确认净值为准".dimmed().to_string());
        lines.push("   Note: Estimate is for reference only".dimmed().to_string());

        let title = format!("📈 {} ({})", price.name, price.code);
        self.panel(&title, &lines)
    }

    /// 历史净值表
    pub fn display_history(&mut self, outcome: &FetchOutcome<HistoryPage>, code: &str) -> Result<()> {
        let page = match outcome {
            FetchOutcome::Found(page) if !page.navs.is_empty() => page,
            FetchOutcome::Found(_) | FetchOutcome::NoData => {
                writeln!(self.out, "{}", "未找到历史数据 / No historical data found".yellow())?;
                return Ok(());
            }
            failure => return self.failure("历史净值 / history", failure),
        };

        writeln!(self.out, "{}", format!("📅 历史净值 / Historical NAV ({})", code).bold())?;
        let mut table = new_table(&["日期\nDate", "单位净值\nNAV", "累计净值\nAcc NAV", "日增长率\nDaily Change"]);
        for record in &page.navs {
            table.add_row(Row::new(vec![
                Cell::new(&record.date.to_string()).style_spec("Fc"),
                Cell::new(&format!("{:.4}", record.nav)).style_spec("r"),
                Cell::new(&format!("{:.4}", record.accumulated_nav)).style_spec("r"),
                change_cell(record.daily_change),
            ]));
        }
        self.print_table(&table)?;

        if let Some(total) = page.total_records {
            writeln!(
                self.out,
                "{}",
                format!("共 {} 条，显示 {} 条 / Showing {} of {}", total, page.navs.len(), page.navs.len(), total)
                    .dimmed()
            )?;
        }
        Ok(())
    }

    /// 定投测算面板
    pub fn display_calculator(&mut self, projection: &DcaProjection, fund_name: Option<&str>) -> Result<()> {
        let mut lines = vec![
            "投资参数 / Investment Parameters".bold().to_string(),
            format!("  每期金额: ¥{}", group_thousands(projection.amount)),
            format!("  定投年限: {} 年", projection.years),
            format!("  定投频率: {} ({} 期)", projection.frequency, projection.periods),
            format!("  总投入: {}", format!("¥{}", group_thousands(projection.total_invested)).cyan()),
            String::new(),
            "收益预测 / Profit Forecast".bold().to_string(),
        ];

        for result in &projection.scenarios {
            lines.push(format!("\n  [{}]", result.scenario.label()));
            lines.push(format!(
                "    预计价值: {}",
                format!("¥{}", group_thousands(result.future_value)).green()
            ));
            lines.push(format!("    预计收益: {}", format!("¥{}", group_thousands(result.profit)).yellow()));
            let rate = result
                .return_rate
                .map(|r| format!("{:.2}%", r))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            lines.push(format!("    收益率: {}", rate.blue()));
        }

        lines.push(String::new());
        lines.push("💡 提示: 实际收益取决于市场表现".dimmed().to_string());
        lines.push("   Note: Actual returns depend on market performance".dimmed().to_string());

        let title = match fund_name {
            Some(name) => format!("🧮 定投计算器 / DCA Calculator - {} ({})", name, projection.code),
            None => format!("🧮 定投计算器 / DCA Calculator - {}", projection.code),
        };
        self.panel(&title, &lines)
    }

    /// 投资摘要：按分类列出热门基金和风险提示
    pub fn display_summary(&mut self, hot_funds: &[&FundBasic]) -> Result<()> {
        writeln!(self.out, "{}", "💼 基金投资摘要 / Fund Investment Summary".bold())?;
        writeln!(self.out, "\n📌 主流基金分类 / Main Fund Categories")?;

        let mut current = None;
        for fund in hot_funds {
            if current != Some(fund.fund_type) {
                current = Some(fund.fund_type);
                writeln!(self.out, "\n【{}】", fund.fund_type.label().bold())?;
            }
            writeln!(self.out, "  - {} ({}) · {}", fund.name, fund.code, fund.risk_level)?;
        }

        writeln!(self.out, "\n{}", "⚠️ 风险提示 / Risk Warning".bold())?;
        writeln!(self.out, "  - 投资有风险，入市需谨慎 / Investment involves risk")?;
        writeln!(self.out, "  - 历史收益不代表未来表现 / Past performance ≠ future results")?;
        writeln!(self.out, "  - 仅供参考，不构成投资建议 / For reference only, not investment advice")?;
        Ok(())
    }

    fn basic_table(&mut self, funds: &[&FundBasic]) -> Result<()> {
        let mut table = new_table(&["代码\nCode", "名称\nName", "类型\nType", "风险\nRisk"]);
        for fund in funds {
            table.add_row(Row::new(vec![
                Cell::new(&fund.code).style_spec("Fc"),
                Cell::new(&fund.name),
                Cell::new(fund.fund_type.label()).style_spec("Fb"),
                Cell::new(fund.risk_level.label()).style_spec("Fy"),
            ]));
        }
        self.print_table(&table)?;
        Ok(())
    }

    fn print_table(&mut self, table: &Table) -> Result<()> {
        if self.tty {
            self.out.flush()?;
            table.print_tty(false)?;
        } else {
            table.print(&mut self.out)?;
        }
        Ok(())
    }

    fn panel(&mut self, title: &str, lines: &[String]) -> Result<()> {
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH).blue())?;
        writeln!(self.out, " {}", title.bold())?;
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH).blue())?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH).blue())?;
        Ok(())
    }

    /// 按失败类型给出不同提示
    fn failure<T>(&mut self, what: &str, outcome: &FetchOutcome<T>) -> Result<()> {
        let message = match outcome {
            FetchOutcome::Found(_) => return Ok(()),
            FetchOutcome::NoData => format!("❌ 未找到该基金的{} / No data for this code", what),
            FetchOutcome::Unreachable(reason) => {
                format!("❌ 无法连接数据源，{}获取失败 / Upstream unreachable: {}", what, reason)
            }
            FetchOutcome::Malformed(reason) => {
                format!("❌ 数据源返回格式异常，{}解析失败 / Unexpected response: {}", what, reason)
            }
        };
        writeln!(self.out, "{}", message.red())?;
        Ok(())
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h).style_spec("b")).collect()));
    table
}

fn metric_row(label: &str, cells: impl Iterator<Item = Cell>) -> Row {
    let mut row = vec![Cell::new(label).style_spec("b")];
    row.extend(cells);
    Row::new(row)
}

fn text_or_placeholder(text: Option<String>) -> String {
    text.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// 带符号的百分比，如 `+1.31%`
pub fn signed_percent(value: Decimal) -> String {
    let value = value.round_dp(2);
    // 避免 -0.00
    let value = if value.is_zero() { Decimal::ZERO } else { value };
    let sign = if value.is_sign_negative() { "" } else { "+" };
    format!("{}{:.2}%", sign, value)
}

fn colored_change(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v >= Decimal::ZERO => signed_percent(v).green().to_string(),
        Some(v) => signed_percent(v).red().to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn change_cell(value: Option<Decimal>) -> Cell {
    match value {
        Some(v) if v >= Decimal::ZERO => Cell::new(&signed_percent(v)).style_spec("Fgr"),
        Some(v) => Cell::new(&signed_percent(v)).style_spec("Frr"),
        None => Cell::new(PLACEHOLDER).style_spec("r"),
    }
}

/// 千分位分隔，保留两位小数
pub fn group_thousands(value: Decimal) -> String {
    let text = format!("{:.2}", value.round_dp(2).abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.round_dp(2).is_sign_negative() && !value.round_dp(2).is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
