use fund_assistant::config::Config;
use fund_assistant::data_provider::FundCatalog;
use fund_assistant::errors::{FundError, Result};
use fund_assistant::models::{FundBasic, FundType, Frequency};
use fund_assistant::scrapers::{FundSource, HttpTransport, TianTianScraper};
use fund_assistant::services::FundService;
use fund_assistant::ui::FundFormatter;

use clap::{App, Arg, ArgMatches, SubCommand};
use colored::*;
use log::{info, warn};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

fn build_app() -> App<'static> {
    let code_arg = || {
        Arg::with_name("code")
            .value_name("CODE")
            .help("Fund code, e.g. 110022")
            .required(true)
            .takes_value(true)
    };
    let type_arg = || {
        Arg::with_name("type")
            .short('t')
            .long("type")
            .value_name("TYPE")
            .help("Fund type (stock, hybrid, bond, index, money, qdii)")
            .takes_value(true)
    };

    App::new("fund-assistant")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Query China mutual fund data from TianTian Fund (天天基金)")
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("HTTP timeout in seconds (default 10)")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("catalog")
                .long("catalog")
                .value_name("PATH")
                .help("Load the fund catalog from a JSON file instead of the bundled one")
                .takes_value(true)
                .global(true),
        )
        .subcommand(SubCommand::with_name("info").about("Show fund details").arg(code_arg()))
        .subcommand(SubCommand::with_name("holding").about("Show top stock holdings").arg(code_arg()))
        .subcommand(
            SubCommand::with_name("compare")
                .about("Compare 2 to 4 funds side by side")
                .arg(
                    Arg::with_name("codes")
                        .value_name("CODES")
                        .help("Fund codes to compare")
                        .required(true)
                        .takes_value(true)
                        .multiple_values(true),
                ),
        )
        .subcommand(SubCommand::with_name("manager").about("Show fund manager").arg(code_arg()))
        .subcommand(SubCommand::with_name("list").about("List funds in the catalog").arg(type_arg()))
        .subcommand(SubCommand::with_name("price").about("Show real-time estimate and NAV").arg(code_arg()))
        .subcommand(
            SubCommand::with_name("history")
                .about("Show historical NAV")
                .arg(code_arg())
                .arg(
                    Arg::with_name("limit")
                        .short('n')
                        .long("limit")
                        .value_name("N")
                        .help("Number of records to show (default 10)")
                        .takes_value(true),
                ),
        )
        .subcommand(SubCommand::with_name("hot").about("Show hot funds").arg(type_arg()))
        .subcommand(
            SubCommand::with_name("search").about("Search funds by code or name").arg(
                Arg::with_name("keyword")
                    .value_name("KEYWORD")
                    .required(true)
                    .takes_value(true),
            ),
        )
        .subcommand(
            SubCommand::with_name("calc")
                .about("Project dollar-cost averaging returns")
                .arg(code_arg())
                .arg(
                    Arg::with_name("amount")
                        .value_name("AMOUNT")
                        .help("Amount invested per period")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("years")
                        .value_name("YEARS")
                        .help("Investment horizon in years")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("frequency")
                        .short('f')
                        .long("frequency")
                        .value_name("FREQ")
                        .help("monthly, weekly or daily")
                        .takes_value(true)
                        .default_value("monthly"),
                ),
        )
        .subcommand(SubCommand::with_name("summary").about("Show fund categories and risk warning"))
}

/// 解析数字参数，失败视为用户输入错误
fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| FundError::InvalidInput(format!("{} must be a number, got '{}'", name, value)))
}

/// 按分类筛选，无法识别的分类返回空列表
fn by_category<'a>(value: Option<&str>, query: impl Fn(Option<FundType>) -> Vec<&'a FundBasic>) -> Vec<&'a FundBasic> {
    match value.map(FundType::from_str) {
        None => query(None),
        Some(Ok(fund_type)) => query(Some(fund_type)),
        Some(Err(e)) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// 全局参数既可能出现在子命令之前，也可能在之后
fn global_value<'a>(top: &'a ArgMatches, sub: &'a ArgMatches, name: &str) -> Option<&'a str> {
    sub.value_of(name).or_else(|| top.value_of(name))
}

async fn run(matches: &ArgMatches) -> Result<()> {
    let Some((command, sub)) = matches.subcommand() else {
        info!("No command specified. Use --help for usage information.");
        return Ok(());
    };

    // 创建配置
    let mut config = Config::new();
    if let Some(timeout) = global_value(matches, sub, "timeout") {
        config = config.with_timeout_secs(parse_number("timeout", timeout)?);
    }
    if let Some(path) = global_value(matches, sub, "catalog") {
        config = config.with_catalog_path(path);
    }

    let catalog = match &config.catalog_path {
        Some(path) => FundCatalog::load_from_file(path)?,
        None => FundCatalog::bundled()?,
    };
    info!("Catalog loaded with {} funds", catalog.len());

    let transport = HttpTransport::new(&config)?;
    let source = Arc::new(TianTianScraper::new(transport));
    info!("Using data source: {}", source.source_name());
    let service = FundService::new(config, source, catalog);
    let mut formatter = FundFormatter::stdout();

    match command {
        "info" => {
            let code = sub.value_of("code").unwrap_or_default();
            formatter.display_fund_detail(&service.fund_detail(code).await)?;
        }
        "holding" => {
            let code = sub.value_of("code").unwrap_or_default();
            formatter.display_fund_holdings(&service.fund_holdings(code).await)?;
        }
        "compare" => {
            let codes: Vec<String> = sub
                .values_of("codes")
                .map(|values| values.map(str::to_string).collect())
                .unwrap_or_default();
            let comparison = service.compare_funds(&codes).await?;
            formatter.display_comparison(&comparison)?;
        }
        "manager" => {
            let code = sub.value_of("code").unwrap_or_default();
            formatter.display_manager(&service.fund_detail(code).await)?;
        }
        "list" => {
            let funds = by_category(sub.value_of("type"), |t| service.fund_list(t));
            formatter.display_fund_list(&funds)?;
        }
        "price" => {
            let code = sub.value_of("code").unwrap_or_default();
            formatter.display_fund_price(&service.fund_price(code).await)?;
        }
        "history" => {
            let code = sub.value_of("code").unwrap_or_default();
            let limit = sub
                .value_of("limit")
                .map(|n| parse_number::<usize>("limit", n))
                .transpose()?;
            formatter.display_history(&service.history(code, limit).await, code)?;
        }
        "hot" => {
            let funds = by_category(sub.value_of("type"), |t| service.hot_funds(t));
            formatter.display_hot_funds(&funds)?;
        }
        "search" => {
            let keyword = sub.value_of("keyword").unwrap_or_default();
            formatter.display_search_results(&service.search_funds(keyword), keyword)?;
        }
        "calc" => {
            let code = sub.value_of("code").unwrap_or_default();
            let amount = Decimal::from_str(sub.value_of("amount").unwrap_or_default().trim()).map_err(|_| {
                FundError::InvalidInput(format!(
                    "amount must be a number, got '{}'",
                    sub.value_of("amount").unwrap_or_default()
                ))
            })?;
            let years: u32 = parse_number("years", sub.value_of("years").unwrap_or_default())?;
            let frequency: Frequency = sub.value_of("frequency").unwrap_or("monthly").parse()?;

            let projection = service.calculate_dca(code, amount, years, frequency)?;
            let fund_name = service.catalog().get(code).map(|basic| basic.name.as_str());
            formatter.display_calculator(&projection, fund_name)?;
        }
        "summary" => {
            formatter.display_summary(&service.hot_funds(None))?;
        }
        other => {
            return Err(format!("Unknown command: {}", other).into());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init();

    let matches = build_app().get_matches();
    if let Err(e) = run(&matches).await {
        eprintln!("{}", format!("❌ {}", e).red());
        std::process::exit(1);
    }
}
