// 公开导出的模块，供外部使用
pub mod models;
pub mod parsers;
pub mod calculator;
pub mod data_provider;
pub mod errors;
pub mod config;
pub mod services;
pub mod ui;

// 主程序需要直接构造抓取器
#[doc(hidden)]
pub mod scrapers;
#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::{FundBasic, FundDetail, FundHolding, FundPrice, FundType, Frequency, HistoryPage, RiskLevel};
pub use data_provider::FundCatalog;
pub use scrapers::base::{FetchOutcome, FundSource};
pub use services::FundService;
pub use errors::{Result, FundError};
