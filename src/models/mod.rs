pub mod enums;
pub mod fund;

pub use enums::{FundType, Frequency, RiskLevel};
pub use fund::{
    FundBasic, FundDetail, FundHolding, FundPrice, HistoricalNav, HistoryPage, HoldingStock,
};
