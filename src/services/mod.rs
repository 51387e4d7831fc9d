pub mod fund_service;

pub use fund_service::{Comparison, FundService};
