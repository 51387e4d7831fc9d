pub mod base;
pub mod tiantian;
pub mod transport;

pub use base::{FetchOutcome, FundSource};
pub use tiantian::TianTianScraper;
pub use transport::{HttpResponse, HttpTransport, Transport};
