use crate::errors::Result;
use crate::models::{FundDetail, FundHolding, FundPrice, HistoryPage};
use async_trait::async_trait;
use log::warn;

/// 一次抓取的结果
///
/// 区分“接口不可达”“接口没有该基金的数据”和“响应格式不符合预期”，
/// 让展示层可以分别提示。
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Found(T),
    NoData,
    Malformed(String),
    Unreachable(String),
}

impl<T> FetchOutcome<T> {
    /// 将解析结果归类，失败时记录日志
    pub fn settle(what: &str, code: &str, result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => FetchOutcome::Found(value),
            Ok(None) => {
                warn!("No {} data for fund {}", what, code);
                FetchOutcome::NoData
            }
            Err(e) if e.is_transport() => {
                warn!("Failed to fetch {} for {}: {}", what, code, e);
                FetchOutcome::Unreachable(e.to_string())
            }
            Err(e) => {
                warn!("Unexpected {} payload for {}: {}", what, code, e);
                FetchOutcome::Malformed(e.to_string())
            }
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            FetchOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Found(value) => FetchOutcome::Found(f(value)),
            FetchOutcome::NoData => FetchOutcome::NoData,
            FetchOutcome::Malformed(reason) => FetchOutcome::Malformed(reason),
            FetchOutcome::Unreachable(reason) => FetchOutcome::Unreachable(reason),
        }
    }

    /// 失败原因，成功时为 None
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            FetchOutcome::Found(_) => None,
            FetchOutcome::NoData => Some("no data for this code".to_string()),
            FetchOutcome::Malformed(reason) => Some(format!("unexpected response: {}", reason)),
            FetchOutcome::Unreachable(reason) => Some(format!("upstream unreachable: {}", reason)),
        }
    }
}

/// Base trait for fund data sources
#[async_trait]
pub trait FundSource {
    /// Name of the upstream provider
    fn source_name(&self) -> &'static str;

    /// Real-time estimate plus the last confirmed NAV
    async fn fetch_estimate(&self, code: &str) -> FetchOutcome<FundPrice>;

    /// One page of historical NAV, `limit` records requested from upstream
    async fn fetch_history(&self, code: &str, limit: usize) -> FetchOutcome<HistoryPage>;

    async fn fetch_detail(&self, code: &str) -> FetchOutcome<FundDetail>;

    async fn fetch_holdings(&self, code: &str) -> FetchOutcome<FundHolding>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FundError;

    #[test]
    fn test_settle_tags_each_failure_kind() {
        let found: FetchOutcome<u8> = FetchOutcome::settle("detail", "1", Ok(Some(1)));
        assert_eq!(found, FetchOutcome::Found(1));

        let none: FetchOutcome<u8> = FetchOutcome::settle("detail", "1", Ok(None));
        assert_eq!(none, FetchOutcome::NoData);

        let status: FetchOutcome<u8> = FetchOutcome::settle(
            "detail",
            "1",
            Err(FundError::StatusError { status: 503, url: "http://x".to_string() }),
        );
        assert!(matches!(status, FetchOutcome::Unreachable(_)));

        let shape: FetchOutcome<u8> =
            FetchOutcome::settle("detail", "1", Err(FundError::PayloadError("no FCODE".to_string())));
        assert!(matches!(shape, FetchOutcome::Malformed(_)));
    }

    #[test]
    fn test_map_and_found() {
        let outcome = FetchOutcome::Found(2).map(|v| v * 10);
        assert_eq!(outcome.clone().found(), Some(20));
        assert!(outcome.failure_reason().is_none());

        let missing: FetchOutcome<u8> = FetchOutcome::NoData;
        assert!(!missing.is_found());
        assert_eq!(missing.failure_reason().as_deref(), Some("no data for this code"));
    }
}
