use crate::errors::{FundError, Result};
use crate::models::{FundDetail, FundHolding, FundPrice, HistoryPage};
use crate::parsers::{parse_detail, parse_estimate, parse_history, parse_holdings};
use crate::scrapers::base::{FetchOutcome, FundSource};
use crate::scrapers::transport::Transport;
use crate::util;
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

pub const ESTIMATE_BASE_URL: &str = "http://fundgz.1234567.com.cn/js";
pub const HISTORY_URL: &str = "https://fundf10.eastmoney.com/F10DataApi.aspx";
pub const MOBILE_BASE_URL: &str = "https://fundmobapi.eastmoney.com/FundMNewApi";

/// 移动端接口固定携带的设备参数
const MOBILE_PARAMS: [(&str, &str); 4] = [
    ("deviceid", "1"),
    ("plat", "Iphone"),
    ("product", "EFund"),
    ("version", "11.0.0"),
];

/// 天天基金（东方财富）数据抓取器
pub struct TianTianScraper<T> {
    transport: T,
}

impl<T: Transport + Send + Sync> TianTianScraper<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// 发送请求，非 2xx 状态视为网络失败
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!("请求 {} {:?}", url, query);
        let response = self.transport.get(url, query).await?;
        if !response.is_success() {
            return Err(FundError::StatusError {
                status: response.status,
                url: url.to_string(),
            });
        }
        Ok(response.text())
    }

    async fn get_mobile_json(&self, endpoint: &str, code: &str) -> Result<Value> {
        let url = format!("{}/{}", MOBILE_BASE_URL, endpoint);
        let mut query = vec![("FCODE", code)];
        query.extend(MOBILE_PARAMS);

        let text = self.get_text(&url, &query).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn estimate(&self, code: &str) -> Result<Option<FundPrice>> {
        let url = format!("{}/{}.js", ESTIMATE_BASE_URL, code);
        let text = self.get_text(&url, &[]).await?;
        parse_estimate(&text)
    }

    async fn history(&self, code: &str, limit: usize) -> Result<Option<HistoryPage>> {
        let per = limit.to_string();
        let query = [("type", "lsjz"), ("code", code), ("page", "1"), ("per", per.as_str())];
        let text = self.get_text(HISTORY_URL, &query).await?;
        parse_history(&text)
    }

    async fn detail(&self, code: &str) -> Result<Option<FundDetail>> {
        let json = self.get_mobile_json("FundMNBasicInformation", code).await?;
        parse_detail(&json)
    }

    async fn holdings(&self, code: &str) -> Result<Option<FundHolding>> {
        let json = self.get_mobile_json("FundMNInverstPosition", code).await?;
        parse_holdings(code, &json, util::today_in_china())
    }
}

#[async_trait]
impl<T: Transport + Send + Sync> FundSource for TianTianScraper<T> {
    fn source_name(&self) -> &'static str {
        "TianTian"
    }

    async fn fetch_estimate(&self, code: &str) -> FetchOutcome<FundPrice> {
        info!("获取基金 {} 实时估值", code);
        FetchOutcome::settle("estimate", code, self.estimate(code).await)
    }

    async fn fetch_history(&self, code: &str, limit: usize) -> FetchOutcome<HistoryPage> {
        info!("获取基金 {} 最近 {} 条历史净值", code, limit);
        let outcome = FetchOutcome::settle("history", code, self.history(code, limit).await);
        if let FetchOutcome::Found(page) = &outcome {
            debug!("获取到 {} 条净值记录", page.navs.len());
        }
        outcome
    }

    async fn fetch_detail(&self, code: &str) -> FetchOutcome<FundDetail> {
        info!("获取基金 {} 详情", code);
        FetchOutcome::settle("detail", code, self.detail(code).await)
    }

    async fn fetch_holdings(&self, code: &str) -> FetchOutcome<FundHolding> {
        info!("获取基金 {} 持仓", code);
        FetchOutcome::settle("holdings", code, self.holdings(code).await)
    }
}
