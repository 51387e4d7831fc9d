use crate::calculator::{self, DcaProjection};
use crate::config::Config;
use crate::data_provider::FundCatalog;
use crate::errors::{FundError, Result};
use crate::models::{FundBasic, FundDetail, FundHolding, FundPrice, FundType, Frequency, HistoryPage};
use crate::scrapers::base::{FetchOutcome, FundSource};
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

/// 对比命令允许的基金数量
pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 4;

/// 基金对比结果，未取到数据的代码单独列出
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub details: Vec<FundDetail>,
    pub skipped: Vec<(String, String)>,
}

/// 基金查询服务，组合数据源与基金目录
pub struct FundService {
    config: Config,
    source: Arc<dyn FundSource + Send + Sync>,
    catalog: FundCatalog,
}

impl FundService {
    /// 创建新的基金服务实例
    pub fn new(config: Config, source: Arc<dyn FundSource + Send + Sync>, catalog: FundCatalog) -> Self {
        Self {
            config,
            source,
            catalog,
        }
    }

    pub fn catalog(&self) -> &FundCatalog {
        &self.catalog
    }

    /// 基金详情
    pub async fn fund_detail(&self, code: &str) -> FetchOutcome<FundDetail> {
        self.source.fetch_detail(code).await
    }

    /// 基金持仓，接口不返回名称，从目录补全
    pub async fn fund_holdings(&self, code: &str) -> FetchOutcome<FundHolding> {
        self.source.fetch_holdings(code).await.map(|mut holding| {
            if let Some(basic) = self.catalog.get(code) {
                holding.name = basic.name.clone();
            }
            holding
        })
    }

    /// 实时估值与确认净值，分类和风险等级从目录补全
    pub async fn fund_price(&self, code: &str) -> FetchOutcome<FundPrice> {
        self.source.fetch_estimate(code).await.map(|price| match self.catalog.get(code) {
            Some(basic) => price.merge_basic(basic),
            None => price,
        })
    }

    /// 历史净值，未指定条数时使用配置中的默认值
    pub async fn history(&self, code: &str, limit: Option<usize>) -> FetchOutcome<HistoryPage> {
        let limit = limit.unwrap_or(self.config.history_limit);
        self.source.fetch_history(code, limit).await
    }

    /// 依次获取每只基金的详情，单只失败不影响其他基金
    pub async fn compare_funds(&self, codes: &[String]) -> Result<Comparison> {
        if codes.len() < MIN_COMPARE || codes.len() > MAX_COMPARE {
            return Err(FundError::InvalidInput(format!(
                "Please input {} to {} fund codes to compare, got {}",
                MIN_COMPARE,
                MAX_COMPARE,
                codes.len()
            )));
        }

        let mut details = Vec::with_capacity(codes.len());
        let mut skipped = Vec::new();
        for code in codes {
            let outcome = self.source.fetch_detail(code).await;
            match outcome.failure_reason() {
                None => details.extend(outcome.found()),
                Some(reason) => {
                    warn!("Omitting {} from comparison: {}", code, reason);
                    skipped.push((code.clone(), reason));
                }
            }
        }

        info!("Compared {} of {} funds", details.len(), codes.len());
        Ok(Comparison { details, skipped })
    }

    pub fn fund_list(&self, category: Option<FundType>) -> Vec<&FundBasic> {
        self.catalog.list(category)
    }

    pub fn hot_funds(&self, category: Option<FundType>) -> Vec<&FundBasic> {
        self.catalog.hot(category)
    }

    pub fn search_funds(&self, keyword: &str) -> Vec<&FundBasic> {
        self.catalog.search(keyword)
    }

    /// 定投测算
    pub fn calculate_dca(&self, code: &str, amount: Decimal, years: u32, frequency: Frequency) -> Result<DcaProjection> {
        calculator::calculate_dca(code, amount, years, frequency)
    }
}
