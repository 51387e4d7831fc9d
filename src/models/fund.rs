use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::enums::{FundType, RiskLevel};

/// 1 亿 = 100,000,000 元
pub const YI: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// 基金基本信息，只来自内置基金目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundBasic {
    pub code: String,
    pub name: String,
    pub fund_type: FundType,
    pub risk_level: RiskLevel,
}

/// 基金净值信息
///
/// 估值三元组只在交易时段内返回，确认净值在收盘后更新，
/// 各字段相互独立，缺失即为 None。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundPrice {
    pub code: String,
    pub name: String,

    // 实时估值
    pub estimate_value: Option<Decimal>,
    pub estimate_time: Option<NaiveDateTime>,
    pub estimate_change: Option<Decimal>,

    // 确认净值
    pub nav: Option<Decimal>,
    pub nav_date: Option<NaiveDate>,
    pub accumulated_nav: Option<Decimal>,

    // 其他接口补充的信息
    pub fund_type: Option<FundType>,
    pub risk_level: Option<RiskLevel>,
    pub scale: Option<Decimal>,  // 单位：亿
    pub manager_name: Option<String>,
}

impl FundPrice {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            estimate_value: None,
            estimate_time: None,
            estimate_change: None,
            nav: None,
            nav_date: None,
            accumulated_nav: None,
            fund_type: None,
            risk_level: None,
            scale: None,
            manager_name: None,
        }
    }

    /// 用目录中的分类信息补全
    pub fn merge_basic(mut self, basic: &FundBasic) -> Self {
        self.fund_type = self.fund_type.or(Some(basic.fund_type));
        self.risk_level = self.risk_level.or(Some(basic.risk_level));
        self
    }

    /// 用基金详情接口的规模和经理补全，已有的值不覆盖
    pub fn merge_detail(mut self, detail: &FundDetail) -> Self {
        if self.scale.is_none() {
            self.scale = detail.fund_size.map(|size| size / YI);
        }
        if self.manager_name.is_none() {
            self.manager_name = detail.manager.clone();
        }
        self
    }
}

/// 单日历史净值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalNav {
    pub date: NaiveDate,
    pub nav: Decimal,
    pub accumulated_nav: Decimal,
    pub daily_change: Option<Decimal>,  // 百分比，"---" 为 None
}

/// 一页历史净值，保持接口返回的顺序
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HistoryPage {
    pub navs: Vec<HistoricalNav>,
    pub total_records: Option<u32>,
}

/// 持仓股票
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingStock {
    pub code: String,
    pub name: String,
    pub percentage: Decimal,  // 占净值比例 %
}

/// 基金持仓
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundHolding {
    pub code: String,
    pub name: String,
    pub report_date: NaiveDate,

    /// 十大重仓股，按权重排名
    pub top_stocks: Vec<HoldingStock>,

    // 资产配置，当前接口不提供
    pub stock_percentage: Option<Decimal>,
    pub bond_percentage: Option<Decimal>,
    pub cash_percentage: Option<Decimal>,
}

/// 基金详细信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundDetail {
    pub code: String,
    pub name: String,
    /// 接口返回的类型描述，如 "混合型-偏股"
    pub fund_type: String,

    pub establish_date: Option<NaiveDate>,
    pub company: Option<String>,
    pub manager: Option<String>,
    pub fund_size: Option<Decimal>,  // 单位：元

    /// 费率原文，可能是 "1.20%" 也可能是 "1.2"
    pub management_fee: Option<String>,

    pub risk_level: Option<String>,
    pub rating: Option<String>,

    // 阶段涨幅 %
    pub return_1m: Option<Decimal>,
    pub return_6m: Option<Decimal>,
    pub return_1y: Option<Decimal>,
    pub return_3y: Option<Decimal>,
    pub return_inception: Option<Decimal>,
}

impl FundDetail {
    /// 规模换算为亿
    pub fn size_in_yi(&self) -> Option<Decimal> {
        self.fund_size.map(|size| size / YI)
    }
}
