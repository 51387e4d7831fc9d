use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FundError;

/// 基金类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundType {
    Stock,
    Hybrid,
    Bond,
    Index,
    Money,
    Qdii,
}

impl FundType {
    /// 目录中的分类顺序
    pub const ALL: [FundType; 6] = [
        FundType::Stock,
        FundType::Hybrid,
        FundType::Bond,
        FundType::Index,
        FundType::Money,
        FundType::Qdii,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FundType::Stock => "stock",
            FundType::Hybrid => "hybrid",
            FundType::Bond => "bond",
            FundType::Index => "index",
            FundType::Money => "money",
            FundType::Qdii => "qdii",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FundType::Stock => "股票型",
            FundType::Hybrid => "混合型",
            FundType::Bond => "债券型",
            FundType::Index => "指数型",
            FundType::Money => "货币型",
            FundType::Qdii => "QDII",
        }
    }
}

impl fmt::Display for FundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundType {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FundType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FundError::InvalidInput(format!("Unknown fund type: {}", s)))
    }
}

/// 风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "极低风险")]
    VeryLow,
    #[serde(rename = "低风险")]
    Low,
    #[serde(rename = "中风险")]
    Medium,
    #[serde(rename = "中高风险")]
    MediumHigh,
    #[serde(rename = "高风险")]
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "极低风险",
            RiskLevel::Low => "低风险",
            RiskLevel::Medium => "中风险",
            RiskLevel::MediumHigh => "中高风险",
            RiskLevel::High => "高风险",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 定投频率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Weekly,
    Daily,
}

impl Frequency {
    /// 每年期数，按日定投以 250 个交易日计
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
            Frequency::Daily => 250,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
            Frequency::Daily => "daily",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Frequency::Monthly),
            "weekly" => Ok(Frequency::Weekly),
            "daily" => Ok(Frequency::Daily),
            other => Err(FundError::InvalidInput(format!(
                "Frequency must be monthly/weekly/daily, got {}",
                other
            ))),
        }
    }
}
