//! 定投（DCA）收益测算
//!
//! 按普通年金终值公式计算：
//! `FV = amount × ((1 + r/n)^periods − 1) / (r/n)`，r 为年化收益率，n 为每年期数。

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::errors::{FundError, Result};
use crate::models::Frequency;

/// 测算情景
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Conservative,
    Neutral,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Conservative, Scenario::Neutral, Scenario::Optimistic];

    /// 年化收益率：6%、8%、10%
    pub fn annual_rate(&self) -> Decimal {
        match self {
            Scenario::Conservative => Decimal::new(6, 2),
            Scenario::Neutral => Decimal::new(8, 2),
            Scenario::Optimistic => Decimal::new(10, 2),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Conservative => "保守 6%",
            Scenario::Neutral => "中性 8%",
            Scenario::Optimistic => "乐观 10%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub annual_rate: Decimal,
    pub future_value: Decimal,
    pub profit: Decimal,
    /// 收益率 %，总投入为零时无意义
    pub return_rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcaProjection {
    pub code: String,
    pub amount: Decimal,
    pub years: u32,
    pub frequency: Frequency,
    pub periods: u32,
    pub total_invested: Decimal,
    pub scenarios: Vec<ScenarioResult>,
}

impl DcaProjection {
    pub fn scenario(&self, scenario: Scenario) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.scenario == scenario)
    }
}

/// 普通年金终值，年化收益率为零时等于总投入
pub fn future_value(amount: Decimal, annual_rate: Decimal, periods_per_year: u32, periods: u32) -> Result<Decimal> {
    let total = amount
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| FundError::InvalidInput(format!("Total of {} over {} periods overflows", amount, periods)))?;
    if annual_rate.is_zero() || periods_per_year == 0 {
        return Ok(total);
    }

    let period_rate = annual_rate / Decimal::from(periods_per_year);
    let growth = (Decimal::ONE + period_rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| FundError::InvalidInput(format!("Projection over {} periods overflows", periods)))?;

    (growth - Decimal::ONE)
        .checked_div(period_rate)
        .and_then(|factor| amount.checked_mul(factor))
        .ok_or_else(|| FundError::InvalidInput("Projection overflows".to_string()))
}

/// 计算三种情景下的定投结果
pub fn calculate_dca(code: &str, amount: Decimal, years: u32, frequency: Frequency) -> Result<DcaProjection> {
    if amount.is_sign_negative() {
        return Err(FundError::InvalidInput(format!("Amount must not be negative: {}", amount)));
    }

    let periods_per_year = frequency.periods_per_year();
    let periods = years
        .checked_mul(periods_per_year)
        .ok_or_else(|| FundError::InvalidInput(format!("Too many years: {}", years)))?;
    let total_invested = amount
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| FundError::InvalidInput(format!("Amount too large: {}", amount)))?;

    let mut scenarios = Vec::with_capacity(Scenario::ALL.len());
    for scenario in Scenario::ALL {
        let annual_rate = scenario.annual_rate();
        let future_value = future_value(amount, annual_rate, periods_per_year, periods)?;
        let profit = future_value - total_invested;
        let return_rate = (!total_invested.is_zero())
            .then(|| (profit / total_invested * Decimal::ONE_HUNDRED).round_dp(2));

        scenarios.push(ScenarioResult {
            scenario,
            annual_rate,
            future_value: future_value.round_dp(2),
            profit: profit.round_dp(2),
            return_rate,
        });
    }

    Ok(DcaProjection {
        code: code.to_string(),
        amount,
        years,
        frequency,
        periods,
        total_invested,
        scenarios,
    })
}
