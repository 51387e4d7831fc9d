//! 基金持仓解析（FundMNInverstPosition）

use chrono::NaiveDate;
use log::debug;
use serde_json::Value;

use crate::errors::Result;
use crate::models::{FundHolding, HoldingStock};
use crate::parsers::detail::success_data;
use crate::util::{to_date, to_decimal, to_text};

/// 持仓接口不返回基金名称时使用的占位名
pub const UNKNOWN_NAME: &str = "Unknown";

/// 解析基金持仓
///
/// 股票顺序即接口给出的权重排名，不重排、不去重。
/// 缺少代码、名称或占比的条目被单独丢弃。
/// 报告期（顶层 `Expansion`）缺失或无法解析时使用 `today`。
pub fn parse_holdings(code: &str, json: &Value, today: NaiveDate) -> Result<Option<FundHolding>> {
    let Some(datas) = success_data(json) else {
        return Ok(None);
    };

    let top_stocks = datas
        .get("fundStocks")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .filter_map(|(rank, entry)| {
                    let stock = parse_stock(entry);
                    if stock.is_none() {
                        debug!("Dropping holding entry {} of {}: {}", rank, code, entry);
                    }
                    stock
                })
                .collect()
        })
        .unwrap_or_default();

    let report_date = to_date(json.get("Expansion")).unwrap_or(today);

    Ok(Some(FundHolding {
        code: code.to_string(),
        name: UNKNOWN_NAME.to_string(),
        report_date,
        top_stocks,
        stock_percentage: None,
        bond_percentage: None,
        cash_percentage: None,
    }))
}

fn parse_stock(entry: &Value) -> Option<HoldingStock> {
    Some(HoldingStock {
        code: to_text(entry.get("GPDM"))?,
        name: to_text(entry.get("GPJC"))?,
        percentage: to_decimal(entry.get("JZBL"))?,
    })
}
