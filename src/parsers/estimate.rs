//! 实时估值（JSONP）解析
//!
//! 响应形如 `jsonpgz({"fundcode":"110022","name":"...","gsz":"3.4567",...});`，
//! 无效代码返回 `jsonpgz();`。

use log::debug;
use serde_json::Value;

use crate::errors::{FundError, Result};
use crate::models::FundPrice;
use crate::util::{to_datetime, to_date, to_decimal, to_text};

pub const CALLBACK: &str = "jsonpgz(";

/// 解析实时估值响应
///
/// 找不到回调包装或包装内为空时返回 `Ok(None)`；
/// 包装内不是合法 JSON 或缺少代码/名称时返回错误。
pub fn parse_estimate(body: &str) -> Result<Option<FundPrice>> {
    let Some(start) = body.find(CALLBACK).map(|i| i + CALLBACK.len()) else {
        debug!("No {} wrapper in estimate body", CALLBACK);
        return Ok(None);
    };
    let rest = &body[start..];

    let Some(first_close) = rest.find(')') else {
        return Ok(None);
    };
    let payload = rest[..first_close].trim();
    if payload.is_empty() {
        return Ok(None);
    }

    let data: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        // 基金名称里可能有半角括号，退回到最后一个右括号
        Err(first_err) => match rest.rfind(')') {
            Some(last_close) if last_close > first_close => {
                serde_json::from_str(rest[..last_close].trim())?
            }
            _ => return Err(first_err.into()),
        },
    };

    build_price(&data).map(Some)
}

fn build_price(data: &Value) -> Result<FundPrice> {
    let code = to_text(data.get("fundcode"))
        .ok_or_else(|| FundError::PayloadError("estimate payload has no fundcode".to_string()))?;
    let name = to_text(data.get("name"))
        .ok_or_else(|| FundError::PayloadError(format!("estimate payload for {} has no name", code)))?;

    let mut price = FundPrice::new(&code, &name);
    price.estimate_value = to_decimal(data.get("gsz"));
    price.estimate_time = to_datetime(data.get("gztime"));
    price.estimate_change = to_decimal(data.get("gszzl"));
    price.nav = to_decimal(data.get("dwjz"));
    price.nav_date = to_date(data.get("jzrq"));
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const BODY: &str = r#"jsonpgz({"fundcode":"110022","name":"易方达消费行业股票","jzrq":"2024-01-29","dwjz":"3.4120","gsz":"3.4567","gszzl":"1.31","gztime":"2024-01-30 15:00"});"#;

    #[test]
    fn test_parse_full_payload() {
        let price = parse_estimate(BODY).unwrap().unwrap();

        assert_eq!(price.code, "110022");
        assert_eq!(price.name, "易方达消费行业股票");
        assert_eq!(price.estimate_value, Some(dec!(3.4567)));
        assert_eq!(price.estimate_change, Some(dec!(1.31)));
        assert_eq!(price.nav, Some(dec!(3.4120)));
        assert_eq!(price.nav_date, NaiveDate::from_ymd_opt(2024, 1, 29));
        assert_eq!(
            price.estimate_time.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2024-01-30 15:00"
        );
        assert_eq!(price.accumulated_nav, None);
    }

    #[test]
    fn test_missing_wrapper_is_unavailable() {
        assert!(parse_estimate("<html>404 Not Found</html>").unwrap().is_none());
        assert!(parse_estimate("").unwrap().is_none());
    }

    #[test]
    fn test_empty_callback_is_unavailable() {
        assert!(parse_estimate("jsonpgz();").unwrap().is_none());
    }

    #[test]
    fn test_outside_trading_hours_fields_are_unknown() {
        let body = r#"jsonpgz({"fundcode":"000198","name":"天弘余额宝货币","jzrq":"2024-01-29","dwjz":"1.0000","gsz":"","gszzl":"","gztime":""});"#;
        let price = parse_estimate(body).unwrap().unwrap();

        assert_eq!(price.estimate_value, None);
        assert_eq!(price.estimate_change, None);
        assert_eq!(price.estimate_time, None);
        assert_eq!(price.nav, Some(dec!(1.0000)));
    }

    #[test]
    fn test_bad_field_degrades_alone() {
        let body = r#"jsonpgz({"fundcode":"110022","name":"x","jzrq":"29/01/2024","dwjz":"abc","gsz":"3.5","gztime":"2024-01-30"});"#;
        let price = parse_estimate(body).unwrap().unwrap();

        assert_eq!(price.nav_date, None);
        assert_eq!(price.nav, None);
        assert_eq!(price.estimate_time, None);
        assert_eq!(price.estimate_value, Some(dec!(3.5)));
    }

    #[test]
    fn test_name_with_ascii_parenthesis() {
        let body = r#"jsonpgz({"fundcode":"000041","name":"华夏全球精选(QDII)","gsz":"1.1"});"#;
        let price = parse_estimate(body).unwrap().unwrap();
        assert_eq!(price.name, "华夏全球精选(QDII)");
    }

    #[test]
    fn test_garbage_inside_wrapper_is_an_error() {
        assert!(parse_estimate("jsonpgz(not json);").is_err());
        assert!(parse_estimate(r#"jsonpgz({"name":"no code"});"#).is_err());
    }
}
