//! 基金详情解析（FundMNBasicInformation）

use serde_json::Value;

use crate::errors::{FundError, Result};
use crate::models::FundDetail;
use crate::util::{first_present, to_date, to_decimal, to_text};

/// 管理费率字段，不同类型基金放在不同的键下，按此顺序探测
pub const FEE_KEYS: [&str; 3] = ["RATE", "rate", "SOURCERATE"];

/// 解析基金详情
///
/// `Success` 为假或没有 `Datas` 时返回 `Ok(None)`。
pub fn parse_detail(json: &Value) -> Result<Option<FundDetail>> {
    let Some(info) = success_data(json) else {
        return Ok(None);
    };

    let code = required_text(info, "FCODE")?;
    let name = required_text(info, "SHORTNAME")?;
    let fund_type = required_text(info, "FTYPE")?;

    Ok(Some(FundDetail {
        code,
        name,
        fund_type,
        establish_date: to_date(info.get("ESTABDATE")),
        company: to_text(info.get("JJGS")),
        manager: to_text(info.get("JJJL")),
        fund_size: to_decimal(info.get("ENDNAV")),
        management_fee: to_text(first_present(info, &FEE_KEYS)),
        risk_level: to_text(info.get("RISKLEVEL")),
        rating: None,
        return_1m: to_decimal(info.get("SYL_Y")),
        return_6m: to_decimal(info.get("SYL_6Y")),
        return_1y: to_decimal(info.get("SYL_1N")),
        return_3y: to_decimal(info.get("SYL_3N")),
        return_inception: to_decimal(info.get("SYL_LN")),
    }))
}

/// 移动端接口的通用外层：`{"Success": true, "Datas": {...}}`
pub(crate) fn success_data(json: &Value) -> Option<&Value> {
    let success = match json.get("Success") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_i64().unwrap_or_default() != 0,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    };
    if !success {
        return None;
    }
    json.get("Datas").filter(|datas| match datas {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    })
}

fn required_text(info: &Value, key: &str) -> Result<String> {
    to_text(info.get(key))
        .ok_or_else(|| FundError::PayloadError(format!("detail payload has no {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payload(datas: Value) -> Value {
        json!({ "Datas": datas, "ErrCode": 0, "Success": true, "TotalCount": 1 })
    }

    #[test]
    fn test_parse_full_payload() {
        let json = payload(json!({
            "FCODE": "110022",
            "SHORTNAME": "易方达消费行业股票",
            "FTYPE": "股票型",
            "ESTABDATE": "2010-08-20",
            "JJGS": "易方达基金",
            "JJJL": "萧楠",
            "ENDNAV": "18345123456.78",
            "RATE": "1.20%",
            "RISKLEVEL": "4",
            "SYL_Y": "-2.35",
            "SYL_6Y": "5.12",
            "SYL_1N": "12.3456",
            "SYL_3N": "--",
            "SYL_LN": "245.80"
        }));
        let detail = parse_detail(&json).unwrap().unwrap();

        assert_eq!(detail.code, "110022");
        assert_eq!(detail.fund_type, "股票型");
        assert_eq!(detail.establish_date, NaiveDate::from_ymd_opt(2010, 8, 20));
        assert_eq!(detail.company.as_deref(), Some("易方达基金"));
        assert_eq!(detail.manager.as_deref(), Some("萧楠"));
        assert_eq!(detail.fund_size, Some(dec!(18345123456.78)));
        assert_eq!(detail.management_fee.as_deref(), Some("1.20%"));
        assert_eq!(detail.risk_level.as_deref(), Some("4"));
        assert_eq!(detail.return_1m, Some(dec!(-2.35)));
        assert_eq!(detail.return_1y.unwrap().to_string(), "12.3456");
        assert_eq!(detail.return_3y, None);
        assert_eq!(detail.return_inception, Some(dec!(245.80)));
        assert_eq!(detail.rating, None);
    }

    #[test]
    fn test_fee_probe_order() {
        let base = |extra: Value| {
            let mut datas = json!({ "FCODE": "000914", "SHORTNAME": "中加纯债债券A", "FTYPE": "债券型" });
            for (k, v) in extra.as_object().unwrap() {
                datas[k] = v.clone();
            }
            parse_detail(&payload(datas)).unwrap().unwrap().management_fee
        };

        assert_eq!(base(json!({ "SOURCERATE": "0.80%", "rate": "0.30%" })).as_deref(), Some("0.30%"));
        assert_eq!(base(json!({ "SOURCERATE": "0.80%" })).as_deref(), Some("0.80%"));
        assert_eq!(base(json!({ "RATE": "", "SOURCERATE": "0.80%" })).as_deref(), Some("0.80%"));
        assert_eq!(base(json!({ "RATE": 0.3 })).as_deref(), Some("0.3"));
        assert_eq!(base(json!({})), None);
    }

    #[test]
    fn test_optional_fields_absent() {
        let json = payload(json!({ "FCODE": "000198", "SHORTNAME": "天弘余额宝货币", "FTYPE": "货币型", "ENDNAV": "" , "ESTABDATE": "--" }));
        let detail = parse_detail(&json).unwrap().unwrap();

        assert_eq!(detail.fund_size, None);
        assert_eq!(detail.establish_date, None);
        assert_eq!(detail.company, None);
        assert_eq!(detail.return_1m, None);
    }

    #[test]
    fn test_not_found() {
        assert!(parse_detail(&json!({ "Success": false, "Datas": null })).unwrap().is_none());
        assert!(parse_detail(&json!({ "Success": true, "Datas": null })).unwrap().is_none());
        assert!(parse_detail(&json!({ "Success": true })).unwrap().is_none());
        assert!(parse_detail(&json!({})).unwrap().is_none());
    }

    #[test]
    fn test_missing_identity_is_malformed() {
        let json = payload(json!({ "SHORTNAME": "x", "FTYPE": "y" }));
        assert!(matches!(parse_detail(&json), Err(FundError::PayloadError(_))));
    }
}
