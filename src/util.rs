use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::{Encoding, GBK, UTF_8};
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// 天天基金接口中“无数据”的占位符
pub const MISSING_PLACEHOLDER: &str = "--";
/// 历史净值表中“无日增长率”的占位符
pub const NO_CHANGE_PLACEHOLDER: &str = "---";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// 文本转换工具

/// 解析十进制数，空串和占位符返回 None
pub fn decimal_from_str(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() || text == MISSING_PLACEHOLDER || text == NO_CHANGE_PLACEHOLDER {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| debug!("Unparseable decimal {:?}: {}", text, e))
        .ok()
}

pub fn date_from_str(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() || text == MISSING_PLACEHOLDER {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| debug!("Unparseable date {:?}: {}", text, e))
        .ok()
}

pub fn datetime_from_str(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() || text == MISSING_PLACEHOLDER {
        return None;
    }
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map_err(|e| debug!("Unparseable timestamp {:?}: {}", text, e))
        .ok()
}

// JSON 字段转换工具
//
// 接口返回的数值有时是字符串有时是数字，统一在这里处理。

pub fn to_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::String(s) => decimal_from_str(s),
        // 通过文本中转，避免经过 f64 丢失精度
        Value::Number(n) => decimal_from_str(&n.to_string()),
        _ => None,
    }
}

pub fn to_date(value: Option<&Value>) -> Option<NaiveDate> {
    value?.as_str().and_then(date_from_str)
}

pub fn to_datetime(value: Option<&Value>) -> Option<NaiveDateTime> {
    value?.as_str().and_then(datetime_from_str)
}

/// 取文本字段，null 和空串视为缺失
pub fn to_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 按给定顺序探测多个候选字段，返回第一个有值的字段
pub fn first_present<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

// HTML 工具

/// 去掉所有 `<...>` 标签，只保留文本
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}

pub fn clean_cell(html: &str) -> String {
    strip_tags(html).trim().to_string()
}

// 编码恢复

/// 将响应体解码为文本
///
/// 优先按 UTF-8 解码；否则使用 Content-Type 中声明的字符集，
/// 都不可用时按 GBK 处理（部分东方财富页面仍使用 GBK）。
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.trim_start_matches('\u{feff}').to_string();
    }

    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .filter(|encoding| *encoding != UTF_8)
        .unwrap_or(GBK);

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!("Body decoded with replacement characters using {}", actual.name());
    }
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"').to_string())
        })
}

/// 中国时区的今天
pub fn today_in_china() -> NaiveDate {
    chrono::Utc::now().with_timezone(&chrono_tz::Asia::Shanghai).date_naive()
}
