//! 历史净值解析
//!
//! 响应是一段 JS 赋值语句，净值表以 HTML 字符串形式放在 `content` 中：
//!
//! ```text
//! var apidata={ content:"<table>...</table>",records:3736,pages:374,curpage:1};
//! ```
//!
//! 这里不引入 HTML 解析器，只按固定的三种标签（`<tr>`、`<td>`、任意标签）
//! 切分文本。接口格式固定，`",records` 是 `content` 之后紧跟的键，
//! 作为内容结束的分隔符。

use log::debug;

use crate::errors::Result;
use crate::models::{HistoricalNav, HistoryPage};
use crate::util::{clean_cell, date_from_str, decimal_from_str, NO_CHANGE_PLACEHOLDER};

const CONTENT_START: &str = "content:\"";
const CONTENT_END: &str = "\",records";
const RECORDS_KEY: &str = "records:";

/// 每行至少需要的单元格数：日期、单位净值、累计净值、日增长率
const MIN_CELLS: usize = 4;

/// 解析历史净值响应
///
/// 找不到 `content` 时返回 `Ok(None)`。表头行被丢弃，
/// 格式不正确的行被跳过，其余行保持原有顺序。
pub fn parse_history(body: &str) -> Result<Option<HistoryPage>> {
    let Some(html) = extract_content(body) else {
        debug!("No content block in history body");
        return Ok(None);
    };

    let mut navs = Vec::new();
    for (index, row) in table_rows(html).into_iter().enumerate().skip(1) {
        let cells = table_cells(row);
        if cells.len() < MIN_CELLS {
            debug!("Skipping history row {} with {} cells", index, cells.len());
            continue;
        }
        match parse_row(&cells) {
            Some(nav) => navs.push(nav),
            None => debug!("Skipping malformed history row {}: {:?}", index, cells),
        }
    }

    Ok(Some(HistoryPage {
        navs,
        total_records: extract_records(body),
    }))
}

fn parse_row(cells: &[String]) -> Option<HistoricalNav> {
    let date = date_from_str(&cells[0])?;
    let nav = decimal_from_str(&cells[1])?;
    let accumulated_nav = decimal_from_str(&cells[2])?;

    let change = cells[3].as_str();
    let daily_change = if change == NO_CHANGE_PLACEHOLDER {
        None
    } else {
        decimal_from_str(change.trim_end_matches('%'))
    };

    Some(HistoricalNav {
        date,
        nav,
        accumulated_nav,
        daily_change,
    })
}

/// `content:"` 与 `",records` 之间的文本
fn extract_content(body: &str) -> Option<&str> {
    let start = body.find(CONTENT_START)? + CONTENT_START.len();
    let len = body[start..].find(CONTENT_END)?;
    Some(&body[start..start + len])
}

fn extract_records(body: &str) -> Option<u32> {
    let start = body.find(CONTENT_END)? + CONTENT_END.len() - "records".len();
    let digits: String = body[start..]
        .strip_prefix(RECORDS_KEY)?
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// 所有 `<tr>...</tr>` 的内部文本
fn table_rows(html: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut rest = html;
    while let Some(open) = rest.find("<tr>") {
        let inner = &rest[open + "<tr>".len()..];
        let Some(close) = inner.find("</tr>") else {
            break;
        };
        rows.push(&inner[..close]);
        rest = &inner[close + "</tr>".len()..];
    }
    rows
}

/// 一行内所有 `<td ...>...</td>` 的文本，嵌套标签已去除
fn table_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut rest = row;
    while let Some(open) = find_td_open(rest) {
        let after_name = &rest[open + "<td".len()..];
        let Some(tag_end) = after_name.find('>') else {
            break;
        };
        let inner = &after_name[tag_end + 1..];
        let Some(close) = inner.find("</td>") else {
            break;
        };
        cells.push(clean_cell(&inner[..close]));
        rest = &inner[close + "</td>".len()..];
    }
    cells
}

/// 找到 `<td>` 或 `<td ` 开头的标签，避免把其他以 td 开头的标签算进来
fn find_td_open(text: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find("<td") {
        let at = offset + pos;
        match text[at + "<td".len()..].chars().next() {
            Some('>') | Some(' ') | Some('\t') | Some('\n') | Some('\r') => return Some(at),
            _ => offset = at + "<td".len(),
        }
    }
    None
}
