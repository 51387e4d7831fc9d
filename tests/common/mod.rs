#![allow(dead_code)]

use async_trait::async_trait;
use fund_assistant::errors::{FundError, Result};
use fund_assistant::scrapers::tiantian::{ESTIMATE_BASE_URL, HISTORY_URL, MOBILE_BASE_URL};
use fund_assistant::scrapers::{HttpResponse, Transport};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// 记录下来的一次请求
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

enum Reply {
    Response(HttpResponse),
    Fail(String),
}

/// 按 URL 和基金代码预置响应的传输层，未预置的请求返回 404
#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<(String, String), Reply>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 共享的请求记录，传输层移交给抓取器后仍可检查
    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn respond(mut self, url: String, code: &str, reply: Reply) -> Self {
        self.routes.insert((url, code.to_string()), reply);
        self
    }

    pub fn estimate(self, code: &str, status: u16, body: &str) -> Self {
        let url = format!("{}/{}.js", ESTIMATE_BASE_URL, code);
        self.respond(url, "", Reply::Response(text_response(status, body)))
    }

    pub fn estimate_bytes(self, code: &str, content_type: &str, body: Vec<u8>) -> Self {
        let url = format!("{}/{}.js", ESTIMATE_BASE_URL, code);
        let response = HttpResponse {
            status: 200,
            content_type: Some(content_type.to_string()),
            body,
        };
        self.respond(url, "", Reply::Response(response))
    }

    pub fn history(self, code: &str, body: &str) -> Self {
        self.respond(HISTORY_URL.to_string(), code, Reply::Response(text_response(200, body)))
    }

    pub fn mobile(self, endpoint: &str, code: &str, status: u16, body: &str) -> Self {
        let url = format!("{}/{}", MOBILE_BASE_URL, endpoint);
        self.respond(url, code, Reply::Response(text_response(status, body)))
    }

    pub fn mobile_failure(self, endpoint: &str, code: &str, reason: &str) -> Self {
        let url = format!("{}/{}", MOBILE_BASE_URL, endpoint);
        self.respond(url, code, Reply::Fail(reason.to_string()))
    }
}

fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("text/plain; charset=utf-8".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let call = Call {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        };
        let code = call.param("FCODE").or_else(|| call.param("code")).unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(call);

        match self.routes.get(&(url.to_string(), code)) {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Fail(reason)) => Err(FundError::IoError(io::Error::new(io::ErrorKind::TimedOut, reason.clone()))),
            None => Ok(HttpResponse {
                status: 404,
                content_type: None,
                body: Vec::new(),
            }),
        }
    }
}

pub const ESTIMATE_110022: &str = r#"jsonpgz({"fundcode":"110022","name":"易方达消费行业股票","jzrq":"2024-01-29","dwjz":"3.4120","gsz":"3.4567","gszzl":"1.31","gztime":"2024-01-30 15:00"});"#;

pub fn detail_body(code: &str, name: &str) -> String {
    format!(
        r#"{{"Datas":{{"FCODE":"{}","SHORTNAME":"{}","FTYPE":"股票型","ESTABDATE":"2010-08-20","JJGS":"易方达基金","JJJL":"萧楠","ENDNAV":"18345000000","RATE":"1.20%","SYL_1N":"12.34","SYL_3N":"--"}},"ErrCode":0,"Success":true,"TotalCount":1}}"#,
        code, name
    )
}

pub const NOT_FOUND_BODY: &str = r#"{"Datas":null,"ErrCode":0,"Success":false,"TotalCount":0}"#;

pub const HOLDINGS_161725: &str = r#"{"Datas":{"fundStocks":[{"GPDM":"600519","GPJC":"贵州茅台","JZBL":"15.12"},{"GPDM":"000858","GPJC":"五粮液","JZBL":"14.80"},{"GPDM":"000568","GPJC":"泸州老窖","JZBL":""}]},"ErrCode":0,"Success":true,"Expansion":"2025-12-31"}"#;

pub fn history_body(rows: &[(&str, &str, &str, &str)], records: u32) -> String {
    let header = "<thead><tr><th class='first'>净值日期</th><th>单位净值</th><th>累计净值</th><th>日增长率</th><th>申购状态</th><th>赎回状态</th><th class='tor last'>分红送配</th></tr></thead>";
    let rows: String = rows
        .iter()
        .map(|(date, nav, acc, change)| {
            format!(
                "<tr><td>{}</td><td class='tor bold'>{}</td><td class='tor bold'>{}</td><td class='tor bold red'>{}</td><td>开放申购</td><td>开放赎回</td><td class='red unbold'></td></tr>",
                date, nav, acc, change
            )
        })
        .collect();
    format!(
        "var apidata={{ content:\"<table class='w782 comm lsjz'>{}<tbody>{}</tbody></table>\",records:{},pages:1,curpage:1}};",
        header, rows, records
    )
}
