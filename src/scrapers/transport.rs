use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::Config;
use crate::errors::{FundError, Result};
use crate::util::decode_body;

/// 原始 HTTP 响应
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 按编码恢复规则解码后的文本
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// HTTP 传输层
///
/// 只负责发出 GET 请求并返回状态码和响应体，
/// 状态码的判断和响应解析由调用方处理。
#[async_trait]
pub trait Transport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// 基于 reqwest 的传输层实现
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(10))
            .build()
            .map_err(FundError::RequestError)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
