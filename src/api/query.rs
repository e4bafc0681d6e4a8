// ==========================================
// DAWA 地址导入 - 查询构造器
// ==========================================
// URL: host + path + ?key=value&key=v1|v2&key=
// 编码: application/x-www-form-urlencoded（空格 → +）
// ==========================================

use crate::api::error::RequestError;
use crate::importer::{AddressImporter, AddressIter, CsvImporter, JsonImporter};
use reqwest::blocking::{Client, Response};
use tracing::{debug, info, instrument};
use url::form_urlencoded::byte_serialize;

/// 默认数据服务地址
pub const DEFAULT_HOST: &str = "http://dawa.aws.dk";

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextParam {
    name: String,
    values: Vec<String>,
    multi: bool,
}

impl TextParam {
    fn encode(&self) -> String {
        let take = if self.multi { self.values.len() } else { 1 };
        let values: Vec<String> = self.values.iter().take(take).map(|v| escape(v)).collect();
        format!("{}={}", escape(&self.name), values.join("|"))
    }
}

fn escape(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    host: String,
    path: String,
    params: Vec<TextParam>,
}

impl Query {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// 单值参数（传入未编码的原值）
    pub fn add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(TextParam {
            name: key.into(),
            values: vec![value.into()],
            multi: false,
        });
        self
    }

    /// 多值参数，以 | 连接
    pub fn add_multi<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.push(TextParam {
            name: key.into(),
            values: values.into_iter().map(Into::into).collect(),
            multi: true,
        });
        self
    }

    /// 空值参数（key=）
    pub fn add_empty(mut self, key: impl Into<String>) -> Self {
        self.params.push(TextParam {
            name: key.into(),
            values: Vec::new(),
            multi: false,
        });
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn on_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn url(&self) -> String {
        let mut out = format!("{}{}", self.host, self.path);
        if self.params.is_empty() {
            return out;
        }
        let encoded: Vec<String> = self.params.iter().map(TextParam::encode).collect();
        out.push('?');
        out.push_str(&encoded.join("&"));
        out
    }

    /// 发起 GET 请求
    ///
    /// # 返回
    /// - Ok(Response): 状态码 < 400，响应体可直接交给导入器
    /// - Err(RequestError::Api): 服务端结构化错误
    /// - Err(RequestError::Failed): 传输失败或无法解析的错误响应
    #[instrument(skip(self), fields(url = %self.url()))]
    pub fn request(&self) -> Result<Response, RequestError> {
        let url = self.url();
        let failed = |message: String| RequestError::Failed {
            url: url.clone(),
            message,
        };

        let response = Client::new()
            .get(&url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(status = status, "收到响应");
        if status < 400 {
            return Ok(response);
        }

        let body = response.bytes().map_err(|e| failed(e.to_string()))?;
        Err(RequestError::from_body(&url, status, &body))
    }

    /// 请求并以 CSV 导入响应体（查询需带 format=csv）
    pub fn import_csv(&self) -> Result<AddressIter, RequestError> {
        self.import_with(&CsvImporter::new())
    }

    /// 请求并以 JSON 导入响应体
    pub fn import_json(&self) -> Result<AddressIter, RequestError> {
        self.import_with(&JsonImporter::new())
    }

    pub fn import_with<I: AddressImporter>(&self, importer: &I) -> Result<AddressIter, RequestError> {
        let response = self.request()?;
        info!(url = %self.url(), "开始导入查询结果");
        Ok(importer.import(response)?)
    }
}
