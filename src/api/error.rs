// ==========================================
// DAWA 地址导入 - 查询错误类型
// ==========================================
// 服务端错误体: {"type": "...", "title": "...", "details": [...]}
// ==========================================

use crate::importer::ImportError;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// 服务端返回的结构化错误
    #[error("{kind}: {title}. 详情: {details:?}. 请求地址: {url}")]
    Api {
        kind: String,
        title: String,
        details: Vec<Value>,
        url: String,
    },

    #[error("请求失败 {url}: {message}")]
    Failed { url: String, message: String },

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    details: Option<Vec<Value>>,
}

impl RequestError {
    /// 由状态码 ≥ 400 的响应体构造错误
    pub fn from_body(url: &str, status: u16, body: &[u8]) -> Self {
        let failed = |message: String| RequestError::Failed {
            url: url.to_string(),
            message,
        };

        if body.is_empty() {
            return failed(format!("HTTP {}，响应体为空", status));
        }
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) if !parsed.kind.is_empty() => RequestError::Api {
                kind: parsed.kind,
                title: parsed.title,
                details: parsed.details.unwrap_or_default(),
                url: url.to_string(),
            },
            Ok(_) => failed(format!("HTTP {}", status)),
            Err(e) => failed(format!("HTTP {}，无法解析错误体: {}", status, e)),
        }
    }

    /// 出错的请求地址（导入错误无地址）
    pub fn url(&self) -> Option<&str> {
        match self {
            RequestError::Api { url, .. } | RequestError::Failed { url, .. } => Some(url),
            RequestError::Import(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://dawa.aws.dk/adresser?postnr=abc";

    #[test]
    fn test_structured_error_body() {
        let body = br#"{"type":"QueryParameterFormatError","title":"One or more query parameters was ill-formed.","details":[["postnr","String does not match pattern"]]}"#;
        let err = RequestError::from_body(URL, 400, body);
        match &err {
            RequestError::Api {
                kind,
                title,
                details,
                url,
            } => {
                assert_eq!(kind, "QueryParameterFormatError");
                assert!(title.starts_with("One or more"));
                assert_eq!(details.len(), 1);
                assert_eq!(url, URL);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.url(), Some(URL));
    }

    #[test]
    fn test_empty_body_is_generic_failure() {
        let err = RequestError::from_body(URL, 500, b"");
        assert!(matches!(err, RequestError::Failed { .. }));
    }

    #[test]
    fn test_missing_type_is_generic_failure() {
        let err = RequestError::from_body(URL, 404, br#"{"title":"not found"}"#);
        assert!(matches!(err, RequestError::Failed { .. }));
    }

    #[test]
    fn test_unparseable_body_is_generic_failure() {
        let err = RequestError::from_body(URL, 502, b"<html>Bad Gateway</html>");
        assert!(matches!(err, RequestError::Failed { .. }));
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_null_details() {
        let err = RequestError::from_body(URL, 400, br#"{"type":"X","title":"Y","details":null}"#);
        assert!(matches!(err, RequestError::Api { ref details, .. } if details.is_empty()));
    }
}
