// ==========================================
// DAWA 地址导入 - URL 编解码
// ==========================================
// 绝对 URL 由 url crate 解析；相对引用仅做语法校验并保留原文
// ==========================================

use crate::codec::error::ParseError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// 校验相对引用时使用的占位基址
const RELATIVE_BASE: &str = "http://relative.invalid/";

fn relative_base() -> &'static url::Url {
    static BASE: OnceLock<url::Url> = OnceLock::new();
    BASE.get_or_init(|| url::Url::parse(RELATIVE_BASE).expect("占位基址必须合法"))
}

// ==========================================
// Url - 资源链接
// ==========================================
/// 绝对地址按 WHATWG 规则规范化后保存（如 `http://dawa.aws.dk` 变为
/// `http://dawa.aws.dk/`），`as_str`/序列化输出规范形式；相对引用原样保存。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Url {
    Absolute(url::Url),
    Relative(String),
}

impl Default for Url {
    /// 空的相对引用（源数据未给出 href 时）
    fn default() -> Self {
        Url::Relative(String::new())
    }
}

impl Url {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match url::Url::parse(s) {
            Ok(u) => Ok(Url::Absolute(u)),
            Err(url::ParseError::RelativeUrlWithoutBase) => relative_base()
                .join(s)
                .map(|_| Url::Relative(s.to_string()))
                .map_err(|e| ParseError::Url {
                    value: s.to_string(),
                    message: e.to_string(),
                }),
            Err(e) => Err(ParseError::Url {
                value: s.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// 解析可信的字面量，失败时 panic
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(u) => u,
            Err(e) => panic!("url: Parse({:?}): {}", s, e),
        }
    }

    /// 规范字符串形式
    pub fn as_str(&self) -> &str {
        match self {
            Url::Absolute(u) => u.as_str(),
            Url::Relative(s) => s,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Url::Absolute(_))
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Url {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Url {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
