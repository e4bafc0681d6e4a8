// ==========================================
// DAWA 地址导入 - 标识符编解码
// ==========================================
// 128 位 UUID；文本/JSON 均使用规范文本形式（非嵌套对象）
// ==========================================

use crate::codec::error::ParseError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// 支持带连字符、无连字符、花括号及 urn:uuid: 形式
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Uuid::parse_str(s)
            .map(Identifier)
            .map_err(|e| ParseError::Identifier {
                value: s.to_string(),
                message: e.to_string(),
            })
    }

    /// 解析可信的字面量，失败时 panic
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(id) => id,
            Err(e) => panic!("uuid: Parse({:?}): {}", s, e),
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Identifier {
    fn from(u: Uuid) -> Self {
        Identifier(u)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Identifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
