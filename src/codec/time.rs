// ==========================================
// DAWA 地址导入 - 本地时间戳编解码
// ==========================================
// 读取: 登记库本地格式 YYYY-MM-DDTHH:MM:SS.mmm（哥本哈根时区，无时区信息）
// 写出: RFC 3339（带偏移量）
// 反序列化: 本地格式 → RFC 3339，按顺序尝试
// ==========================================

use crate::codec::error::ParseError;
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 登记库所在时区，与进程本地时区无关
pub const REGISTRY_TIMEZONE: Tz = chrono_tz::Europe::Copenhagen;

/// 登记库导出文件使用的本地时间格式（小数点与 3 位毫秒均必需）
pub const REGISTRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3f";

// ==========================================
// TimeFormat - 时间解析格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    Registry, // 登记库本地格式
    Rfc3339,  // 通用机器可读格式
}

impl TimeFormat {
    /// 文本/JSON 反序列化时的尝试顺序，首个成功者胜出
    pub const FALLBACK_CHAIN: [TimeFormat; 2] = [TimeFormat::Registry, TimeFormat::Rfc3339];

    /// 按当前格式解析，结果统一换算到登记库时区
    pub fn parse(self, s: &str) -> Option<DateTime<Tz>> {
        match self {
            TimeFormat::Registry => NaiveDateTime::parse_from_str(s, REGISTRY_FORMAT)
                .ok()
                .map(in_registry_zone),
            TimeFormat::Rfc3339 => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.with_timezone(&REGISTRY_TIMEZONE)),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::Registry => write!(f, "REGISTRY"),
            TimeFormat::Rfc3339 => write!(f, "RFC3339"),
        }
    }
}

/// 把无时区的本地时间解释为登记库时区的时刻
///
/// - 夏令时回拨产生的重复时刻取较早者
/// - 夏令时跳变缺口内的时刻按跳变前的偏移量解释
fn in_registry_zone(naive: NaiveDateTime) -> DateTime<Tz> {
    match REGISTRY_TIMEZONE.from_local_datetime(&naive) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let utc = REGISTRY_TIMEZONE
                .offset_from_local_datetime(&(naive - chrono::Duration::hours(1)))
                .earliest()
                .map(|offset| {
                    naive - chrono::Duration::seconds(i64::from(offset.fix().local_minus_utc()))
                })
                .unwrap_or(naive);
            REGISTRY_TIMEZONE.from_utc_datetime(&utc)
        }
    }
}

// ==========================================
// LocalTime - 登记库时间戳
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime(DateTime<Tz>);

impl LocalTime {
    /// 严格按登记库本地格式解析
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        TimeFormat::Registry
            .parse(s)
            .map(LocalTime)
            .ok_or_else(|| ParseError::Timestamp {
                value: s.to_string(),
            })
    }

    /// 解析可信的字面量（测试、样例数据），失败时 panic
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(t) => t,
            Err(e) => panic!("time: Parse({:?}): {}", s, e),
        }
    }

    /// 按 `TimeFormat::FALLBACK_CHAIN` 依次尝试
    pub fn parse_with_fallback(s: &str) -> Result<Self, ParseError> {
        TimeFormat::FALLBACK_CHAIN
            .iter()
            .find_map(|format| format.parse(s))
            .map(LocalTime)
            .ok_or_else(|| ParseError::Timestamp {
                value: s.to_string(),
            })
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    /// Unix 时间戳（秒）
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl From<DateTime<Tz>> for LocalTime {
    fn from(t: DateTime<Tz>) -> Self {
        LocalTime(t.with_timezone(&REGISTRY_TIMEZONE))
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }
}

impl FromStr for LocalTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_fallback(s)
    }
}

impl Serialize for LocalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_with_fallback(&s).map_err(de::Error::custom)
    }
}
