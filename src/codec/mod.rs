// ==========================================
// DAWA 地址导入 - 标量编解码层
// ==========================================
// 职责: 时间戳、URL、标识符的解析/格式化/序列化
// 依赖: 无（最底层）
// ==========================================

pub mod error;
pub mod time;
pub mod url;
pub mod uuid;

pub use self::error::ParseError;
pub use self::time::{LocalTime, TimeFormat, REGISTRY_FORMAT, REGISTRY_TIMEZONE};
pub use self::url::Url;
pub use self::uuid::Identifier;
