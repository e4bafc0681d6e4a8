// ==========================================
// DAWA 地址导入 - 标量编解码错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 标量字段解析错误
///
/// 可克隆：导入迭代器需要把同一个终止错误重复返回给调用方。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("时间格式错误: 期望 YYYY-MM-DDTHH:MM:SS.mmm 或 RFC 3339，实际 {value:?}")]
    Timestamp { value: String },

    #[error("URL 格式错误 ({value:?}): {message}")]
    Url { value: String, message: String },

    #[error("UUID 格式错误 ({value:?}): {message}")]
    Identifier { value: String, message: String },

    #[error("整数格式错误: {value:?}")]
    Integer { value: String },
}
