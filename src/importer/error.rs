// ==========================================
// DAWA 地址导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 可克隆: 迭代器锁存终止错误后需重复返回
// ==========================================

use crate::codec::ParseError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.json）")]
    UnsupportedFormat(String),

    #[error("输入流读取失败: {0}")]
    StreamRead(String),

    // ===== CSV 错误 =====
    #[error("CSV 表头读取失败: {0}")]
    HeaderRead(String),

    #[error("CSV 解析失败 (行 {row}): {message}")]
    CsvParse { row: u64, message: String },

    // ===== 字段错误 =====
    #[error("字段解析失败 (行 {row}, 字段 {field}): {source}")]
    ScalarParse {
        row: u64,
        field: String,
        source: ParseError,
    },

    // ===== JSON 错误 =====
    #[error("JSON 解码失败 (第 {index} 个元素): {message}")]
    JsonDecode { index: usize, message: String },

    #[error("未知字段 (第 {index} 个元素): {field}")]
    Schema { index: usize, field: String },

    // ===== 生命周期 =====
    #[error("导入已取消")]
    Cancelled,

    #[error("导入线程异常退出")]
    WorkerPanicked,

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ImportError {
    /// 是否为字段级解析错误（标识符/时间戳/状态/URL）
    pub fn is_scalar_parse(&self) -> bool {
        matches!(self, ImportError::ScalarParse { .. })
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::StreamRead(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map(|p| p.line()).unwrap_or(0);
        match err.kind() {
            csv::ErrorKind::Io(e) => ImportError::StreamRead(e.to_string()),
            _ => ImportError::CsvParse {
                row,
                message: err.to_string(),
            },
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
