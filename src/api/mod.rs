// ==========================================
// DAWA 地址导入 - 查询层
// ==========================================
// 职责: 构造数据服务查询 URL 并获取响应流
// ==========================================

pub mod error;
pub mod query;

pub use error::RequestError;
pub use query::{Query, DEFAULT_HOST};
