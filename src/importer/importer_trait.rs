// ==========================================
// DAWA 地址导入 - 导入接口 Trait
// ==========================================
// 职责: 定义导入器与记录映射器接口（不包含实现）
// ==========================================

use crate::domain::Address;
use crate::importer::error::ImportResult;
use crate::importer::iter::AddressIter;
use std::collections::HashMap;
use std::io::Read;

// ==========================================
// AddressImporter Trait
// ==========================================
// 实现者: CsvImporter, JsonImporter
pub trait AddressImporter: Send + Sync {
    /// 从输入流导入地址数据
    ///
    /// # 参数
    /// - input: 可读字节流（文件、HTTP 响应体等）
    ///
    /// # 返回
    /// - Ok(AddressIter): 绑定到后台解码线程的迭代器
    /// - Err: 同步阶段失败（如 CSV 表头无法读取）
    fn import<R>(&self, input: R) -> ImportResult<AddressIter>
    where
        R: Read + Send + 'static;
}

// ==========================================
// RecordMapper Trait
// ==========================================
// 实现者: FieldMapper
pub trait RecordMapper: Send + Sync {
    /// 将一行 列名→值 映射为 Address
    ///
    /// # 参数
    /// - row: 原始行记录（HashMap<列名, 值>）
    /// - row_number: 行号（用于错误定位）
    ///
    /// # 返回
    /// - Ok(Address): 完整记录
    /// - Err: 致命字段解析失败
    fn map_to_address(&self, row: &HashMap<String, String>, row_number: u64)
        -> ImportResult<Address>;
}
