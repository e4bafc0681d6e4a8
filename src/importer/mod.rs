// ==========================================
// DAWA 地址导入 - 导入层
// ==========================================
// 职责: 将 CSV / JSON 字节流解码为 Address 记录流
// 结构: 导入器（后台线程）→ 有界通道 → AddressIter（消费端）
// ==========================================

// 模块声明
pub mod csv_importer;
pub mod error;
pub mod field_mapper;
pub mod file_import;
pub mod importer_trait;
pub mod iter;
pub mod json_importer;
pub mod schema;

// 重导出核心类型
pub use csv_importer::CsvImporter;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_import::{import_file, import_file_with};
pub use iter::{AddressIter, CancelHandle, Records, DEFAULT_CHANNEL_CAPACITY};
pub use json_importer::JsonImporter;
pub use schema::find_unknown_field;

// 重导出 Trait 接口
pub use importer_trait::{AddressImporter, RecordMapper};

use std::io::Read;

/// 以默认配置导入 CSV 流
pub fn import_addresses_csv<R: Read + Send + 'static>(input: R) -> ImportResult<AddressIter> {
    CsvImporter::new().import(input)
}

/// 以默认配置导入 JSON 流（严格模式取全局开关）
pub fn import_addresses_json<R: Read + Send + 'static>(input: R) -> ImportResult<AddressIter> {
    JsonImporter::new().import(input)
}
