// ==========================================
// DAWA 地址导入 - 核心库
// ==========================================
// 数据源: 丹麦地址登记库（DAWA）批量导出 / 查询接口
// 输入格式: CSV（扁平列）、JSON（嵌套对象数组）
// 输出: 按输入顺序逐条产出的 Address 记录流
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 标量编解码 - 时间戳 / URL / 标识符
pub mod codec;

// 领域层 - 地址实体与类型
pub mod domain;

// 导入层 - CSV / JSON 流式导入
pub mod importer;

// 配置层 - 导入行为配置
pub mod config;

// 查询层 - 数据服务请求
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 标量
pub use codec::{Identifier, LocalTime, ParseError, Url};

// 领域实体
pub use domain::{AccessAddress, AccessPoint, Address, AddressStatus, History, Zone};

// 导入
pub use importer::{
    import_addresses_csv, import_addresses_json, import_file, AddressImporter, AddressIter,
    CancelHandle, CsvImporter, ImportError, ImportResult, JsonImporter,
};

// 配置
pub use config::{json_strict_field_check, set_json_strict_field_check, ImportConfig};

// 查询
pub use api::{Query, RequestError};

// ==========================================
// 常量定义
// ==========================================

// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
