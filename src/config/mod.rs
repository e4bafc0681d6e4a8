// ==========================================
// DAWA 地址导入 - 配置层
// ==========================================
// 职责: 导入行为配置（严格字段校验、通道容量、服务地址）
// ==========================================

pub mod import_config;

pub use import_config::{
    env_keys, json_strict_field_check, set_json_strict_field_check, ImportConfig,
};
