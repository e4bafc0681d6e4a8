// ==========================================
// DAWA 地址导入 - 导入配置
// ==========================================
// 全局开关: JSON 严格字段校验（进程级，原子读写）
// 实例配置: 通道容量、数据服务地址
// 来源: 默认值 → 环境变量覆写
// ==========================================

use crate::api::DEFAULT_HOST;
use crate::importer::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

static JSON_STRICT_FIELD_CHECK: AtomicBool = AtomicBool::new(false);

/// 设置 JSON 严格字段校验（对之后开始的导入生效）
pub fn set_json_strict_field_check(enabled: bool) {
    JSON_STRICT_FIELD_CHECK.store(enabled, Ordering::SeqCst);
}

/// 当前 JSON 严格字段校验开关（默认 false）
pub fn json_strict_field_check() -> bool {
    JSON_STRICT_FIELD_CHECK.load(Ordering::SeqCst)
}

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    pub const JSON_STRICT: &str = "DAWA_JSON_STRICT";
    pub const CHANNEL_CAPACITY: &str = "DAWA_CHANNEL_CAPACITY";
    pub const HOST: &str = "DAWA_HOST";
}

// ==========================================
// ImportConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub json_strict_field_check: bool, // 未知字段是否报错
    pub channel_capacity: usize,       // 导入通道容量（条）
    pub host: String,                  // 查询服务地址
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            json_strict_field_check: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl ImportConfig {
    /// 从环境变量读取配置，未设置或无效的项使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(env_keys::JSON_STRICT) {
            match parse_flag(&raw) {
                Some(flag) => config.json_strict_field_check = flag,
                None => warn!(key = env_keys::JSON_STRICT, value = %raw, "无效的开关值，使用默认值"),
            }
        }

        if let Some(raw) = lookup(env_keys::CHANNEL_CAPACITY) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.channel_capacity = n,
                _ => warn!(key = env_keys::CHANNEL_CAPACITY, value = %raw, "无效的通道容量，使用默认值"),
            }
        }

        if let Some(raw) = lookup(env_keys::HOST) {
            let host = raw.trim().trim_end_matches('/');
            if !host.is_empty() {
                config.host = host.to_string();
            }
        }

        config
    }

    /// 将严格字段开关写入全局
    pub fn apply_global(&self) {
        set_json_strict_field_check(self.json_strict_field_check);
        info!(
            strict = self.json_strict_field_check,
            capacity = self.channel_capacity,
            host = %self.host,
            "导入配置已生效"
        );
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
