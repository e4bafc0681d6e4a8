// ==========================================
// DAWA 地址导入 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 地址状态 (Address Status)
// ==========================================
// 序列化格式: 裸整数（与登记库一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum AddressStatus {
    Current,     // 1 = gældende
    Provisional, // 3 = foreløbig
    Other(i32),  // 登记库未来可能新增的状态码，原样保留
}

impl AddressStatus {
    pub fn code(self) -> i32 {
        match self {
            AddressStatus::Current => 1,
            AddressStatus::Provisional => 3,
            AddressStatus::Other(code) => code,
        }
    }
}

impl Default for AddressStatus {
    /// 容错字段解析失败时的零值
    fn default() -> Self {
        AddressStatus::Other(0)
    }
}

impl From<i32> for AddressStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => AddressStatus::Current,
            3 => AddressStatus::Provisional,
            other => AddressStatus::Other(other),
        }
    }
}

impl From<AddressStatus> for i32 {
    fn from(status: AddressStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for AddressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressStatus::Current => write!(f, "CURRENT"),
            AddressStatus::Provisional => write!(f, "PROVISIONAL"),
            AddressStatus::Other(code) => write!(f, "OTHER({})", code),
        }
    }
}

// ==========================================
// 区域分类 (Zone)
// ==========================================
// 原始文本保存在 AccessAddress::zone，此处仅提供类型化视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Landzone,         // 乡村
    Byzone,           // 城区
    Sommerhusomraade, // 度假屋区
}

impl Zone {
    /// 识别登记库的区域文本，未知文本返回 None
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Landzone" => Some(Zone::Landzone),
            "Byzone" => Some(Zone::Byzone),
            "Sommerhusområde" | "Sommerhusomraade" => Some(Zone::Sommerhusomraade),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Landzone => "Landzone",
            Zone::Byzone => "Byzone",
            Zone::Sommerhusomraade => "Sommerhusområde",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
