// ==========================================
// DAWA 地址导入 - 地址领域模型
// ==========================================
// JSON 字段名沿用登记库的丹麦语键名，Rust 字段名使用英文
// 所有字段始终序列化（严格字段校验依赖完整的键集合）
// ==========================================

use crate::codec::{Identifier, LocalTime, Url};
use crate::domain::types::{AddressStatus, Zone};
use serde::{Deserialize, Deserializer, Serialize};

/// KVH 前缀长度（KVHX 的前 12 个字符）
pub const KVH_LEN: usize = 12;

/// JSON null 按零值处理（空字符串 / 0 / 空 URL）
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 由 KVHX 派生 KVH：取前 12 个字符，不足 12 个字符时取全部
pub fn derive_kvh(kvhx: &str) -> String {
    kvhx.chars().take(KVH_LEN).collect()
}

// ==========================================
// Address - 地址（顶层记录）
// ==========================================
// 用途: 导入迭代器逐条产出，调用方独占所有权
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    // ===== 主键 =====
    pub id: Identifier,        // 地址唯一标识
    pub status: AddressStatus, // 1 = 现行, 3 = 临时

    // ===== 描述 =====
    #[serde(rename = "adressebetegnelse", default, deserialize_with = "null_as_default")]
    pub designation: String, // 地址完整描述
    #[serde(rename = "etage", default, deserialize_with = "null_as_default")]
    pub floor: String, // 楼层: 1-99, st, kl, kl2..kl9
    #[serde(rename = "dør", default, deserialize_with = "null_as_default")]
    pub door: String, // 门牌: 1-9999、字母及 / -
    #[serde(default, deserialize_with = "null_as_default")]
    pub kvhx: String, // 复合键（市镇+街道+门牌号+楼层+门）
    #[serde(default, deserialize_with = "null_as_default")]
    pub href: Url, // 资源链接

    // ===== 时间信息 =====
    #[serde(rename = "historik")]
    pub history: History,

    // ===== 入口地址 =====
    #[serde(rename = "adgangsadresse")]
    pub access_address: AccessAddress,
}

// ==========================================
// History - 创建/修改时间对
// ==========================================
// 两个时间戳要么都合法，要么整条记录解码失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    #[serde(rename = "oprettet")]
    pub created: LocalTime,
    #[serde(rename = "ændret")]
    pub changed: LocalTime,
}

// ==========================================
// AccessAddress - 入口地址
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessAddress {
    // ===== 标识 =====
    #[serde(default, deserialize_with = "null_as_default")]
    pub href: Url,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String, // 不透明文本
    #[serde(default, deserialize_with = "null_as_default")]
    pub kvh: String, // KVHX 前 12 个字符
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AddressStatus,

    // ===== 街道与门牌 =====
    #[serde(rename = "vejstykke", default, deserialize_with = "null_as_default")]
    pub street: StreetRef,
    #[serde(rename = "husnr", default, deserialize_with = "null_as_default")]
    pub house_number: String,
    #[serde(rename = "supplerendebynavn", default, deserialize_with = "null_as_default")]
    pub supplementary_city: String,
    #[serde(rename = "postnummer", default, deserialize_with = "null_as_default")]
    pub postal_code: PostalCodeRef,
    #[serde(rename = "kommune", default, deserialize_with = "null_as_default")]
    pub municipality: MunicipalityRef,

    // ===== 地籍 =====
    #[serde(rename = "ejerlav", default, deserialize_with = "null_as_default")]
    pub cadastral_district: CadastralDistrict,
    #[serde(rename = "esrejendomsnr", default, deserialize_with = "null_as_default")]
    pub esr_property_number: String, // 税务评估编号
    #[serde(rename = "matrikelnr", default, deserialize_with = "null_as_default")]
    pub cadastral_number: String, // 地块编号

    // ===== 时间信息 =====
    #[serde(rename = "historik")]
    pub history: History,

    // ===== 位置 =====
    #[serde(rename = "adgangspunkt")]
    pub access_point: AccessPoint,
    #[serde(rename = "DDKN", default, deserialize_with = "null_as_default")]
    pub grid: GridCells,

    // ===== 行政区划 =====
    #[serde(rename = "sogn", default, deserialize_with = "null_as_default")]
    pub parish: ParishRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: RegionRef,
    #[serde(rename = "retskreds", default, deserialize_with = "null_as_default")]
    pub court_district: CourtDistrictRef,
    #[serde(rename = "politikreds", default, deserialize_with = "null_as_default")]
    pub police_district: PoliceDistrictRef,
    #[serde(rename = "opstillingskreds", default, deserialize_with = "null_as_default")]
    pub electoral_district: ElectoralDistrictRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zone: String, // Landzone / Byzone / Sommerhusområde
}

impl AccessAddress {
    pub fn zone_kind(&self) -> Option<Zone> {
        Zone::from_label(&self.zone)
    }
}

// ==========================================
// AccessPoint - 入口点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    #[serde(rename = "koordinater", default, deserialize_with = "null_as_default")]
    pub coordinates: [f64; 2], // [经度, 纬度]（WGS-84）
    #[serde(rename = "nøjagtighed", default, deserialize_with = "null_as_default")]
    pub accuracy: String, // 精度等级 A/B/U
    #[serde(rename = "kilde", default, deserialize_with = "null_as_default")]
    pub source: i32, // 来源方式代码
    #[serde(rename = "tekniskstandard", default, deserialize_with = "null_as_default")]
    pub technical_standard: String,
    #[serde(rename = "tekstretning", default, deserialize_with = "null_as_default")]
    pub text_orientation: f64, // 文字方向（度）
    #[serde(rename = "ændret")]
    pub changed: LocalTime,
}

impl AccessPoint {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

// ==========================================
// 引用类型
// ==========================================
// 代码一律按不透明字符串处理（即便看起来是数字）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub href: Url,
    #[serde(rename = "kode", default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "navn", default, deserialize_with = "null_as_default")]
    pub name: String,
}

pub type StreetRef = Reference;
pub type MunicipalityRef = Reference;
pub type RegionRef = Reference;
pub type ParishRef = Reference;
pub type PoliceDistrictRef = Reference;
pub type CourtDistrictRef = Reference;
pub type ElectoralDistrictRef = Reference;

/// 邮政编码引用（代码字段名为 nr）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub href: Url,
    #[serde(rename = "nr", default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(rename = "navn", default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// 地籍区（代码为整数，与其他引用不同）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadastralDistrict {
    #[serde(rename = "kode", default, deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(rename = "navn", default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// DDKN 网格单元标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCells {
    #[serde(default, deserialize_with = "null_as_default")]
    pub m100: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub km1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub km10: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn access_point_json() -> serde_json::Value {
        json!({
            "koordinater": [8.40179905638495, 55.4454386963562],
            "nøjagtighed": "A",
            "kilde": 1,
            "tekniskstandard": "TK",
            "tekstretning": 125.9,
            "ændret": "2000-09-18T00:00:00.000"
        })
    }

    #[test]
    fn test_derive_kvh() {
        assert_eq!(derive_kvh("05500001___6_______"), "05500001___6");
        assert_eq!(derive_kvh("0550"), "0550");
        assert_eq!(derive_kvh(""), "");
    }

    #[test]
    fn test_reference_null_fields() {
        let r: Reference = serde_json::from_value(json!({
            "href": null,
            "kode": "0563",
            "navn": null
        }))
        .unwrap();
        assert_eq!(r.code, "0563");
        assert_eq!(r.name, "");
        assert!(r.href.is_empty());
    }

    #[test]
    fn test_access_point_decode() {
        let p: AccessPoint = serde_json::from_value(access_point_json()).unwrap();
        assert_eq!(p.longitude(), 8.40179905638495);
        assert_eq!(p.latitude(), 55.4454386963562);
        assert_eq!(p.source, 1);
        assert_eq!(p.changed, LocalTime::must_parse("2000-09-18T00:00:00.000"));
    }

    #[test]
    fn test_access_point_requires_timestamp() {
        let mut v = access_point_json();
        v.as_object_mut().unwrap().remove("ændret");
        assert!(serde_json::from_value::<AccessPoint>(v).is_err());
    }

    #[test]
    fn test_serialize_emits_every_key() {
        let p: AccessPoint = serde_json::from_value(json!({
            "ændret": "2000-09-18T00:00:00.000"
        }))
        .unwrap();
        let v = serde_json::to_value(&p).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in [
            "koordinater",
            "nøjagtighed",
            "kilde",
            "tekniskstandard",
            "tekstretning",
            "ændret",
        ] {
            assert!(keys.contains(&key), "缺少键 {}", key);
        }
    }
}
