// ==========================================
// DAWA 地址导入 - 字段映射器实现
// ==========================================
// 职责: 列名 → 嵌套 Address 结构 + 类型转换
// 按列名取值，源文件的列顺序无关
// ==========================================
// 字段策略:
// - 致命: id / status / 各时间戳 / href，解析失败即终止导入
// - 容错: ejerlavkode / kilde / 坐标 / tekstretning / adgangsadresse_status，
//         解析失败取零值，不上报
// - 其余文本字段原样复制
// 容错字段是源数据中已知的脏列，刻意保留这种不对称，勿统一改为严格或宽松
// ==========================================

use crate::codec::{Identifier, LocalTime, ParseError, Url};
use crate::domain::{
    derive_kvh, AccessAddress, AccessPoint, Address, AddressStatus, CadastralDistrict, GridCells,
    History, PostalCodeRef, Reference,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::RecordMapper;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

pub struct FieldMapper;

impl RecordMapper for FieldMapper {
    fn map_to_address(
        &self,
        row: &HashMap<String, String>,
        row_number: u64,
    ) -> ImportResult<Address> {
        let kvhx = self.get_string(row, "kvhx");

        Ok(Address {
            // 主键
            id: self.parse_identifier(row, "id", row_number)?,
            status: self.parse_status(row, "status", row_number)?,

            // 描述
            designation: self.get_string(row, "adressebetegnelse"),
            floor: self.get_string(row, "etage"),
            door: self.get_string(row, "dør"),
            kvhx: kvhx.clone(),
            href: self.parse_url(row, "href", row_number)?,

            // 时间信息
            history: History {
                created: self.parse_time(row, "oprettet", row_number)?,
                changed: self.parse_time(row, "ændret", row_number)?,
            },

            // 入口地址
            access_address: self.map_access_address(row, &kvhx, row_number)?,
        })
    }
}

impl FieldMapper {
    fn map_access_address(
        &self,
        row: &HashMap<String, String>,
        kvhx: &str,
        row_number: u64,
    ) -> ImportResult<AccessAddress> {
        Ok(AccessAddress {
            // 标识
            href: Url::default(),
            id: self.get_string(row, "adgangsadresseid"),
            kvh: derive_kvh(kvhx),
            status: AddressStatus::from(self.parse_lenient::<i32>(row, "adgangsadresse_status")),

            // 街道与门牌
            street: self.reference(row, "vejkode", "vejnavn"),
            house_number: self.get_string(row, "husnr"),
            supplementary_city: self.get_string(row, "supplerendebynavn"),
            postal_code: PostalCodeRef {
                href: Url::default(),
                number: self.get_string(row, "postnr"),
                name: self.get_string(row, "postnrnavn"),
            },
            municipality: self.reference(row, "kommunekode", "kommunenavn"),

            // 地籍
            cadastral_district: CadastralDistrict {
                code: self.parse_lenient::<i64>(row, "ejerlavkode"),
                name: self.get_string(row, "ejerlavnavn"),
            },
            esr_property_number: self.get_string(row, "esrejendomsnr"),
            cadastral_number: self.get_string(row, "matrikelnr"),

            // 时间信息
            history: History {
                created: self.parse_time(row, "adgangsadresse_oprettet", row_number)?,
                changed: self.parse_time(row, "adgangsadresse_ændret", row_number)?,
            },

            // 位置
            access_point: AccessPoint {
                coordinates: [
                    self.parse_lenient::<f64>(row, "wgs84koordinat_længde"),
                    self.parse_lenient::<f64>(row, "wgs84koordinat_bredde"),
                ],
                accuracy: self.get_string(row, "nøjagtighed"),
                source: self.parse_lenient::<i32>(row, "kilde"),
                technical_standard: self.get_string(row, "tekniskstandard"),
                text_orientation: self.parse_lenient::<f64>(row, "tekstretning"),
                changed: self.parse_time(row, "adressepunktændringsdato", row_number)?,
            },
            grid: GridCells {
                m100: self.get_string(row, "ddkn_m100"),
                km1: self.get_string(row, "ddkn_km1"),
                km10: self.get_string(row, "ddkn_km10"),
            },

            // 行政区划
            parish: self.reference(row, "sognekode", "sognenavn"),
            region: self.reference(row, "regionskode", "regionsnavn"),
            court_district: self.reference(row, "retskredskode", "retskredsnavn"),
            police_district: self.reference(row, "politikredskode", "politikredsnavn"),
            electoral_district: self.reference(row, "opstillingskredskode", "opstillingskredsnavn"),
            zone: self.get_string(row, "zone"),
        })
    }

    /// 提取文本字段（原样复制，缺失列视为空串）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> String {
        row.get(key).cloned().unwrap_or_default()
    }

    /// 引用类型：代码与名称均按不透明文本处理
    fn reference(&self, row: &HashMap<String, String>, code_key: &str, name_key: &str) -> Reference {
        Reference {
            href: Url::default(),
            code: self.get_string(row, code_key),
            name: self.get_string(row, name_key),
        }
    }

    /// 容错数值：解析失败取零值
    fn parse_lenient<T>(&self, row: &HashMap<String, String>, key: &str) -> T
    where
        T: FromStr + Default,
    {
        let value = row.get(key).map(String::as_str).unwrap_or("");
        value.parse::<T>().unwrap_or_else(|_| {
            if !value.is_empty() {
                debug!(field = key, value = value, "容错字段解析失败，取零值");
            }
            T::default()
        })
    }

    fn parse_identifier(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: u64,
    ) -> ImportResult<Identifier> {
        let value = row.get(key).map(String::as_str).unwrap_or("");
        Identifier::parse(value).map_err(|e| scalar_error(row_number, key, e))
    }

    fn parse_status(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: u64,
    ) -> ImportResult<AddressStatus> {
        let value = row.get(key).map(String::as_str).unwrap_or("");
        value.parse::<i32>().map(AddressStatus::from).map_err(|_| {
            scalar_error(
                row_number,
                key,
                ParseError::Integer {
                    value: value.to_string(),
                },
            )
        })
    }

    /// 解析登记库本地格式时间戳（YYYY-MM-DDTHH:MM:SS.mmm）
    fn parse_time(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: u64,
    ) -> ImportResult<LocalTime> {
        let value = row.get(key).map(String::as_str).unwrap_or("");
        LocalTime::parse(value).map_err(|e| scalar_error(row_number, key, e))
    }

    fn parse_url(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: u64,
    ) -> ImportResult<Url> {
        let value = row.get(key).map(String::as_str).unwrap_or("");
        Url::parse(value).map_err(|e| scalar_error(row_number, key, e))
    }
}

fn scalar_error(row: u64, field: &str, source: ParseError) -> ImportError {
    ImportError::ScalarParse {
        row,
        field: field.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> HashMap<String, String> {
        [
            ("id", "0a3f50b7-6545-32b8-e044-0003ba298018"),
            ("status", "1"),
            ("oprettet", "2000-02-05T18:09:56.000"),
            ("ændret", "2000-02-16T21:58:33.000"),
            ("vejkode", "0001"),
            ("vejnavn", "A Hansensvej"),
            ("husnr", "6"),
            ("etage", ""),
            ("dør", ""),
            ("supplerendebynavn", "Vråby"),
            ("postnr", "6792"),
            ("postnrnavn", "Rømø"),
            ("kommunekode", "0550"),
            ("kommunenavn", "Tønder"),
            ("ejerlavkode", "1470852"),
            ("ejerlavnavn", "Kirkeby, Rømø"),
            ("matrikelnr", "76"),
            ("esrejendomsnr", "9097"),
            ("wgs84koordinat_bredde", "55.0972751504817"),
            ("wgs84koordinat_længde", "8.53959543878291"),
            ("nøjagtighed", "A"),
            ("kilde", "5"),
            ("tekniskstandard", "UF"),
            ("tekstretning", "200"),
            ("ddkn_m100", "100m_61057_4706"),
            ("ddkn_km1", "1km_6105_470"),
            ("ddkn_km10", "10km_610_47"),
            ("adressepunktændringsdato", "2004-10-08T00:00:00.000"),
            ("adgangsadresseid", "0a3f508c-3307-32b8-e044-0003ba298018"),
            ("adgangsadresse_status", "1"),
            ("adgangsadresse_oprettet", "2000-02-05T18:09:56.000"),
            ("adgangsadresse_ændret", "2009-11-24T03:15:25.000"),
            ("kvhx", "05500001___6_______"),
            ("regionskode", "1083"),
            ("regionsnavn", "Region Syddanmark"),
            ("sognekode", "9062"),
            ("sognenavn", "Rømø"),
            ("politikredskode", "1464"),
            ("politikredsnavn", "Syd- og Sønderjyllands Politi"),
            ("retskredskode", "1147"),
            ("retskredsnavn", "Retten i Sønderborg"),
            ("opstillingskredskode", "0051"),
            ("opstillingskredsnavn", "Tønder"),
            ("zone", "Landzone"),
            (
                "href",
                "http://dawa.aws.dk/adresser/0a3f50b9-68b1-32b8-e044-0003ba298018",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_field_mapper_basic() {
        let mapper = FieldMapper;
        let a = mapper.map_to_address(&sample_row(), 2).unwrap();

        assert_eq!(a.id, Identifier::must_parse("0a3f50b7-6545-32b8-e044-0003ba298018"));
        assert_eq!(a.status, AddressStatus::Current);
        assert_eq!(a.history.created.timestamp(), 949770596);
        assert_eq!(a.kvhx, "05500001___6_______");

        let aa = &a.access_address;
        assert_eq!(aa.kvh, "05500001___6");
        assert_eq!(aa.id, "0a3f508c-3307-32b8-e044-0003ba298018");
        assert_eq!(aa.street.code, "0001");
        assert_eq!(aa.municipality.code, "0550");
        assert_eq!(aa.cadastral_district.code, 1470852);
        assert_eq!(aa.cadastral_district.name, "Kirkeby, Rømø");
        assert_eq!(aa.access_point.coordinates, [8.53959543878291, 55.0972751504817]);
        assert_eq!(aa.access_point.source, 5);
        assert_eq!(aa.access_point.text_orientation, 200.0);
        assert_eq!(aa.grid.m100, "100m_61057_4706");
        assert_eq!(aa.electoral_district.code, "0051");
        assert_eq!(aa.zone, "Landzone");
    }

    #[test]
    fn test_codes_kept_as_text() {
        let a = FieldMapper.map_to_address(&sample_row(), 2).unwrap();
        // 前导零不能丢
        assert_eq!(a.access_address.street.code, "0001");
        assert_eq!(a.access_address.postal_code.number, "6792");
    }

    #[test]
    fn test_lenient_fields_default_to_zero() {
        let mut row = sample_row();
        row.insert("ejerlavkode".to_string(), "n/a".to_string());
        row.insert("kilde".to_string(), "x".to_string());
        row.insert("wgs84koordinat_bredde".to_string(), "".to_string());
        row.insert("tekstretning".to_string(), "north".to_string());
        row.insert("adgangsadresse_status".to_string(), "?".to_string());

        let a = FieldMapper.map_to_address(&row, 2).unwrap();
        let aa = &a.access_address;
        assert_eq!(aa.cadastral_district.code, 0);
        assert_eq!(aa.access_point.source, 0);
        assert_eq!(aa.access_point.coordinates, [8.53959543878291, 0.0]);
        assert_eq!(aa.access_point.text_orientation, 0.0);
        assert_eq!(aa.status.code(), 0);
        assert_eq!(aa.cadastral_district.name, "Kirkeby, Rømø");
    }

    #[test]
    fn test_invalid_identifier_is_fatal() {
        let mut row = sample_row();
        row.insert("id".to_string(), "not-a-uuid".to_string());

        let err = FieldMapper.map_to_address(&row, 7).unwrap_err();
        match err {
            ImportError::ScalarParse { row, field, .. } => {
                assert_eq!(row, 7);
                assert_eq!(field, "id");
            }
            other => panic!("意外的错误类型: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_status_is_fatal() {
        let mut row = sample_row();
        row.insert("status".to_string(), "gældende".to_string());

        let err = FieldMapper.map_to_address(&row, 3).unwrap_err();
        assert!(matches!(
            err,
            ImportError::ScalarParse { source: ParseError::Integer { .. }, .. }
        ));
    }

    #[test]
    fn test_invalid_nested_timestamp_is_fatal() {
        let mut row = sample_row();
        row.insert(
            "adressepunktændringsdato".to_string(),
            "2004-10-08".to_string(),
        );

        let err = FieldMapper.map_to_address(&row, 2).unwrap_err();
        match err {
            ImportError::ScalarParse { field, .. } => {
                assert_eq!(field, "adressepunktændringsdato")
            }
            other => panic!("意外的错误类型: {:?}", other),
        }
    }

    #[test]
    fn test_missing_text_columns_are_empty() {
        let mut row = sample_row();
        row.remove("vejnavn");
        row.remove("zone");

        let a = FieldMapper.map_to_address(&row, 2).unwrap();
        assert_eq!(a.access_address.street.name, "");
        assert_eq!(a.access_address.zone, "");
    }

    #[test]
    fn test_missing_timestamp_column_is_fatal() {
        let mut row = sample_row();
        row.remove("oprettet");
        assert!(FieldMapper.map_to_address(&row, 2).is_err());
    }
}
