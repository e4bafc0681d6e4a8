// ==========================================
// JSON 严格字段校验测试
// ==========================================
// 严格开关为进程级全局状态，本文件只包含一个测试函数，按顺序切换
// ==========================================


use dawa_import::config::{json_strict_field_check, set_json_strict_field_check};
use dawa_import::importer::ImportError;
use dawa_import::{import_addresses_json, ImportConfig};
use serde_json::Value;
use std::io::Cursor;
use test_helpers::{collect_all, JSON_SAMPLE};

fn with_unknown_field() -> String {
    let mut value: Value = serde_json::from_str(JSON_SAMPLE).unwrap();
    value[1]["adgangsadresse"]["adgangspunkt"]["vejpunkt"] = Value::Null;
    value.to_string()
}

#[test]
fn test_strict_field_check_lifecycle() {
    // 默认宽松
    assert!(!json_strict_field_check());

    // 严格模式下样例本身无未知字段
    set_json_strict_field_check(true);
    let (records, end) = collect_all(import_addresses_json(Cursor::new(JSON_SAMPLE)).unwrap());
    assert_eq!(end, Ok(()));
    assert_eq!(records.len(), 3);

    // 未知字段: 第一个元素正常产出，第二个元素终止导入
    let (records, end) =
        collect_all(import_addresses_json(Cursor::new(with_unknown_field())).unwrap());
    assert_eq!(records.len(), 1);
    assert_eq!(
        end,
        Err(ImportError::Schema {
            index: 2,
            field: "adgangsadresse.adgangspunkt.vejpunkt".to_string()
        })
    );

    // 开关在 import 调用时读取，之后的修改不影响已开始的导入
    let iter = import_addresses_json(Cursor::new(with_unknown_field())).unwrap();
    set_json_strict_field_check(false);
    let (_, end) = collect_all(iter);
    assert!(matches!(end, Err(ImportError::Schema { index: 2, .. })));

    // 关闭后同样的输入可完整导入
    let (records, end) =
        collect_all(import_addresses_json(Cursor::new(with_unknown_field())).unwrap());
    assert_eq!(end, Ok(()));
    assert_eq!(records.len(), 3);

    // 通过配置写入全局开关
    let config = ImportConfig {
        json_strict_field_check: true,
        ..ImportConfig::default()
    };
    config.apply_global();
    assert!(json_strict_field_check());

    ImportConfig::default().apply_global();
    assert!(!json_strict_field_check());
}
