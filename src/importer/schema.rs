// ==========================================
// DAWA 地址导入 - 严格字段校验
// ==========================================
// 已知键集合: 解码结果再序列化后的键（所有字段始终序列化）
// ==========================================

use serde_json::Value;

/// 返回 input 中第一个不被 known 识别的键（点分路径）
///
/// 只比较对象；数组（如坐标）与标量不展开。
pub fn find_unknown_field(input: &Value, known: &Value) -> Option<String> {
    find_at(input, known, "")
}

fn find_at(input: &Value, known: &Value, prefix: &str) -> Option<String> {
    let (Value::Object(input), Value::Object(known)) = (input, known) else {
        return None;
    };

    for (key, value) in input {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match known.get(key) {
            None => return Some(path),
            Some(expected) => {
                if let Some(found) = find_at(value, expected, &path) {
                    return Some(found);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_unknown_fields() {
        let known = json!({"id": "x", "historik": {"oprettet": "a", "ændret": "b"}});
        let input = json!({"id": "x", "historik": {"oprettet": "a"}});
        assert_eq!(find_unknown_field(&input, &known), None);
    }

    #[test]
    fn test_unknown_top_level_field() {
        let known = json!({"id": "x"});
        let input = json!({"id": "x", "vejpunkt": {}});
        assert_eq!(find_unknown_field(&input, &known), Some("vejpunkt".to_string()));
    }

    #[test]
    fn test_unknown_nested_field_path() {
        let known = json!({"adgangsadresse": {"vejstykke": {"kode": "", "navn": ""}}});
        let input = json!({"adgangsadresse": {"vejstykke": {"kode": "0110", "adresseringsnavn": "A"}}});
        assert_eq!(
            find_unknown_field(&input, &known),
            Some("adgangsadresse.vejstykke.adresseringsnavn".to_string())
        );
    }

    #[test]
    fn test_null_nested_object_is_ignored() {
        let known = json!({"DDKN": {"m100": ""}});
        let input = json!({"DDKN": null});
        assert_eq!(find_unknown_field(&input, &known), None);
    }
}
