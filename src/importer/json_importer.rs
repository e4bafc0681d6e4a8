// ==========================================
// DAWA 地址导入 - JSON 导入器
// ==========================================
// 输入: 顶层为地址对象数组
// 流式解码: 逐个元素解码后推入通道，不缓冲整个数组
// 严格模式: 每次 import 调用时读取一次全局开关
// ==========================================

use crate::config::{json_strict_field_check, ImportConfig};
use crate::domain::{derive_kvh, Address};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::AddressImporter;
use crate::importer::iter::{AddressIter, RecordSink, DEFAULT_CHANNEL_CAPACITY};
use crate::importer::schema::find_unknown_field;
use serde::de::{self, SeqAccess, Visitor};
use serde::Deserializer as _;
use serde_json::Value;
use std::fmt;
use std::io::{BufReader, Read};
use tracing::{debug, info, instrument};

pub struct JsonImporter {
    capacity: usize,
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonImporter {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new().with_capacity(config.channel_capacity)
    }

    /// 设置通道容量（条记录）
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl AddressImporter for JsonImporter {
    #[instrument(skip(self, input), fields(capacity = self.capacity))]
    fn import<R>(&self, input: R) -> ImportResult<AddressIter>
    where
        R: Read + Send + 'static,
    {
        let strict = json_strict_field_check();
        info!(strict = strict, "开始导入 JSON 地址数据");

        AddressIter::spawn("dawa-json-import", self.capacity, move |sink| {
            decode_array(BufReader::new(input), strict, sink)
        })
    }
}

// ==========================================
// 流式数组解码
// ==========================================

fn decode_array<R: Read>(reader: R, strict: bool, sink: &RecordSink) -> ImportResult<()> {
    let mut failure: Option<ImportError> = None;
    let mut imported: usize = 0;

    let mut de = serde_json::Deserializer::from_reader(reader);
    let visitor = AddressSeqVisitor {
        sink,
        strict,
        failure: &mut failure,
        imported: &mut imported,
    };
    let result = (&mut de).deserialize_seq(visitor).and_then(|()| de.end());

    // 元素级错误优先于 serde 包装后的错误
    if let Some(err) = failure {
        return Err(err);
    }
    match result {
        Ok(()) => {
            info!(imported = imported, "JSON 导入完成");
            Ok(())
        }
        Err(e) if e.is_io() => Err(ImportError::StreamRead(e.to_string())),
        Err(e) => Err(ImportError::JsonDecode {
            index: imported + 1,
            message: e.to_string(),
        }),
    }
}

struct AddressSeqVisitor<'a> {
    sink: &'a RecordSink,
    strict: bool,
    failure: &'a mut Option<ImportError>,
    imported: &'a mut usize,
}

impl<'de, 'a> Visitor<'de> for AddressSeqVisitor<'a> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("地址对象数组")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(value) = seq.next_element::<Value>()? {
            let index = *self.imported + 1;
            let outcome =
                decode_element(value, self.strict, index).and_then(|a| self.sink.push(a));
            if let Err(err) = outcome {
                let message = err.to_string();
                *self.failure = Some(err);
                return Err(de::Error::custom(message));
            }
            *self.imported += 1;
        }
        Ok(())
    }
}

/// 解码单个数组元素（index 从 1 开始）
fn decode_element(value: Value, strict: bool, index: usize) -> ImportResult<Address> {
    let decode_err = |e: serde_json::Error| ImportError::JsonDecode {
        index,
        message: e.to_string(),
    };

    let mut address: Address = if strict {
        let address = serde_json::from_value(value.clone()).map_err(decode_err)?;
        let known = serde_json::to_value(&address)
            .map_err(|e| ImportError::InternalError(format!("地址序列化失败: {}", e)))?;
        if let Some(field) = find_unknown_field(&value, &known) {
            debug!(index = index, field = %field, "发现未知字段");
            return Err(ImportError::Schema { index, field });
        }
        address
    } else {
        serde_json::from_value(value).map_err(decode_err)?
    };

    reconcile_kvh(&mut address, index)?;
    Ok(address)
}

/// kvh 必须是 kvhx 的前 12 个字符：缺失时补齐，不一致时报错
fn reconcile_kvh(address: &mut Address, index: usize) -> ImportResult<()> {
    let expected = derive_kvh(&address.kvhx);
    let kvh = &mut address.access_address.kvh;
    if kvh.is_empty() {
        *kvh = expected;
        return Ok(());
    }
    if *kvh != expected {
        return Err(ImportError::JsonDecode {
            index,
            message: format!("kvh {:?} 与 kvhx {:?} 的前缀不一致", kvh, address.kvhx),
        });
    }
    Ok(())
}
