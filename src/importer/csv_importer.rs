// ==========================================
// DAWA 地址导入 - CSV 导入器
// ==========================================
// 同步阶段: 读取表头（失败则不返回迭代器）
// 异步阶段: 逐行 列名→值 映射 → FieldMapper → 通道
// ==========================================

use crate::config::ImportConfig;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::importer_trait::{AddressImporter, RecordMapper};
use crate::importer::iter::{AddressIter, DEFAULT_CHANNEL_CAPACITY};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct CsvImporter {
    mapper: Arc<dyn RecordMapper>,
    capacity: usize,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvImporter {
    /// 使用登记库标准字段映射
    pub fn new() -> Self {
        Self::with_mapper(Arc::new(FieldMapper))
    }

    /// 使用自定义字段映射
    pub fn with_mapper(mapper: Arc<dyn RecordMapper>) -> Self {
        Self {
            mapper,
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

impl AddressImporter for CsvImporter {
    #[instrument(skip(self, input), fields(capacity = self.capacity))]
    fn import<R>(&self, input: R) -> ImportResult<AddressIter>
    where
        R: Read + Send + 'static,
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .flexible(false) // 列数与表头不一致视为格式错误
            .from_reader(input);

        // 读取表头（同步）
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::HeaderRead(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            return Err(ImportError::HeaderRead("输入为空".to_string()));
        }
        info!(columns = headers.len(), "开始导入 CSV 地址数据");

        let mapper = self.mapper.clone();
        AddressIter::spawn("dawa-csv-import", self.capacity, move |sink| {
            let mut record = StringRecord::new();
            let mut imported: u64 = 0;

            loop {
                if sink.is_cancelled() {
                    return Err(ImportError::Cancelled);
                }
                if !reader.read_record(&mut record)? {
                    break;
                }
                let row_number = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(imported + 2);

                // 按列名建立映射，不依赖列序号
                let row: HashMap<String, String> = headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(str::to_string))
                    .collect();

                let address = mapper.map_to_address(&row, row_number)?;
                sink.push(address)?;
                imported += 1;
            }

            info!(imported = imported, "CSV 导入完成");
            Ok(())
        })
    }
}
