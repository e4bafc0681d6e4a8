// ==========================================
// DAWA 地址导入 - 文件导入入口
// ==========================================
// 按扩展名分派: .csv → CsvImporter, .json → JsonImporter
// ==========================================

use crate::importer::csv_importer::CsvImporter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::AddressImporter;
use crate::importer::iter::AddressIter;
use crate::importer::json_importer::JsonImporter;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// 从本地文件导入地址数据（扩展名不区分大小写）
pub fn import_file<P: AsRef<Path>>(file_path: P) -> ImportResult<AddressIter> {
    import_file_with(file_path, &CsvImporter::new(), &JsonImporter::new())
}

/// 使用指定导入器从本地文件导入
pub fn import_file_with<P: AsRef<Path>>(
    file_path: P,
    csv: &CsvImporter,
    json: &JsonImporter,
) -> ImportResult<AddressIter> {
    let path = file_path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!(path = %path.display(), format = %ext, "打开导入文件");
    match ext.as_str() {
        "csv" => csv.import(File::open(path)?),
        "json" => json.import(File::open(path)?),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}
