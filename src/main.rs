// ==========================================
// DAWA 地址导入 - 命令行入口
// ==========================================
// 用法:
//   dawa-import <文件.csv|文件.json>
//   dawa-import --fetch <路径> [key=value ...]
// 配置: DAWA_JSON_STRICT / DAWA_CHANNEL_CAPACITY / DAWA_HOST
// ==========================================

use anyhow::{bail, Context, Result};
use dawa_import::importer::{import_file_with, AddressIter, CsvImporter, JsonImporter};
use dawa_import::{logging, ImportConfig, Query};
use std::time::Instant;
use tracing::{error, info};

fn main() {
    logging::init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = ImportConfig::from_env();
    config.apply_global();

    info!("DAWA 地址导入 v{}", dawa_import::VERSION);
    let started = Instant::now();

    let iter = match args.first().map(String::as_str) {
        Some("--fetch") => {
            let Some(path) = args.get(1) else {
                bail!("--fetch 需要查询路径，例如 /adresser");
            };
            fetch(&config, path, &args[2..])?
        }
        Some(file) => import_file_with(
            file,
            &CsvImporter::from_config(&config),
            &JsonImporter::from_config(&config),
        )
        .with_context(|| format!("无法导入文件 {}", file))?,
        None => bail!("用法: dawa-import <文件.csv|文件.json> | --fetch <路径> [key=value ...]"),
    };

    let count = drain(iter)?;
    info!(
        count = count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "导入完成"
    );
    Ok(())
}

/// 按查询参数请求数据服务；format=csv 时按 CSV 导入
fn fetch(config: &ImportConfig, path: &str, params: &[String]) -> Result<AddressIter> {
    let mut query = Query::new(path).with_host(config.host.clone());
    let mut csv = false;
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("无效的查询参数: {}（应为 key=value）", param);
        };
        if key == "format" && value == "csv" {
            csv = true;
        }
        query = if value.is_empty() {
            query.add_empty(key)
        } else {
            query.add(key, value)
        };
    }

    info!(url = %query.url(), "请求数据服务");
    let iter = if csv {
        query.import_with(&CsvImporter::from_config(config))
    } else {
        query.import_with(&JsonImporter::from_config(config))
    }
    .context("查询失败")?;
    Ok(iter)
}

fn drain(mut iter: AddressIter) -> Result<usize> {
    let mut count = 0;
    while let Some(address) = iter.next().context("导入中断")? {
        info!(id = %address.id, "{}", address.designation);
        count += 1;
    }
    Ok(count)
}
