// ==========================================
// RAB 表格导入引擎 - 命令行入口
// ==========================================
// 用法:
//   rab-import <file> [sheet]
//
// 导入结果以 JSON 输出到 stdout，日志输出到 stderr
// 环境变量:
//   RUST_LOG               日志级别（默认 rab_import=info）
//   RAB_IMPORT_LOG_FORMAT  设为 json 时输出 JSON 日志
//   RAB_IMPORT_CONFIG      配置文件路径
// ==========================================

use rab_import::config::ConfigManager;
use rab_import::i18n;
use rab_import::importer::{RabImporter, RabImporterImpl};
use rab_import::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(file_path) = args.next() else {
        eprintln!("Usage: rab-import <file> [sheet]");
        return ExitCode::from(2);
    };
    let sheet = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    tracing::info!("{} v{}", rab_import::APP_NAME, rab_import::VERSION);

    let config = match ConfigManager::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", i18n::localized_message(&e));
            return ExitCode::FAILURE;
        }
    };

    if let Ok(current) = config.current() {
        i18n::set_locale(&current.locale);
    }

    let importer = RabImporterImpl::with_defaults(config);
    match importer.import_from_path(&file_path, sheet.as_deref()).await {
        Ok(report) => {
            let count = report.items.len().to_string();
            eprintln!(
                "{}",
                i18n::t_with_args(
                    "import.success",
                    &[("count", count.as_str()), ("sheet", report.sheet_name.as_str())],
                )
            );
            print_report(&report)
        }
        Err(e) => {
            eprintln!("{}", i18n::localized_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &rab_import::ImportReport) -> ExitCode {
    match serde_json::to_string_pretty(report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
