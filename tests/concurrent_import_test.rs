// ==========================================
// 并发导入测试
// ==========================================
// 测试目标: 验证批量导入功能和并发导入互不干扰
// ==========================================


use rab_import::config::{ConfigManager, RabImportConfig};
use rab_import::importer::*;
use rab_import::logging;
use std::time::Instant;
use test_helpers::{grid_to_csv, interleaved_grid, scenario_grid, write_temp_csv};

/// 创建测试用的 RabImporter（仅 CSV）
fn create_test_importer() -> RabImporterImpl<ConfigManager> {
    let config = ConfigManager::new(RabImportConfig::default()).expect("Failed to create config");

    RabImporterImpl::new(config, Box::new(CsvParser), Box::new(BillableRowPolicy))
}

#[tokio::test]
async fn test_batch_import_multiple_files() {
    // 初始化日志系统
    logging::init_test();

    // 准备多个测试文件
    let scenario = write_temp_csv(&grid_to_csv(&scenario_grid())).unwrap();
    let interleaved = write_temp_csv(&grid_to_csv(&interleaved_grid())).unwrap();
    let empty = write_temp_csv("").unwrap();

    let importer = create_test_importer();

    // 开始计时
    let start = Instant::now();

    // 批量导入
    let results = importer
        .batch_import(vec![
            scenario.path().to_path_buf(),
            interleaved.path().to_path_buf(),
            empty.path().to_path_buf(),
        ])
        .await;

    let elapsed = start.elapsed();
    tracing::info!("批量导入耗时: {:?}", elapsed);

    // 结果顺序与输入一致，单个失败不影响其他文件
    assert_eq!(results.len(), 3, "应该有3个导入结果");
    assert_eq!(results[0].as_ref().unwrap().items.len(), 2);
    assert_eq!(results[1].as_ref().unwrap().items.len(), 5);
    assert!(matches!(results[2], Err(ImportError::EmptySheet { .. })));

    // 每次导入独立生成批次号
    let a = &results[0].as_ref().unwrap().batch_id;
    let b = &results[1].as_ref().unwrap().batch_id;
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_batch_import_missing_file() {
    let scenario = write_temp_csv(&grid_to_csv(&scenario_grid())).unwrap();
    let importer = create_test_importer();

    let results = importer
        .batch_import(vec![
            scenario.path().to_path_buf(),
            std::path::PathBuf::from("/nonexistent/rab.csv"),
        ])
        .await;

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ImportError::FileNotFound(_))));
}

#[tokio::test]
async fn test_concurrent_imports_share_nothing() {
    let importer = create_test_importer();
    let bytes = grid_to_csv(&interleaved_grid()).into_bytes();

    let (first, second) = tokio::join!(
        importer.import_from_bytes(bytes.clone(), "a.csv", None),
        importer.import_from_bytes(bytes.clone(), "b.csv", None),
    );

    let first = first.unwrap();
    let second = second.unwrap();

    // 编号每次导入从 1 开始
    assert_eq!(first.items, second.items);
    assert_eq!(first.items[0].id, 1);
    assert_eq!(second.items[0].id, 1);
    assert_eq!(first.sheet_name, "a");
    assert_eq!(second.sheet_name, "b");
}

#[tokio::test]
async fn test_csv_only_importer_rejects_excel_bytes() {
    let importer = create_test_importer();
    // CsvParser 不识别扩展名，按 CSV 读取后表名取文件名
    let result = importer
        .import_from_bytes(b"NO,URAIAN\n".to_vec(), "rab.xlsx", Some("RAB"))
        .await;

    assert!(matches!(result, Err(ImportError::SheetNotFound(_))));
}
