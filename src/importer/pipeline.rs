// ==========================================
// RAB 导入引擎 - 解析主流程
// ==========================================
// 流程: 表头定位 → 逐行分类 → 分类状态折叠 → 明细发射
// 红线: 纯同步函数，只读网格，不跨调用保留任何状态
// ==========================================

use crate::config::import_config::RabImportConfig;
use crate::domain::budget::BudgetItem;
use crate::domain::import::{ColumnMap, ImportSummary};
use crate::domain::types::{CellValue, Row};
use crate::importer::category_state::{CategoryStateMachine, RowPolicy, Transition};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_locator::locate_header;
use crate::importer::item_emitter::ItemEmitter;
use crate::importer::row_classifier::RowClassifier;
use tracing::{info, warn};

/// 单个工作表的解析结果
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub column_map: ColumnMap,
    pub items: Vec<BudgetItem>,
    pub summary: ImportSummary,
}

/// 将单元格网格解析为预算明细
///
/// # 参数
/// - grid: 已解码的工作表网格
/// - sheet_name: 工作表名（仅用于错误信息与日志）
/// - config: 导入配置
/// - policy: 数据行可计费策略
///
/// # 返回
/// - Err(EmptySheet): 网格没有任何非空行
/// - Err(NoItemsDetected): 解析完成但没有明细
pub fn parse_grid(
    grid: &[Row],
    sheet_name: &str,
    config: &RabImportConfig,
    policy: &dyn RowPolicy,
) -> ImportResult<ParseOutcome> {
    if grid.iter().all(|row| row.iter().all(CellValue::is_blank)) {
        return Err(ImportError::EmptySheet {
            sheet: sheet_name.to_string(),
        });
    }

    let column_map = locate_header(grid, config.header_scan_rows, &config.fallback_layout);
    if column_map.is_fallback() {
        warn!(
            sheet = %sheet_name,
            scan_rows = config.header_scan_rows,
            "未识别到表头，使用固定列布局"
        );
    }

    let classifier = RowClassifier::new(&column_map, config);
    let mut machine = CategoryStateMachine::new(config.default_main_category.clone(), policy);
    let mut emitter = ItemEmitter::new(config.sort_key_width, config.encode_sort_key_in_category);
    let mut summary = ImportSummary::default();

    for (row_index, row) in grid.iter().enumerate().skip(column_map.data_start_row()) {
        summary.total_rows += 1;

        match machine.apply(row_index, classifier.classify(row)) {
            Transition::Ignored => summary.noise_rows += 1,
            Transition::MainCategory => summary.main_categories += 1,
            Transition::SubCategory => summary.sub_categories += 1,
            Transition::Dropped => summary.dropped_rows += 1,
            Transition::Emit(key, data) => {
                emitter.emit(key, data);
            }
        }
    }

    let items = emitter.finish(sheet_name)?;
    summary.item_count = items.len();
    summary.total_value = items.iter().map(BudgetItem::total_price).sum();

    info!(
        sheet = %sheet_name,
        items = summary.item_count,
        main_categories = summary.main_categories,
        sub_categories = summary.sub_categories,
        noise = summary.noise_rows,
        dropped = summary.dropped_rows,
        "工作表解析完成"
    );

    Ok(ParseOutcome {
        column_map,
        items,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::display_category;
    use crate::importer::category_state::BillableRowPolicy;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn parse(grid: &[Row]) -> ImportResult<ParseOutcome> {
        parse_grid(grid, "RAB", &RabImportConfig::default(), &BillableRowPolicy)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let grid = vec![
            row(&["RENCANA ANGGARAN BIAYA", "", "", "", ""]),
            row(&["Proyek: Rumah Tinggal", "", "", "", ""]),
            row(&["", "", "", "", ""]),
            row(&["NO", "URAIAN", "SAT", "VOL", "HARGA"]),
            row(&["A", "PEKERJAAN PERSIAPAN", "", "", ""]),
            row(&["1", "Pembersihan Lahan", "m2", "100", "15000"]),
            row(&["2", "Pemasangan Bowplank", "m1", "24", "45000"]),
            row(&["", "", "", "", ""]),
            row(&["", "TOTAL", "", "", "3080000"]),
            row(&["", "Dibuat oleh,", "", "", ""]),
        ];

        let outcome = parse(&grid).unwrap();
        let items = outcome.items;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].category, "A. PEKERJAAN PERSIAPAN");
        assert_eq!(items[0].name, "Pembersihan Lahan");
        assert_eq!(items[0].unit, "m2");
        assert_eq!(items[0].volume, 100.0);
        assert_eq!(items[0].unit_price, 15000.0);

        assert_eq!(items[1].id, 2);
        assert_eq!(items[1].category, "A. PEKERJAAN PERSIAPAN");
        assert_eq!(items[1].name, "Pemasangan Bowplank");
        assert_eq!(items[1].unit, "m1");
        assert_eq!(items[1].volume, 24.0);
        assert_eq!(items[1].unit_price, 45000.0);

        assert_eq!(outcome.summary.total_rows, 6);
        assert_eq!(outcome.summary.main_categories, 1);
        assert_eq!(outcome.summary.noise_rows, 3);
        assert_eq!(outcome.summary.total_value, 100.0 * 15000.0 + 24.0 * 45000.0);
    }

    #[test]
    fn test_empty_sheet() {
        assert!(matches!(parse(&[]), Err(ImportError::EmptySheet { .. })));
        let blank = vec![row(&["", " "]), row(&[])];
        assert!(matches!(parse(&blank), Err(ImportError::EmptySheet { .. })));
    }

    #[test]
    fn test_headers_only_is_no_items() {
        let grid = vec![
            row(&["NO", "URAIAN", "SAT", "VOL", "HARGA"]),
            row(&["A", "PEKERJAAN PERSIAPAN", "", "", ""]),
            row(&["", "GRAND TOTAL", "", "", "0"]),
        ];
        assert!(matches!(parse(&grid), Err(ImportError::NoItemsDetected { .. })));
    }

    #[test]
    fn test_sub_category_sort_key() {
        let grid = vec![
            row(&["NO", "URAIAN", "SAT", "VOL", "HARGA"]),
            row(&["I", "PEKERJAAN STRUKTUR", "", "", ""]),
            row(&["", "Pondasi", "", "", ""]),
            row(&["1", "1. Galian Tanah", "m3", "12,5", "85.000"]),
        ];

        let items = parse(&grid).unwrap().items;
        assert_eq!(items[0].category, "I. PEKERJAAN STRUKTUR - 0002||Pondasi");
        assert_eq!(display_category(&items[0].category), "I. PEKERJAAN STRUKTUR - Pondasi");
        assert_eq!(items[0].name, "Galian Tanah");
        assert_eq!(items[0].volume, 12.5);
        assert_eq!(items[0].unit_price, 85000.0);
    }

    #[test]
    fn test_fallback_layout_parse() {
        let mut grid: Vec<Row> = (0..6).map(|i| row(&[&format!("judul {}", i)])).collect();
        grid.push(row(&["A", "PERSIAPAN", "", "", "", "", ""]));
        grid.push(row(&["1", "Pagar Seng", "", "", "m1", "50", "120.000"]));

        let outcome = parse(&grid).unwrap();
        assert!(outcome.column_map.is_fallback());
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].category, "A. PERSIAPAN");
        assert_eq!(outcome.items[0].unit, "m1");
        assert_eq!(outcome.items[0].unit_price, 120000.0);
    }
}
