// ==========================================
// RAB 导入引擎 - 导入层
// ==========================================
// 职责: 承包商预算表 (RAB/BOQ) → 预算明细列表
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod category_state;
pub mod error;
pub mod file_parser;
pub mod header_locator;
pub mod item_emitter;
pub mod number_normalizer;
pub mod pipeline;
pub mod rab_importer_impl;
pub mod rab_importer_trait;
pub mod row_classifier;
pub mod sheet_selector;

// 重导出核心类型
pub use category_state::{BillableRowPolicy, CategoryState, CategoryStateMachine, RowPolicy};
pub use error::{ImportError, ImportResult};
pub use file_parser::{
    CsvParser, ExcelParser, FileParser, SpreadsheetSource, UniversalFileParser,
};
pub use header_locator::{header_candidates, locate_header, HeaderCandidate};
pub use item_emitter::{normalize_item_name, ItemEmitter};
pub use number_normalizer::{normalize_number, normalize_text};
pub use pipeline::{parse_grid, ParseOutcome};
pub use rab_importer_impl::RabImporterImpl;
pub use row_classifier::{DataRow, NoiseReason, RowClassifier, RowKind};
pub use sheet_selector::select_sheet;

// 重导出 Trait 接口
pub use rab_importer_trait::RabImporter;
