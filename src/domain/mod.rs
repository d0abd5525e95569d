// ==========================================
// RAB 导入引擎 - 领域模型层
// ==========================================
// 职责: 定义单元格、列映射、预算明细、导入报告等实体
// 红线: 不含解析逻辑,不含文件读写
// ==========================================

pub mod budget;
pub mod import;
pub mod types;

// 重导出核心类型
pub use budget::{
    display_category, sort_items_by_category, BudgetItem, CategoryKey, SubCategory,
    CATEGORY_JOINER, SORT_KEY_SEPARATOR,
};
pub use import::{ColumnMap, ImportReport, ImportSummary};
pub use types::{cell_at, CellValue, ColumnMapSource, Grid, NumberLocalePolicy, Row};
