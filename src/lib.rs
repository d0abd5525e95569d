// ==========================================
// RAB 表格导入引擎 - 核心库
// ==========================================
// 职责: 承包商预算表 (RAB/BOQ) → 带两级分类的预算明细列表
// 技术栈: Rust + calamine + csv
// 系统定位: 项目管理系统的导入组件（不负责持久化与界面）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "id");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 表格解析
pub mod importer;

// 配置层 - 解析参数
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CellValue, ColumnMapSource, Grid, NumberLocalePolicy};

// 领域实体
pub use domain::{
    display_category, sort_items_by_category, BudgetItem, CategoryKey, ColumnMap, ImportReport,
    ImportSummary,
};

// 导入器
pub use importer::{
    parse_grid, ImportError, ImportResult, RabImporter, RabImporterImpl, RowPolicy,
};

// 配置
pub use config::{ConfigManager, RabImportConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "RAB Import";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
