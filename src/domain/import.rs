// ==========================================
// RAB 导入引擎 - 导入结果领域模型
// ==========================================
// 职责: 列映射 (ColumnMap)、导入汇总 (ImportSummary)、导入报告 (ImportReport)
// ==========================================

use crate::domain::budget::BudgetItem;
use crate::domain::types::ColumnMapSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ColumnMap - 列映射
// ==========================================
// 每次解析只计算一次，计算后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub number_col: usize,          // 序号列（缺失时为 0）
    pub name_col: usize,            // 工作项名称列
    pub unit_col: Option<usize>,    // 单位列（可缺失）
    pub volume_col: usize,          // 工程量列
    pub price_col: Option<usize>,   // 单价列（可缺失）
    pub header_row_index: usize,    // 表头所在行（数据区从下一行开始）
    pub source: ColumnMapSource,    // 识别 / 兜底
}

impl ColumnMap {
    /// 数据区起始行
    pub fn data_start_row(&self) -> usize {
        self.header_row_index + 1
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ColumnMapSource::Fallback
    }

    /// 仅比较列位置（忽略表头所在行）
    pub fn same_columns(&self, other: &ColumnMap) -> bool {
        self.number_col == other.number_col
            && self.name_col == other.name_col
            && self.unit_col == other.unit_col
            && self.volume_col == other.volume_col
            && self.price_col == other.price_col
    }
}

// ==========================================
// ImportSummary - 导入汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,        // 数据区总行数
    pub item_count: usize,        // 输出明细数
    pub main_categories: usize,   // 识别的主分类数
    pub sub_categories: usize,    // 识别的子分类数
    pub noise_rows: usize,        // 被过滤的噪声行（合计/签字/税行/空行）
    pub dropped_rows: usize,      // 无工程量而丢弃的数据行
    pub total_value: f64,         // Σ 工程量 × 单价
}

// ==========================================
// ImportReport - 单个文件的导入报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub file_name: String,
    pub sheet_name: String,
    pub column_map: ColumnMap,
    pub items: Vec<BudgetItem>,
    pub summary: ImportSummary,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}
