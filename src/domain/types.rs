// ==========================================
// RAB 导入引擎 - 领域类型定义
// ==========================================
// 职责: 单元格值、表格网格、数值解析策略等基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单元格值 (Cell Value)
// ==========================================
// 由外部解码器产生，引擎只读
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// 是否为空白单元格（空值或仅含空白字符的文本）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 单元格的文本形式（已去除首尾空白）
    ///
    /// 整数值的数字不带小数部分（`15000.0` → `"15000"`）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 表格行
pub type Row = Vec<CellValue>;

/// 表格网格（行优先）
pub type Grid = Vec<Row>;

/// 读取指定位置的单元格，越界视为空白
pub fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    const EMPTY: &CellValue = &CellValue::Empty;
    row.get(col).unwrap_or(EMPTY)
}

// ==========================================
// 数值区域解析策略 (Number Locale Policy)
// ==========================================
// "1.234" 既可能是 1234 也可能是 1.234，解析规则按版本显式固定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberLocalePolicy {
    /// 印尼格式优先：'.' 为千分位，',' 为小数点
    #[default]
    IndonesianV1,
    /// 最右侧的分隔符视为小数点
    LastSeparatorV2,
}

impl fmt::Display for NumberLocalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLocalePolicy::IndonesianV1 => write!(f, "INDONESIAN_V1"),
            NumberLocalePolicy::LastSeparatorV2 => write!(f, "LAST_SEPARATOR_V2"),
        }
    }
}

// ==========================================
// 列映射来源 (Column Map Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnMapSource {
    Detected, // 表头识别
    Fallback, // 固定布局兜底
}

impl fmt::Display for ColumnMapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnMapSource::Detected => write!(f, "DETECTED"),
            ColumnMapSource::Fallback => write!(f, "FALLBACK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_text() {
        assert_eq!(CellValue::Number(15000.0).as_text(), "15000");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Text("  m2 ".to_string()).as_text(), "m2");
        assert_eq!(CellValue::Empty.as_text(), "");
    }

    #[test]
    fn test_cell_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let row = vec![CellValue::from("A")];
        assert_eq!(cell_at(&row, 5), &CellValue::Empty);
    }
}
