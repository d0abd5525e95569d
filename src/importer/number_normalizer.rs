// ==========================================
// RAB 导入引擎 - 数值标准化
// ==========================================
// 职责: 原始单元格值 → f64（币种前缀、千分位与小数点的区域差异）
// 红线: 永不报错，空白 / "-" / 无法解析一律返回 0
// ==========================================

use crate::domain::types::{CellValue, NumberLocalePolicy};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 币种标记: Rp / Rp. / IDR
    static ref CURRENCY_PATTERN: Regex = Regex::new(r"(?i)(rp\.?|idr)").unwrap();
    // 点号千分位: 1.234 / 1.234.567
    static ref DOT_GROUPING: Regex = Regex::new(r"^[+-]?\d{1,3}(\.\d{3})+$").unwrap();
    // 逗号千分位: 1,234 / 1,234,567
    static ref COMMA_GROUPING: Regex = Regex::new(r"^[+-]?\d{1,3}(,\d{3})+$").unwrap();
    // 最长数字前缀
    static ref NUMERIC_PREFIX: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
}

/// 按策略将单元格值转换为数值
pub fn normalize_number(value: &CellValue, policy: NumberLocalePolicy) -> f64 {
    match value {
        CellValue::Empty => 0.0,
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) => 0.0,
        CellValue::Text(raw) => normalize_text(raw, policy),
    }
}

/// 文本数值标准化
pub fn normalize_text(raw: &str, policy: NumberLocalePolicy) -> f64 {
    // 只去掉首尾空白，数字中间的空格视为数值结束
    let stripped = CURRENCY_PATTERN.replace_all(raw, "");
    let value = stripped.trim();

    if value.is_empty() || value == "-" {
        return 0.0;
    }

    let canonical = match policy {
        NumberLocalePolicy::IndonesianV1 => canonicalize_v1(value),
        NumberLocalePolicy::LastSeparatorV2 => canonicalize_v2(value),
    };

    parse_leading_number(&canonical)
}

fn canonicalize_v1(s: &str) -> String {
    let has_dot = s.contains('.');
    let has_comma = s.contains(',');

    match (has_dot, has_comma) {
        (true, true) => s.replace('.', "").replace(',', "."),
        (true, false) if DOT_GROUPING.is_match(s) => s.replace('.', ""),
        (true, false) => s.to_string(),
        (false, true) => s.replace(',', "."),
        (false, false) => s.to_string(),
    }
}

fn canonicalize_v2(s: &str) -> String {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) if dot > comma => s.replace(',', ""),
        (Some(_), Some(_)) => s.replace('.', "").replace(',', "."),
        (Some(_), None) if DOT_GROUPING.is_match(s) => s.replace('.', ""),
        (None, Some(_)) if COMMA_GROUPING.is_match(s) => s.replace(',', ""),
        (None, Some(_)) => s.replace(',', "."),
        _ => s.to_string(),
    }
}

fn parse_leading_number(s: &str) -> f64 {
    NUMERIC_PREFIX
        .find(s)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
