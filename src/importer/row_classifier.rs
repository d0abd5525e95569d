// ==========================================
// RAB 导入引擎 - 行分类器
// ==========================================
// 职责: 每行只判定一次类型（主分类 / 子分类 / 数据行 / 噪声），不读写分类状态
// 状态演进见 category_state.rs
// ==========================================

use crate::config::import_config::RabImportConfig;
use crate::domain::import::ColumnMap;
use crate::domain::types::{cell_at, CellValue};
use crate::importer::number_normalizer::normalize_number;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // 主分类序号: 单个大写字母或罗马数字
    static ref LETTER_INDEX: Regex = Regex::new(r"^[A-Z]$").unwrap();
    static ref ROMAN_INDEX: Regex = Regex::new(r"^[IVX]+$").unwrap();
}

// ==========================================
// 行类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoiseReason {
    EmptyName,     // 名称为空
    TooShort,      // 名称少于 2 个字符
    Keyword,       // 合计 / 税 / 签字栏
    TrivialHeader, // 无实际内容的分类行
}

/// 数据行原始内容（名称未做序号清理）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub name: String,
    pub unit: String,
    pub volume: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowKind {
    Noise(NoiseReason),
    MainHeader { title: String },
    SubHeader { title: String },
    DataRow(DataRow),
}

// ==========================================
// RowClassifier
// ==========================================
pub struct RowClassifier<'a> {
    column_map: &'a ColumnMap,
    config: &'a RabImportConfig,
}

impl<'a> RowClassifier<'a> {
    pub fn new(column_map: &'a ColumnMap, config: &'a RabImportConfig) -> Self {
        Self { column_map, config }
    }

    /// 判定单行类型
    pub fn classify(&self, row: &[CellValue]) -> RowKind {
        let index = read_index(cell_at(row, self.column_map.number_col));
        let name = cell_at(row, self.column_map.name_col).as_text();

        if name.is_empty() {
            return RowKind::Noise(NoiseReason::EmptyName);
        }
        if name.chars().count() < 2 {
            return RowKind::Noise(NoiseReason::TooShort);
        }
        if self.is_noise_name(&name) {
            return RowKind::Noise(NoiseReason::Keyword);
        }

        let policy = self.config.number_policy;
        let volume = normalize_number(cell_at(row, self.column_map.volume_col), policy);
        let unit_price = self
            .column_map
            .price_col
            .map(|col| normalize_number(cell_at(row, col), policy))
            .unwrap_or(0.0);

        if volume == 0.0 && unit_price == 0.0 {
            return self.classify_header(&index, &name);
        }

        let unit = self
            .column_map
            .unit_col
            .map(|col| cell_at(row, col).as_text())
            .unwrap_or_default();

        RowKind::DataRow(DataRow {
            name,
            unit,
            volume,
            unit_price,
        })
    }

    fn classify_header(&self, index: &str, name: &str) -> RowKind {
        if is_main_index(index) {
            return RowKind::MainHeader {
                title: build_main_title(index, name),
            };
        }

        if is_meaningful_name(name) {
            RowKind::SubHeader {
                title: name.to_string(),
            }
        } else {
            RowKind::Noise(NoiseReason::TrivialHeader)
        }
    }

    /// 合计行 / 税行 / 签字栏
    pub fn is_noise_name(&self, name: &str) -> bool {
        let upper = name.trim().to_uppercase();
        self.config
            .noise_prefixes
            .iter()
            .any(|p| upper.starts_with(&p.to_uppercase()))
            || self
                .config
                .noise_contains
                .iter()
                .any(|p| upper.contains(&p.to_uppercase()))
    }
}

/// 读取序号单元格并去掉末尾的一个 "."（"A." 与 "A" 等价）
pub fn read_index(cell: &CellValue) -> String {
    let text = cell.as_text();
    match text.strip_suffix('.') {
        Some(stripped) => stripped.trim().to_string(),
        None => text,
    }
}

/// 序号是否标记主分类
pub fn is_main_index(index: &str) -> bool {
    LETTER_INDEX.is_match(index) || ROMAN_INDEX.is_match(index)
}

/// 构造主分类标题 `"{序号}. {名称}"`
///
/// 名称已带序号前缀时不重复添加，且分隔点后恰好一个空格
pub fn build_main_title(index: &str, name: &str) -> String {
    let name = name.trim();
    let body = match name.strip_prefix(index) {
        Some(rest) if rest.starts_with('.') || rest.starts_with(char::is_whitespace) => {
            rest.trim_start_matches('.').trim()
        }
        _ => name,
    };

    if body.is_empty() {
        format!("{}.", index)
    } else {
        format!("{}. {}", index, body)
    }
}

/// 名称是否有实际内容（至少含一个字母）
pub fn is_meaningful_name(name: &str) -> bool {
    name.chars().any(char::is_alphabetic)
}
