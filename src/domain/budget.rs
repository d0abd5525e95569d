// ==========================================
// RAB 导入引擎 - 预算明细领域模型
// ==========================================
// 职责: 预算明细 (BudgetItem) 与两级分类键 (CategoryKey)
// 红线: 输出的每条明细 volume > 0
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 子分类排序前缀与名称之间的分隔符
pub const SORT_KEY_SEPARATOR: &str = "||";

/// 主分类与子分类之间的连接符
pub const CATEGORY_JOINER: &str = " - ";

// ==========================================
// SubCategory - 子分类
// ==========================================
// order 为子分类所在的原始行号，用于恢复表格中的先后顺序
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubCategory {
    pub name: String,
    pub order: usize,
}

// ==========================================
// CategoryKey - 两级分类复合键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey {
    pub main: String,
    pub sub: Option<SubCategory>,
}

impl CategoryKey {
    pub fn main_only(main: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub: None,
        }
    }

    pub fn with_sub(main: impl Into<String>, sub: impl Into<String>, order: usize) -> Self {
        Self {
            main: main.into(),
            sub: Some(SubCategory {
                name: sub.into(),
                order,
            }),
        }
    }

    /// 兼容旧消费方的字符串编码: `{main} - {补零行号}||{sub}`
    pub fn encoded(&self, width: usize) -> String {
        match &self.sub {
            None => self.main.clone(),
            Some(sub) => format!(
                "{}{}{:0width$}{}{}",
                self.main,
                CATEGORY_JOINER,
                sub.order,
                SORT_KEY_SEPARATOR,
                sub.name,
                width = width
            ),
        }
    }

    /// 展示用名称（不含排序前缀）
    pub fn display(&self) -> String {
        match &self.sub {
            None => self.main.clone(),
            Some(sub) => format!("{}{}{}", self.main, CATEGORY_JOINER, sub.name),
        }
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // 无子分类的明细排在同一主分类的子分类之前
        self.main.cmp(&other.main).then_with(|| match (&self.sub, &other.sub) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)),
        })
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ==========================================
// BudgetItem - 预算明细（输出单元）
// ==========================================
// 序列化字段名与下游项目数据保持一致 (camelCase)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: u32,                    // 1 起始的顺序号
    pub category: String,           // 分类字符串（可能含排序前缀）
    pub name: String,               // 工作项名称（已去除序号前缀）
    pub unit: String,               // 单位
    pub volume: f64,                // 工程量（> 0）
    pub unit_price: f64,            // 单价
    pub progress: f64,              // 进度（导入时恒为 0）
    pub is_addendum: bool,          // 是否为追加项（导入时恒为 false）
    pub category_key: CategoryKey,  // 分类复合键
}

impl BudgetItem {
    /// 明细金额 = 工程量 × 单价
    pub fn total_price(&self) -> f64 {
        self.volume * self.unit_price
    }

    /// 展示用分类名称
    pub fn display_category(&self) -> String {
        self.category_key.display()
    }
}

/// 去掉分类字符串中的排序前缀
///
/// `"A. PEKERJAAN - 0007||Galian"` → `"A. PEKERJAAN - Galian"`
pub fn display_category(category: &str) -> String {
    category
        .split(CATEGORY_JOINER)
        .map(strip_sort_prefix)
        .collect::<Vec<_>>()
        .join(CATEGORY_JOINER)
}

fn strip_sort_prefix(segment: &str) -> &str {
    match segment.split_once(SORT_KEY_SEPARATOR) {
        Some((prefix, rest)) if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        _ => segment,
    }
}

/// 按分类复合键稳定排序（同一分类内保持原有顺序）
pub fn sort_items_by_category(items: &mut [BudgetItem]) {
    items.sort_by(|a, b| a.category_key.cmp(&b.category_key));
}
