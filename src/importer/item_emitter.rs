// ==========================================
// RAB 导入引擎 - 明细发射器
// ==========================================
// 职责: 名称清理、分类字符串编码、分配 1 起始的顺序 ID
// 红线: 结果为空视为失败（NoItemsDetected）
// ==========================================

use crate::domain::budget::{BudgetItem, CategoryKey};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_classifier::DataRow;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 序号前缀: "1. " / "12) "，必须带空白，"12mm" 不会被误删
    static ref ORDINAL_PREFIX: Regex = Regex::new(r"^\d+[.)]\s+").unwrap();
}

/// 去掉名称开头的序号
pub fn normalize_item_name(name: &str) -> String {
    ORDINAL_PREFIX.replace(name.trim(), "").trim().to_string()
}

// ==========================================
// ItemEmitter
// ==========================================
pub struct ItemEmitter {
    sort_key_width: usize,
    encode_sort_key: bool,
    items: Vec<BudgetItem>,
}

impl ItemEmitter {
    pub fn new(sort_key_width: usize, encode_sort_key: bool) -> Self {
        Self {
            sort_key_width,
            encode_sort_key,
            items: Vec::new(),
        }
    }

    /// 追加一条明细，ID 按发射顺序递增
    pub fn emit(&mut self, key: CategoryKey, row: DataRow) -> &BudgetItem {
        let category = if self.encode_sort_key {
            key.encoded(self.sort_key_width)
        } else {
            key.display()
        };

        let id = self.items.len() as u32 + 1;
        self.items.push(BudgetItem {
            id,
            category,
            name: normalize_item_name(&row.name),
            unit: row.unit,
            volume: row.volume,
            unit_price: row.unit_price,
            progress: 0.0,
            is_addendum: false,
            category_key: key,
        });

        &self.items[self.items.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 结束发射并返回最终列表
    pub fn finish(self, sheet_name: &str) -> ImportResult<Vec<BudgetItem>> {
        if self.items.is_empty() {
            return Err(ImportError::NoItemsDetected {
                sheet: sheet_name.to_string(),
            });
        }
        Ok(self.items)
    }
}
