// ==========================================
// RAB 导入引擎 - 分类状态机
// ==========================================
// 职责: 将逐行分类结果折叠为两级分类状态，并产出待发射的明细
// 红线: 新主分类必然清空子分类；噪声行不改变状态
// ==========================================

use crate::domain::budget::{CategoryKey, SubCategory};
use crate::importer::row_classifier::{DataRow, RowKind};
use tracing::debug;

// ==========================================
// RowPolicy - 数据行可计费策略
// ==========================================
// 默认策略: 工程量 > 0 才计入（只有单价没有工程量的行不可计费）
pub trait RowPolicy: Send + Sync {
    fn is_actionable_row(&self, row: &DataRow) -> bool;
}

/// 默认策略：工程量为正
#[derive(Debug, Clone, Copy, Default)]
pub struct BillableRowPolicy;

impl RowPolicy for BillableRowPolicy {
    fn is_actionable_row(&self, row: &DataRow) -> bool {
        row.volume > 0.0
    }
}

// ==========================================
// CategoryState - 当前分类状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryState {
    pub main_category: String,
    pub sub_category: Option<SubCategory>,
    /// 是否已由表格行确立主分类（默认占位不算）
    pub main_established: bool,
}

impl CategoryState {
    pub fn new(default_main: impl Into<String>) -> Self {
        Self {
            main_category: default_main.into(),
            sub_category: None,
            main_established: false,
        }
    }

    pub fn current_key(&self) -> CategoryKey {
        CategoryKey {
            main: self.main_category.clone(),
            sub: self.sub_category.clone(),
        }
    }

    fn enter_main(&mut self, title: String) {
        self.main_category = title;
        self.sub_category = None;
        self.main_established = true;
    }
}

// ==========================================
// 状态迁移结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Ignored,
    MainCategory,
    SubCategory,
    Dropped,
    Emit(CategoryKey, DataRow),
}

// ==========================================
// CategoryStateMachine
// ==========================================
pub struct CategoryStateMachine<'p> {
    state: CategoryState,
    policy: &'p dyn RowPolicy,
}

impl<'p> CategoryStateMachine<'p> {
    pub fn new(default_main: impl Into<String>, policy: &'p dyn RowPolicy) -> Self {
        Self {
            state: CategoryState::new(default_main),
            policy,
        }
    }

    pub fn state(&self) -> &CategoryState {
        &self.state
    }

    /// 应用一行分类结果
    ///
    /// # 参数
    /// - row_index: 该行在表格中的位置（用作子分类排序键）
    /// - kind: 行分类结果
    pub fn apply(&mut self, row_index: usize, kind: RowKind) -> Transition {
        match kind {
            RowKind::Noise(reason) => {
                debug!(row_index, ?reason, "跳过噪声行");
                Transition::Ignored
            }
            RowKind::MainHeader { title } => {
                debug!(row_index, title = %title, "主分类");
                self.state.enter_main(title);
                Transition::MainCategory
            }
            RowKind::SubHeader { title } if !self.state.main_established => {
                // 没有字母序号的表格：第一条分类行直接作为主分类
                debug!(row_index, title = %title, "无序号主分类");
                self.state.enter_main(title);
                Transition::MainCategory
            }
            RowKind::SubHeader { title } => {
                debug!(row_index, title = %title, "子分类");
                self.state.sub_category = Some(SubCategory {
                    name: title,
                    order: row_index,
                });
                Transition::SubCategory
            }
            RowKind::DataRow(data) => {
                if self.policy.is_actionable_row(&data) {
                    Transition::Emit(self.state.current_key(), data)
                } else {
                    debug!(row_index, name = %data.name, "无工程量，丢弃");
                    Transition::Dropped
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str, volume: f64) -> RowKind {
        RowKind::DataRow(DataRow {
            name: name.to_string(),
            unit: "m3".to_string(),
            volume,
            unit_price: 1000.0,
        })
    }

    fn main(title: &str) -> RowKind {
        RowKind::MainHeader {
            title: title.to_string(),
        }
    }

    fn sub(title: &str) -> RowKind {
        RowKind::SubHeader {
            title: title.to_string(),
        }
    }

    #[test]
    fn test_default_main_category() {
        let policy = BillableRowPolicy;
        let mut machine = CategoryStateMachine::new("Informasi Umum", &policy);

        match machine.apply(0, data("Direksi Keet", 1.0)) {
            Transition::Emit(key, _) => assert_eq!(key, CategoryKey::main_only("Informasi Umum")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_main_resets_sub() {
        let policy = BillableRowPolicy;
        let mut machine = CategoryStateMachine::new("Informasi Umum", &policy);

        machine.apply(1, main("A. PERSIAPAN"));
        machine.apply(2, sub("Pengukuran"));
        assert!(machine.state().sub_category.is_some());

        machine.apply(5, main("B. STRUKTUR"));
        assert_eq!(machine.state().main_category, "B. STRUKTUR");
        assert!(machine.state().sub_category.is_none());
    }

    #[test]
    fn test_first_unindexed_header_becomes_main() {
        let policy = BillableRowPolicy;
        let mut machine = CategoryStateMachine::new("Informasi Umum", &policy);

        assert_eq!(machine.apply(3, sub("PEKERJAAN PERSIAPAN")), Transition::MainCategory);
        assert_eq!(machine.apply(4, sub("Pengukuran")), Transition::SubCategory);

        match machine.apply(5, data("Bowplank", 24.0)) {
            Transition::Emit(key, _) => {
                assert_eq!(key, CategoryKey::with_sub("PEKERJAAN PERSIAPAN", "Pengukuran", 4))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_zero_volume_dropped() {
        let policy = BillableRowPolicy;
        let mut machine = CategoryStateMachine::new("Informasi Umum", &policy);
        assert_eq!(machine.apply(0, data("Mobilisasi", 0.0)), Transition::Dropped);
        assert_eq!(machine.apply(1, data("Retur", -2.0)), Transition::Dropped);
    }

    #[test]
    fn test_noise_does_not_change_state() {
        use crate::importer::row_classifier::NoiseReason;

        let policy = BillableRowPolicy;
        let mut machine = CategoryStateMachine::new("Informasi Umum", &policy);
        machine.apply(1, main("A. PERSIAPAN"));
        let before = machine.state().clone();

        assert_eq!(machine.apply(2, RowKind::Noise(NoiseReason::Keyword)), Transition::Ignored);
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_custom_policy_keeps_placeholders() {
        struct KeepAll;
        impl RowPolicy for KeepAll {
            fn is_actionable_row(&self, _row: &DataRow) -> bool {
                true
            }
        }

        let policy = KeepAll;
        let mut machine = CategoryStateMachine::new("Informasi Umum", &policy);
        assert!(matches!(machine.apply(0, data("Mobilisasi", 0.0)), Transition::Emit(..)));
    }
}
