// ==========================================
// RAB 导入引擎 - 表头定位
// ==========================================
// 职责: 在前 N 行中识别表头行并推导列映射
// 规则: 名称列与工程量列同时存在才算表头；单位 / 单价列可缺失
// 兜底: 未识别时使用固定布局（不报错）
// ==========================================

use crate::config::import_config::FallbackLayout;
use crate::domain::import::ColumnMap;
use crate::domain::types::{CellValue, ColumnMapSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

const NAME_KEYWORDS: &[&str] = &["URAIAN", "PEKERJAAN", "ITEM"];
const VOLUME_EXACT: &[&str] = &["VOL"];
const VOLUME_KEYWORDS: &[&str] = &["VOLUME", "QTY", "JUMLAH"];
const UNIT_KEYWORDS: &[&str] = &["SAT", "UNIT"];
const PRICE_KEYWORDS: &[&str] = &["HARGA", "UPAH"];
const NUMBER_EXACT: &[&str] = &["NO", "NOMOR"];

// ==========================================
// HeaderCandidate - 候选列映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCandidate {
    pub column_map: ColumnMap,
    /// 置信分: 名称+工程量 2 分，单位 / 单价 / 序号列各加 1 分；兜底布局为 0
    pub score: u8,
}

#[derive(Default)]
struct RowMatch {
    number: Option<usize>,
    name: Option<usize>,
    volume: Option<usize>,
    unit: Option<usize>,
    price: Option<usize>,
}

/// 对单行打分，不满足表头条件返回 None
pub fn score_header_row(row: &[CellValue], row_index: usize) -> Option<HeaderCandidate> {
    let mut m = RowMatch::default();

    for (col, cell) in row.iter().enumerate() {
        let CellValue::Text(text) = cell else {
            continue;
        };
        let upper = text.trim().to_uppercase();
        if upper.is_empty() {
            continue;
        }

        // 每个单元格只承担一种角色，按优先级判定
        if m.number.is_none() && NUMBER_EXACT.contains(&upper.as_str()) {
            m.number = Some(col);
        } else if m.name.is_none() && contains_any(&upper, NAME_KEYWORDS) {
            m.name = Some(col);
        } else if m.volume.is_none()
            && (VOLUME_EXACT.contains(&upper.as_str()) || contains_any(&upper, VOLUME_KEYWORDS))
        {
            m.volume = Some(col);
        } else if m.price.is_none() && contains_any(&upper, PRICE_KEYWORDS) {
            m.price = Some(col);
        } else if m.unit.is_none() && contains_any(&upper, UNIT_KEYWORDS) {
            m.unit = Some(col);
        }
    }

    let (name_col, volume_col) = (m.name?, m.volume?);

    let score = 2
        + u8::from(m.unit.is_some())
        + u8::from(m.price.is_some())
        + u8::from(m.number.is_some());

    Some(HeaderCandidate {
        column_map: ColumnMap {
            number_col: m.number.unwrap_or(0),
            name_col,
            unit_col: m.unit,
            volume_col,
            price_col: m.price,
            header_row_index: row_index,
            source: ColumnMapSource::Detected,
        },
        score,
    })
}

/// 固定兜底布局
pub fn fallback_column_map(layout: &FallbackLayout) -> ColumnMap {
    ColumnMap {
        number_col: layout.number_col,
        name_col: layout.name_col,
        unit_col: Some(layout.unit_col),
        volume_col: layout.volume_col,
        price_col: Some(layout.price_col),
        header_row_index: layout.data_start_row.saturating_sub(1),
        source: ColumnMapSource::Fallback,
    }
}

/// 候选列映射列表
///
/// 识别到的表头按扫描顺序排列（越靠前越可信，后续匹配多为分页重复表头），
/// 兜底布局恒为最后一项，因此列表永不为空
pub fn header_candidates(
    grid: &[Vec<CellValue>],
    scan_rows: usize,
    fallback: &FallbackLayout,
) -> Vec<HeaderCandidate> {
    let mut candidates: Vec<HeaderCandidate> = grid
        .iter()
        .take(scan_rows)
        .enumerate()
        .filter_map(|(idx, row)| score_header_row(row, idx))
        .collect();

    candidates.push(HeaderCandidate {
        column_map: fallback_column_map(fallback),
        score: 0,
    });

    candidates
}

/// 定位表头并返回列映射（取排名第一的候选）
pub fn locate_header(
    grid: &[Vec<CellValue>],
    scan_rows: usize,
    fallback: &FallbackLayout,
) -> ColumnMap {
    let mut candidates = header_candidates(grid, scan_rows, fallback);
    let best = candidates.swap_remove(0);

    debug!(
        header_row = best.column_map.header_row_index,
        source = %best.column_map.source,
        score = best.score,
        "表头定位完成"
    );

    best.column_map
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
