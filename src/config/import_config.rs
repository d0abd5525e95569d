// ==========================================
// RAB 导入引擎 - 导入配置
// ==========================================
// 职责: 定义解析启发式的可调参数（扫描窗口、同义词、兜底布局、噪声规则）
// 红线: 不包含解析逻辑
// ==========================================

use crate::domain::types::NumberLocalePolicy;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ==========================================
// FallbackLayout - 未识别到表头时的固定列布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackLayout {
    pub number_col: usize,
    pub name_col: usize,
    pub unit_col: usize,
    pub volume_col: usize,
    pub price_col: usize,
    pub data_start_row: usize,
}

impl Default for FallbackLayout {
    fn default() -> Self {
        Self {
            number_col: 0,
            name_col: 1,
            unit_col: 4,
            volume_col: 5,
            price_col: 6,
            data_start_row: 6,
        }
    }
}

/// 表头扫描行数默认值（CSV 分隔符探测也使用同一窗口）
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 25;

// ==========================================
// RabImportConfig - 导入配置全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RabImportConfig {
    /// 表头扫描行数上限
    pub header_scan_rows: usize,

    /// 工作表名同义词（不区分大小写的包含匹配）
    pub sheet_synonyms: Vec<String>,

    /// 兜底列布局
    pub fallback_layout: FallbackLayout,

    /// 名称以这些前缀开头的行视为噪声（大写比较）
    pub noise_prefixes: Vec<String>,

    /// 名称包含这些片段的行视为噪声（大写比较）
    pub noise_contains: Vec<String>,

    /// 尚未识别主分类时使用的默认主分类
    pub default_main_category: String,

    /// 子分类排序前缀的补零宽度
    pub sort_key_width: usize,

    /// 是否在分类字符串中编码子分类排序前缀
    pub encode_sort_key_in_category: bool,

    /// 数值区域解析策略
    pub number_policy: NumberLocalePolicy,

    /// 用户提示语言
    pub locale: String,
}

impl Default for RabImportConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            sheet_synonyms: vec!["RAB".to_string(), "BOQ".to_string(), "BUDGET".to_string()],
            fallback_layout: FallbackLayout::default(),
            noise_prefixes: vec![
                "SUB TOTAL".to_string(),
                "TOTAL".to_string(),
                "GRAND".to_string(),
                "DIBUAT".to_string(),
                "DISETUJUI".to_string(),
            ],
            noise_contains: vec!["PPN".to_string()],
            default_main_category: "Informasi Umum".to_string(),
            sort_key_width: 4,
            encode_sort_key_in_category: true,
            number_policy: NumberLocalePolicy::IndonesianV1,
            locale: "id".to_string(),
        }
    }
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入器所需的配置读取接口
// 实现者: ConfigManager（文件配置）, RabImportConfig（内存配置）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取当前生效的导入配置快照
    async fn get_import_config(&self) -> ImportResult<RabImportConfig>;
}

#[async_trait]
impl ImportConfigReader for RabImportConfig {
    async fn get_import_config(&self) -> ImportResult<RabImportConfig> {
        Ok(self.clone())
    }
}
