// ==========================================
// RAB 导入引擎 - 配置层
// ==========================================
// 职责: 解析参数管理,支持文件配置与内存覆写
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod import_config;

// 重导出核心配置管理器
pub use config_manager::{get_default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use import_config::{FallbackLayout, ImportConfigReader, RabImportConfig};
