// ==========================================
// RAB 导入引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON 文件（RAB_IMPORT_CONFIG 环境变量 > 用户配置目录 > 内置默认值）
// ==========================================

use crate::config::import_config::{ImportConfigReader, RabImportConfig};
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "RAB_IMPORT_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Clone)]
pub struct ConfigManager {
    path: Option<PathBuf>,
    config: Arc<RwLock<RabImportConfig>>,
}

impl ConfigManager {
    /// 使用内存配置创建（不关联文件）
    pub fn new(config: RabImportConfig) -> ImportResult<Self> {
        validate(&config)?;
        Ok(Self {
            path: None,
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 从指定 JSON 文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let config = read_config_file(path)?;
        info!(path = %path.display(), "已加载导入配置");

        Ok(Self {
            path: Some(path.to_path_buf()),
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 加载默认配置
    ///
    /// 查找顺序:
    /// 1. 环境变量 RAB_IMPORT_CONFIG 指定的文件（文件必须存在）
    /// 2. 用户配置目录下的 rab-import/config.json（存在时）
    /// 3. 内置默认值
    pub fn load_default() -> ImportResult<Self> {
        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                return Self::load_from_file(env_path);
            }
        }

        if let Some(path) = get_default_config_path() {
            if path.exists() {
                return Self::load_from_file(path);
            }
            debug!(path = %path.display(), "默认配置文件不存在，使用内置默认值");
        }

        Self::new(RabImportConfig::default())
    }

    /// 关联的配置文件路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 当前配置快照
    pub fn current(&self) -> ImportResult<RabImportConfig> {
        let guard = self
            .config
            .read()
            .map_err(|e| ImportError::InternalError(format!("配置锁获取失败: {}", e)))?;
        Ok(guard.clone())
    }

    /// 覆写配置（仅内存，不回写文件）
    pub fn update<F>(&self, f: F) -> ImportResult<()>
    where
        F: FnOnce(&mut RabImportConfig),
    {
        let mut guard = self
            .config
            .write()
            .map_err(|e| ImportError::InternalError(format!("配置锁获取失败: {}", e)))?;

        let mut candidate = guard.clone();
        f(&mut candidate);
        validate(&candidate)?;
        *guard = candidate;
        Ok(())
    }

    /// 重新读取配置文件（未关联文件时无操作）
    pub fn reload(&self) -> ImportResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let fresh = read_config_file(path)?;
        let mut guard = self
            .config
            .write()
            .map_err(|e| ImportError::InternalError(format!("配置锁获取失败: {}", e)))?;
        *guard = fresh;
        info!(path = %path.display(), "导入配置已重新加载");
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 写入导入日志，便于复现解析结果
    pub fn config_snapshot(&self) -> ImportResult<String> {
        let config = self.current()?;
        serde_json::to_string(&config).map_err(ImportError::from)
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_import_config(&self) -> ImportResult<RabImportConfig> {
        self.current()
    }
}

/// 默认配置文件路径: <config_dir>/rab-import/config.json
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rab-import").join("config.json"))
}

fn read_config_file(path: &Path) -> ImportResult<RabImportConfig> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path)?;
    let config: RabImportConfig =
        serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;

    validate(&config)?;
    Ok(config)
}

/// 校验配置取值
pub fn validate(config: &RabImportConfig) -> ImportResult<()> {
    if config.header_scan_rows == 0 {
        return Err(ImportError::ConfigValueError {
            key: "header_scan_rows".to_string(),
            value: "0".to_string(),
            message: "扫描行数必须大于 0".to_string(),
        });
    }

    if config.sort_key_width == 0 {
        return Err(ImportError::ConfigValueError {
            key: "sort_key_width".to_string(),
            value: "0".to_string(),
            message: "排序前缀宽度必须大于 0".to_string(),
        });
    }

    if config.default_main_category.trim().is_empty() {
        warn!("default_main_category 为空，未分类明细将没有主分类名称");
    }

    Ok(())
}
