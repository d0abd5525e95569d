// ==========================================
// RAB 导入引擎 - 预算导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到预算明细列表
// 流程: 读取文件 → 打开工作簿 → 选择工作表 → 解析网格 → 生成报告
// 说明: 读取文件是唯一的异步边界，解析本身为同步纯函数
// ==========================================

use crate::config::import_config::{ImportConfigReader, RabImportConfig};
use crate::domain::import::ImportReport;
use crate::importer::category_state::{BillableRowPolicy, RowPolicy};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{FileParser, UniversalFileParser};
use crate::importer::pipeline::{parse_grid, ParseOutcome};
use crate::importer::rab_importer_trait::RabImporter;
use crate::importer::sheet_selector::select_sheet;
use chrono::Utc;
use futures::future::join_all;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// RabImporterImpl - 预算导入器实现
// ==========================================
pub struct RabImporterImpl<C>
where
    C: ImportConfigReader,
{
    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    row_policy: Box<dyn RowPolicy>,
}

impl<C> RabImporterImpl<C>
where
    C: ImportConfigReader,
{
    /// 创建新的 RabImporter 实例
    ///
    /// # 参数
    /// - config: 配置读取器
    /// - file_parser: 文件解析器
    /// - row_policy: 数据行可计费策略
    pub fn new(config: C, file_parser: Box<dyn FileParser>, row_policy: Box<dyn RowPolicy>) -> Self {
        Self {
            config,
            file_parser,
            row_policy,
        }
    }

    /// 使用默认组件创建（按扩展名解析 + 工程量 > 0 策略）
    pub fn with_defaults(config: C) -> Self {
        Self::new(
            config,
            Box::new(UniversalFileParser),
            Box::new(BillableRowPolicy),
        )
    }

    /// 同步解析：打开工作簿 → 选择工作表 → 解析网格
    fn parse_workbook(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        sheet_override: Option<&str>,
        config: &RabImportConfig,
    ) -> ImportResult<(String, ParseOutcome)> {
        let mut workbook = self.file_parser.open(bytes, file_name)?;
        let sheet_names = workbook.sheet_names();
        debug!(sheets = ?sheet_names, "工作簿已打开");

        let sheet_name = match sheet_override {
            Some(name) => {
                if !sheet_names.iter().any(|s| s == name) {
                    return Err(ImportError::SheetNotFound(name.to_string()));
                }
                name.to_string()
            }
            None => select_sheet(&sheet_names, &config.sheet_synonyms)
                .map(str::to_string)
                .ok_or_else(|| ImportError::EmptySheet {
                    sheet: String::new(),
                })?,
        };
        info!(sheet = %sheet_name, "选择工作表");

        let grid = workbook.read_grid(&sheet_name)?;
        debug!(rows = grid.len(), "工作表读取完成");

        let outcome = parse_grid(&grid, &sheet_name, config, self.row_policy.as_ref())?;
        Ok((sheet_name, outcome))
    }
}

#[async_trait::async_trait]
impl<C> RabImporter for RabImporterImpl<C>
where
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file_path, sheet_override))]
    async fn import_from_path<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        sheet_override: Option<&str>,
    ) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            error!(error = %e, file = %path.display(), "文件读取失败");
            ImportError::from(e)
        })?;

        self.import_from_bytes(bytes, &file_name, sheet_override).await
    }

    #[instrument(skip(self, bytes, sheet_override), fields(batch_id))]
    async fn import_from_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        sheet_override: Option<&str>,
    ) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(batch_id = %batch_id, file = %file_name, size = bytes.len(), "开始导入预算表");

        let config = self.config.get_import_config().await?;

        let (sheet_name, outcome) = self
            .parse_workbook(bytes, file_name, sheet_override, &config)
            .map_err(|e| {
                error!(kind = e.kind(), error = %e, "预算表导入失败");
                e
            })?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            sheet = %sheet_name,
            items = outcome.summary.item_count,
            total_value = outcome.summary.total_value,
            elapsed_ms,
            "预算表导入完成"
        );

        Ok(ImportReport {
            batch_id,
            file_name: file_name.to_string(),
            sheet_name,
            column_map: outcome.column_map,
            items: outcome.items,
            summary: outcome.summary,
            imported_at: Utc::now(),
            elapsed_ms,
        })
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<ImportResult<ImportReport>> {
        info!(files = file_paths.len(), "开始批量导入");

        let tasks = file_paths
            .iter()
            .map(|path| self.import_from_path(path.as_ref(), None));
        let results = join_all(tasks).await;

        let success = results.iter().filter(|r| r.is_ok()).count();
        info!(
            success,
            failed = results.len() - success,
            "批量导入完成"
        );

        results
    }
}
