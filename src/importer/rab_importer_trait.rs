// ==========================================
// RAB 导入引擎 - 预算导入 Trait
// ==========================================
// 职责: 定义预算表导入接口（不包含实现）
// ==========================================

use crate::domain::import::ImportReport;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// RabImporter Trait
// ==========================================
// 用途: 预算表导入主接口
// 实现者: RabImporterImpl
#[async_trait]
pub trait RabImporter: Send + Sync {
    /// 从文件路径导入预算明细
    ///
    /// # 参数
    /// - file_path: 表格文件路径（.xlsx/.xlsm/.xlsb/.xls/.ods/.csv）
    /// - sheet_override: 指定工作表名；None 时自动选择
    ///
    /// # 返回
    /// - Ok(ImportReport): 明细列表 + 列映射 + 汇总统计
    /// - Err: 文件读取错误 / 空表 / 未识别到明细
    ///
    /// # 导入流程（5个阶段）
    /// 1. 工作表选择
    /// 2. 表头定位
    /// 3. 数值标准化
    /// 4. 行分类与分类状态折叠
    /// 5. 明细发射
    async fn import_from_path<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        sheet_override: Option<&str>,
    ) -> ImportResult<ImportReport>;

    /// 从内存中的文件内容导入（上传场景）
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - file_name: 原始文件名（用于判断格式）
    /// - sheet_override: 指定工作表名
    async fn import_from_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        sheet_override: Option<&str>,
    ) -> ImportResult<ImportReport>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入是独立的，互不影响
    /// - 返回结果与输入顺序一致
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<ImportResult<ImportReport>>;
}
