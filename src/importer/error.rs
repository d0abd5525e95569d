// ==========================================
// RAB 导入引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 提示语: 印尼语（产品运行区域），英文由 i18n 模块提供
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File tidak ditemukan: {0}")]
    FileNotFound(String),

    #[error("Format file tidak didukung: {0} (hanya .xlsx/.xlsm/.xlsb/.xls/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("Gagal membaca file: {0}")]
    FileReadError(String),

    #[error("Gagal membaca Excel: {0}")]
    ExcelParseError(String),

    #[error("Gagal membaca CSV: {0}")]
    CsvParseError(String),

    // ===== 工作表相关错误 =====
    #[error("Sheet tidak ditemukan: {0}")]
    SheetNotFound(String),

    #[error("Sheet kosong atau format Excel tidak didukung.")]
    EmptySheet { sheet: String },

    #[error("Tidak ada item pekerjaan yang terdeteksi.")]
    NoItemsDetected { sheet: String },

    // ===== 配置错误 =====
    #[error("Gagal membaca konfigurasi ({key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("Nilai konfigurasi tidak valid ({key} = {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("Kesalahan internal: {0}")]
    InternalError(String),
}

impl ImportError {
    /// 稳定的错误代码（供调用方分支处理）
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::FileNotFound(_) => "FILE_NOT_FOUND",
            ImportError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ImportError::FileReadError(_) => "FILE_READ_ERROR",
            ImportError::ExcelParseError(_) => "EXCEL_PARSE_ERROR",
            ImportError::CsvParseError(_) => "CSV_PARSE_ERROR",
            ImportError::SheetNotFound(_) => "SHEET_NOT_FOUND",
            ImportError::EmptySheet { .. } => "EMPTY_SHEET",
            ImportError::NoItemsDetected { .. } => "NO_ITEMS_DETECTED",
            ImportError::ConfigReadError { .. } => "CONFIG_READ_ERROR",
            ImportError::ConfigValueError { .. } => "CONFIG_VALUE_ERROR",
            ImportError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为解码器层面的错误（原样透传，不做解释）
    pub fn is_decoder_error(&self) -> bool {
        matches!(
            self,
            ImportError::FileReadError(_)
                | ImportError::ExcelParseError(_)
                | ImportError::CsvParseError(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::InternalError(format!("JSON: {}", err))
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let err = ImportError::EmptySheet {
            sheet: "RAB".to_string(),
        };
        assert_eq!(err.to_string(), "Sheet kosong atau format Excel tidak didukung.");

        let err = ImportError::NoItemsDetected {
            sheet: "RAB".to_string(),
        };
        assert_eq!(err.to_string(), "Tidak ada item pekerjaan yang terdeteksi.");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ImportError::UnsupportedFormat("pdf".to_string()).kind(),
            "UNSUPPORTED_FORMAT"
        );
        assert!(ImportError::ExcelParseError("bad zip".to_string()).is_decoder_error());
        assert!(!ImportError::NoItemsDetected { sheet: String::new() }.is_decoder_error());
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = vec![
            ImportError::FileNotFound("rab.xlsx".to_string()),
            ImportError::UnsupportedFormat("pdf".to_string()),
            ImportError::FileReadError(String::new()),
            ImportError::ExcelParseError(String::new()),
            ImportError::CsvParseError(String::new()),
            ImportError::SheetNotFound("RAB".to_string()),
            ImportError::EmptySheet { sheet: String::new() },
            ImportError::NoItemsDetected { sheet: String::new() },
            ImportError::ConfigReadError {
                key: "config".to_string(),
                message: String::new(),
            },
            ImportError::ConfigValueError {
                key: "sort_key_width".to_string(),
                value: "0".to_string(),
                message: String::new(),
            },
            ImportError::InternalError(String::new()),
        ];

        let mut kinds: Vec<&str> = errors.iter().map(ImportError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_from_json_error_is_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ImportError = json_err.into();
        assert_eq!(err.kind(), "INTERNAL_ERROR");
        assert!(err.to_string().starts_with("Kesalahan internal: JSON"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ImportError = io.into();
        assert_eq!(err.kind(), "FILE_READ_ERROR");
    }
}
