// ==========================================
// 国际化 (i18n)
// ==========================================
// 目录: locales/id.yml（默认）、locales/en.yml
// 错误信息的 Display 固定为印尼语，界面文案经由此处按当前语言输出
// 目录在 lib.rs 中通过 rust_i18n::i18n! 加载
// ==========================================

use crate::importer::error::ImportError;

/// 支持的语言代码
pub const SUPPORTED_LOCALES: &[&str] = &["id", "en"];

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 切换语言，未知代码退回印尼语
pub fn set_locale(locale: &str) {
    let code = locale.trim().to_lowercase();
    if SUPPORTED_LOCALES.contains(&code.as_str()) {
        rust_i18n::set_locale(&code);
    } else {
        rust_i18n::set_locale("id");
    }
}

/// 按当前语言取文案
///
/// ```no_run
/// let msg = rab_import::i18n::t("error.empty_sheet");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 取文案并替换 `%{name}` 占位符
///
/// ```no_run
/// use rab_import::i18n::t_with_args;
/// let msg = t_with_args("error.sheet_not_found", &[("sheet", "RAB")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |text, (name, value)| {
        text.replace(&format!("%{{{}}}", name), value)
    })
}

/// 面向用户的错误提示（当前语言）
pub fn localized_message(err: &ImportError) -> String {
    match err {
        ImportError::FileNotFound(path) => {
            t_with_args("error.file_not_found", &[("path", path.as_str())])
        }
        ImportError::UnsupportedFormat(ext) => {
            t_with_args("error.unsupported_format", &[("ext", ext.as_str())])
        }
        ImportError::FileReadError(detail)
        | ImportError::ExcelParseError(detail)
        | ImportError::CsvParseError(detail) => {
            t_with_args("error.unreadable_file", &[("detail", detail.as_str())])
        }
        ImportError::SheetNotFound(sheet) => {
            t_with_args("error.sheet_not_found", &[("sheet", sheet.as_str())])
        }
        ImportError::EmptySheet { .. } => t("error.empty_sheet"),
        ImportError::NoItemsDetected { .. } => t("error.no_items_detected"),
        ImportError::ConfigReadError { key, message } => t_with_args(
            "error.config_invalid",
            &[("key", key.as_str()), ("detail", message.as_str())],
        ),
        ImportError::ConfigValueError { key, message, .. } => t_with_args(
            "error.config_invalid",
            &[("key", key.as_str()), ("detail", message.as_str())],
        ),
        ImportError::InternalError(detail) => {
            t_with_args("error.internal", &[("detail", detail.as_str())])
        }
    }
}
