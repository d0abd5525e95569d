// ==========================================
// 日志系统初始化
// ==========================================
// 日志一律写 stderr，stdout 只输出导入报告
// 环境变量:
//   RUST_LOG               过滤器（默认 rab_import=info）
//   RAB_IMPORT_LOG_FORMAT  text | json
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FORMAT_ENV: &str = "RAB_IMPORT_LOG_FORMAT";

const DEFAULT_FILTER: &str = "rab_import=info";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// 解析格式名，无法识别时退回文本格式
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 按环境变量选择格式并初始化
///
/// # 示例
/// ```no_run
/// use rab_import::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with(LogFormat::from_env());
}

/// 以指定格式初始化（JSON 供日志采集使用）
pub fn init_with(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.with_target(true).with_line_number(true).init(),
        LogFormat::Json => builder.json().with_current_span(true).init(),
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("rab_import=debug"))
        .with_test_writer()
        .try_init();
}
