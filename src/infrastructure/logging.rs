//! 日志初始化
//!
//! 诊断信息通过 tracing 输出到标准错误，用户可见的进度和汇总仍然直接打印到标准输出

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// 默认过滤规则：`RUST_LOG` 优先，否则 verbose 时为 debug，平时只显示警告
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "deployenv=debug"
    } else {
        "deployenv=warn"
    }
}

/// 初始化全局日志（多次调用只生效一次）
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init();
    });
}
