//! 日志基础设施

use std::backtrace::Backtrace;
use std::panic;

use tracing::error;
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// 初始化全局日志，`RUST_LOG` 优先于配置的级别
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    /// panic 时把位置和调用栈写入日志
    pub fn install_panic_hook() {
        panic::set_hook(Box::new(|info| {
            let backtrace = Backtrace::force_capture();
            error!(panic = %info, "处理器 panic\n{backtrace}");
        }));
    }
}
