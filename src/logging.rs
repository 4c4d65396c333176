//! 日志初始化。
//!
//! 宿主进程启动时调用一次 [`init`]；默认级别 `info`，可通过 `RUST_LOG` 覆盖。

/// 初始化 `env_logger`。重复调用是安全的，后续调用不会覆盖已安装的 logger。
pub fn init() {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
    if result.is_ok() {
        log::info!("日志系统已初始化");
    }
}
