use log::{debug, error, LevelFilter};
use std::fmt::Display;
use std::future::Future;

/// Initializes the process-wide logger once; later calls are no-ops.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(default_level.to_string());
    // 已初始化时 try_init 返回 Err，忽略即可
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Logs the call before running it, and logs then returns any error unchanged.
pub async fn logged<T, E, Fut>(name: &str, signature: &str, call: Fut) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    debug!("function {} called with args {}", name, signature);
    match call.await {
        Ok(value) => Ok(value),
        Err(e) => {
            error!("Exception raised in {}. exception: {}", name, e);
            Err(e)
        }
    }
}
