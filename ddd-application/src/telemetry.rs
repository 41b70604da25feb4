//! 日志初始化
//!
//! 通过 `DDD_LOG` 环境变量配置过滤规则，未设置时默认 `info`。

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const ENV_LOG: &str = "DDD_LOG";

/// 安装全局 tracing 订阅者；重复调用时保留已安装的订阅者
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
