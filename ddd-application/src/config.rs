use crate::error::AppError;
use serde::Deserialize;
use std::env;

/// 包装与映射并存时的处理策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapPolicy {
    /// 每个事件独立处理：可包装的直接包装，其余交给映射器，保持输入顺序
    #[default]
    Merge,
    /// 兼容旧行为：批次中只要有事件被包装，映射器整批跳过
    Exclusive,
}

impl WrapPolicy {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "exclusive" => Ok(Self::Exclusive),
            other => Err(AppError::Validation(format!(
                "{ENV_WRAP_POLICY}: expected 'merge' or 'exclusive', got '{other}'"
            ))),
        }
    }
}

pub const ENV_WRAP_POLICY: &str = "DDD_BUS_WRAP_POLICY";
pub const ENV_STOP_ON_CANCEL: &str = "DDD_BUS_STOP_ON_CANCEL";

/// 总线发布器配置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusPublisherConfig {
    /// 包装与映射的并存策略
    pub wrap_policy: WrapPolicy,
    /// 取消后停止发布剩余事件；关闭时仍逐个交给传输层自行判断
    pub stop_on_cancel: bool,
}

impl Default for BusPublisherConfig {
    fn default() -> Self {
        Self {
            wrap_policy: WrapPolicy::Merge,
            stop_on_cancel: true,
        }
    }
}

impl BusPublisherConfig {
    /// 从环境变量读取配置，未设置的项取默认值
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup(ENV_WRAP_POLICY) {
            cfg.wrap_policy = WrapPolicy::parse(&v)?;
        }

        if let Some(v) = lookup(ENV_STOP_ON_CANCEL) {
            cfg.stop_on_cancel = match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                other => {
                    return Err(AppError::Validation(format!(
                        "{ENV_STOP_ON_CANCEL}: expected 'true' or 'false', got '{other}'"
                    )));
                }
            };
        }

        Ok(cfg)
    }
}
