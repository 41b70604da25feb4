//! 领域层统一错误定义
//!
//! 聚焦事件序列化、总线传输与领域规则校验的最小必要集合，
//! 便于在应用层统一转换。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- 事件总线 ---
    #[error("event bus error: {reason}")]
    EventBus { reason: String },
    #[error("operation cancelled")]
    Cancelled,

    // --- 领域规则/状态 ---
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
