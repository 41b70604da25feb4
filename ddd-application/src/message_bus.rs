//! 消息总线（MessageBus）协议
//!
//! 集成事件的传输抽象：按主题（集成事件类型名）异步发布，
//! 投递保证与重试由具体传输实现负责。
//!
use async_trait::async_trait;
use ddd_domain::error::DomainResult;
use ddd_domain::integration_event::IntegrationEvent;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 消息总线：负责把集成事件投递到外部
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// 发布一个集成事件，`topic` 为路由键
    async fn publish(
        &self,
        topic: &str,
        event: Arc<dyn IntegrationEvent>,
        cancel: &CancellationToken,
    ) -> DomainResult<()>;
}
