use async_trait::async_trait;
use ddd_domain::domain_event::DomainEvent;
use ddd_domain::integration_event::IntegrationEvent;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 总线发布器（Bus Publisher）
///
/// - 领域事件入口：包装或映射为集成事件后逐个发布；
/// - 集成事件入口：跳过映射直接发布；
/// - 单个事件失败不影响其余事件，调用本身不返回错误；
/// - `None` 表示没有可处理的输入，仅记录警告。
#[async_trait]
pub trait BusPublisher: Send + Sync {
    async fn send_domain_event(&self, event: Arc<dyn DomainEvent>, cancel: &CancellationToken) {
        self.send_domain_events(Some(vec![event]), cancel).await
    }

    async fn send_domain_events(
        &self,
        events: Option<Vec<Arc<dyn DomainEvent>>>,
        cancel: &CancellationToken,
    );

    async fn send_integration_event(
        &self,
        event: Arc<dyn IntegrationEvent>,
        cancel: &CancellationToken,
    ) {
        self.send_integration_events(Some(vec![event]), cancel)
            .await
    }

    async fn send_integration_events(
        &self,
        events: Option<Vec<Arc<dyn IntegrationEvent>>>,
        cancel: &CancellationToken,
    );
}
