use ddd_domain::error::DomainError;
use ddd_domain::integration_event::IntegrationEvent;
use tracing::error;

/// 单个集成事件发布失败时的处理策略
///
/// 发布循环在调用处理器后继续处理下一个事件，处理器不能中断批次。
pub trait PublishFailureHandler: Send + Sync {
    fn on_publish_failed(&self, event: &dyn IntegrationEvent, err: &DomainError);
}

/// 默认策略：记录错误日志后吸收
#[derive(Clone, Copy, Debug, Default)]
pub struct LogPublishFailure;

impl PublishFailureHandler for LogPublishFailure {
    fn on_publish_failed(&self, event: &dyn IntegrationEvent, err: &DomainError) {
        error!(
            event_id = %event.event_id(),
            event_type = event.event_type(),
            error = %err,
            "failed to publish integration event"
        );
    }
}
