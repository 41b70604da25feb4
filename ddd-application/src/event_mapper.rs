use ddd_domain::domain_event::DomainEvent;
use ddd_domain::integration_event::IntegrationEvent;
use std::sync::Arc;

/// 事件映射器（Event Mapper）
///
/// - 将领域事件转换为至多一个集成事件；
/// - 纯函数：不做 I/O，不修改输入；
/// - 未知的事件类型返回 `None`，不视为错误。
pub trait EventMapper: Send + Sync {
    /// 映射单个领域事件
    fn map(&self, event: &dyn DomainEvent) -> Option<Arc<dyn IntegrationEvent>>;

    /// 逐个映射，丢弃无对应规则的事件，保持输入顺序
    fn map_all(&self, events: &[Arc<dyn DomainEvent>]) -> Vec<Arc<dyn IntegrationEvent>> {
        events.iter().filter_map(|e| self.map(e.as_ref())).collect()
    }
}
