use super::{AsAny, EventId, Timestamp};
use crate::integration_event::IntegrationEvent;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 事件的公共形态：标识、发生时间与类型标签
pub trait Event: AsAny + fmt::Debug {
    /// 事件唯一标识
    fn event_id(&self) -> EventId;

    /// 事件发生时间
    fn occurred_at(&self) -> Timestamp;

    /// 事件类型（稳定的类型标签，例如完整类型路径或 `order.created`）
    fn event_type(&self) -> &str;
}

/// 领域事件：聚合内部记录的业务事实，尚不适合直接对外传输
pub trait DomainEvent: Event {
    /// 是否声明可直接包装为集成事件（无需自定义映射规则）
    fn has_integration_event(&self) -> bool {
        false
    }

    /// 包装为集成事件（`IntegrationEventWrapper<Self>`），被包装的是同一个实例
    ///
    /// `#[domain_event(integration)]` 会生成该实现；手写的事件返回 `None`，
    /// 需通过包装器注册表登记。
    fn into_integration_event(self: Arc<Self>) -> Option<Arc<dyn IntegrationEvent>> {
        None
    }
}

/// 可按原样跨边界传输的领域事件
///
/// 实现者还应覆写 `DomainEvent::has_integration_event` 返回 `true`，
/// `#[domain_event(integration)]` 会同时生成两者。
pub trait HasIntegrationEvent: DomainEvent + Serialize {}
