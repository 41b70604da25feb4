use super::IntegrationEvent;
use crate::domain_event::{Event, EventMeta, HasIntegrationEvent};
use crate::error::DomainResult;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// 通用集成事件包装器：原样携带一个领域事件实例
///
/// 包装器拥有独立的标识与发生时间；载荷中的 `domain_event` 即被包装事件的序列化形态。
#[derive(Debug)]
pub struct IntegrationEventWrapper<E>
where
    E: HasIntegrationEvent,
{
    meta: EventMeta,
    event_type: String,
    domain_event: Arc<E>,
}

impl<E> IntegrationEventWrapper<E>
where
    E: HasIntegrationEvent,
{
    pub fn new(domain_event: Arc<E>) -> Self {
        let event_type = format!("IntegrationEventWrapper<{}>", domain_event.event_type());

        Self {
            meta: EventMeta::new(),
            event_type,
            domain_event,
        }
    }

    /// 被包装的领域事件（与聚合记录的是同一实例）
    pub fn domain_event(&self) -> &Arc<E> {
        &self.domain_event
    }
}

impl<E> Event for IntegrationEventWrapper<E>
where
    E: HasIntegrationEvent,
{
    fn event_id(&self) -> Uuid {
        self.meta.event_id()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.meta.occurred_at()
    }

    fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl<E> IntegrationEvent for IntegrationEventWrapper<E>
where
    E: HasIntegrationEvent,
{
    fn to_payload(&self) -> DomainResult<Value> {
        Ok(json!({
            "event_id": self.meta.event_id(),
            "occurred_at": self.meta.occurred_at(),
            "event_type": self.event_type,
            "domain_event": serde_json::to_value(self.domain_event.as_ref())?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::DomainEvent;
    use ddd_macros::domain_event;

    #[domain_event(event_type = "order.shipped", integration)]
    struct OrderShipped {
        order_id: String,
        carrier: String,
    }

    #[domain_event]
    #[derive(PartialEq)]
    struct OrderNoted {
        note: String,
    }

    #[test]
    fn wrapper_carries_the_same_instance() {
        let shipped = Arc::new(OrderShipped::new("o-1".into(), "ups".into()));
        let wrapper = IntegrationEventWrapper::new(shipped.clone());

        assert!(Arc::ptr_eq(wrapper.domain_event(), &shipped));
        assert_eq!(wrapper.event_type(), "IntegrationEventWrapper<order.shipped>");
        assert_ne!(wrapper.event_id(), shipped.event_id());
    }

    #[test]
    fn wrapper_payload_embeds_domain_event() {
        let shipped = Arc::new(OrderShipped::new("o-2".into(), "dhl".into()));
        let wrapper = IntegrationEventWrapper::new(shipped.clone());

        let payload = wrapper.to_payload().unwrap();
        assert_eq!(payload["event_type"], "IntegrationEventWrapper<order.shipped>");
        assert_eq!(payload["event_id"], wrapper.event_id().to_string());
        assert_eq!(payload["domain_event"]["order_id"], "o-2");
        assert_eq!(payload["domain_event"]["carrier"], "dhl");
        assert_eq!(
            payload["domain_event"]["meta"]["event_id"],
            shipped.event_id().to_string()
        );
    }

    #[test]
    fn only_marked_events_are_wrap_eligible() {
        let shipped = OrderShipped::new("o-3".into(), "ups".into());
        let noted = OrderNoted::new("hello".into());
        assert!(shipped.has_integration_event());
        assert!(!noted.has_integration_event());
        assert!(noted.event_type().ends_with("OrderNoted"));

        // 派生的 Deserialize 可还原事件
        let json = serde_json::to_value(&noted).unwrap();
        let back: OrderNoted = serde_json::from_value(json).unwrap();
        assert_eq!(back, noted);
    }
}
