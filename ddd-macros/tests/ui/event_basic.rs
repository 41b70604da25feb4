use ddd_domain::domain_event::{DomainEvent, Event};
use ddd_macros::domain_event;

#[domain_event]
struct OrderCreated {
    order_id: String,
    amount: u64,
}

#[domain_event(event_type = "order.cancelled")]
#[derive(PartialEq)]
struct OrderCancelled {
    order_id: String,
}

fn main() {
    let created = OrderCreated::new("o-1".to_string(), 10);
    assert!(created.event_type().ends_with("::OrderCreated"));
    assert!(!created.has_integration_event());
    assert_eq!(created.amount, 10);

    let cancelled = OrderCancelled::new("o-1".to_string());
    assert_eq!(cancelled.event_type(), "order.cancelled");
    assert_eq!(OrderCancelled::EVENT_TYPE, "order.cancelled");
    assert_eq!(cancelled.clone(), cancelled);
    assert_ne!(cancelled.event_id(), created.event_id());
}
