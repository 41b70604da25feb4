use ddd_domain::domain_event::{DomainEvent, Event, HasIntegrationEvent};
use ddd_domain::integration_event::IntegrationEvent;
use ddd_macros::{domain_event, integration_event};

#[domain_event(event_type = "order.shipped", integration)]
struct OrderShipped {
    order_id: String,
}

#[integration_event]
struct OrderCreatedIntegrationEvent {
    order_id: String,
    amount: u64,
}

fn assert_wrappable<E: HasIntegrationEvent>(_: &E) {}

fn main() {
    let shipped = OrderShipped::new("o-1".to_string());
    assert!(shipped.has_integration_event());
    assert_wrappable(&shipped);

    let integration = OrderCreatedIntegrationEvent::new("o-1".to_string(), 42);
    assert_eq!(integration.event_type(), "OrderCreatedIntegrationEvent");
    let payload = integration.to_payload().unwrap();
    assert_eq!(payload["order_id"], "o-1");
    assert_eq!(payload["amount"], 42);
}
