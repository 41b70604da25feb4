use ddd_domain::aggregate::{Aggregate, Entity};
use ddd_macros::aggregate;
use uuid::Uuid;

#[aggregate(id = Uuid)]
#[derive(Debug, Clone, Default)]
struct Order {
    total: u64,
}

fn main() {
    let id = Uuid::new_v4();
    let order = Order::new(id);
    assert_eq!(*order.id(), id);
    assert_eq!(order.total, 0);
    assert!(order.domain_events().is_empty());
}
