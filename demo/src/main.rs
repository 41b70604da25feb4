use ddd_application::bus_publisher::BusPublisher;
use ddd_application::config::BusPublisherConfig;
use ddd_application::event_wrappers::IntegrationEventWrappers;
use ddd_application::telemetry::init_tracing;
use ddd_application::{EventBusPublisher, InMemoryEventMapper, InMemoryMessageBus};
use ddd_domain::aggregate::{Aggregate, Entity};
use ddd_domain::error::{DomainError, DomainResult};
use ddd_macros::{aggregate, domain_event, integration_event};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OrderStatus {
    #[default]
    Draft,
    Placed,
    Shipped,
    Delivered,
}

#[aggregate(id = Uuid)]
#[derive(Debug, Default)]
struct Order {
    status: OrderStatus,
    total_cents: u64,
}

#[domain_event(event_type = "order.placed")]
struct OrderPlaced {
    order_id: Uuid,
    total_cents: u64,
}

// 仅在领域内部使用，不对外发布
#[domain_event(event_type = "order.shipped")]
struct OrderShipped {
    order_id: Uuid,
    carrier: String,
}

// 原样对外发布
#[domain_event(event_type = "order.delivered", integration)]
struct OrderDelivered {
    order_id: Uuid,
}

#[integration_event(event_type = "orders.v1.placed")]
struct OrderPlacedV1 {
    order_id: String,
    total: f64,
}

impl Order {
    fn place(&mut self, total_cents: u64) -> DomainResult<()> {
        if self.status != OrderStatus::Draft {
            return Err(DomainError::InvalidState {
                reason: format!("cannot place order in {:?}", self.status),
            });
        }
        if total_cents == 0 {
            return Err(DomainError::InvalidCommand {
                reason: "order total must be > 0".into(),
            });
        }
        self.status = OrderStatus::Placed;
        self.total_cents = total_cents;
        self.add_domain_event(OrderPlaced::new(self.id, total_cents));
        Ok(())
    }

    fn ship(&mut self, carrier: &str) -> DomainResult<()> {
        if self.status != OrderStatus::Placed {
            return Err(DomainError::InvalidState {
                reason: format!("cannot ship order in {:?}", self.status),
            });
        }
        self.status = OrderStatus::Shipped;
        self.add_domain_event(OrderShipped::new(self.id, carrier.to_string()));
        Ok(())
    }

    fn deliver(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Shipped {
            return Err(DomainError::InvalidState {
                reason: format!("cannot deliver order in {:?}", self.status),
            });
        }
        self.status = OrderStatus::Delivered;
        self.add_domain_event(OrderDelivered::new(self.id));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = BusPublisherConfig::from_env()?;
    info!(?config, "bus publisher config loaded");

    // 启动期注册映射规则与可包装事件
    let mapper = InMemoryEventMapper::new();
    mapper.register::<OrderPlaced, _, _>(|e| {
        OrderPlacedV1::new(e.order_id.to_string(), e.total_cents as f64 / 100.0)
    })?;
    let wrappers = IntegrationEventWrappers::new();
    wrappers.register::<OrderDelivered>()?;

    let bus = InMemoryMessageBus::new(64);
    let mut messages = bus.subscribe();
    let consumer = tokio::spawn(async move {
        while let Some(msg) = messages.next().await {
            match msg {
                Ok(msg) => println!("[{}] {} {}", msg.topic, msg.event_id, msg.payload),
                Err(err) => eprintln!("subscriber error: {err}"),
            }
        }
    });

    let publisher = EventBusPublisher::builder()
        .message_bus(Arc::new(bus))
        .event_mapper(Arc::new(mapper))
        .wrappers(Arc::new(wrappers))
        .config(config)
        .build();

    let cancel = CancellationToken::new();
    let mut order = Order::new(Uuid::new_v4());

    // 每个工作单元提交后版本加一
    order.place(1250)?;
    order.ship("acme-post")?;
    publisher
        .send_domain_events(Some(order.take_domain_events()), &cancel)
        .await;
    order.bump_version();

    order.deliver()?;
    publisher
        .send_domain_events(Some(order.take_domain_events()), &cancel)
        .await;
    order.bump_version();

    // 非法状态转换不会记录事件
    if let Err(err) = order.place(1) {
        info!(error = %err, "command rejected");
    }
    publisher.send_domain_events(None, &cancel).await;

    info!(order_id = %order.id(), version = order.version(), "order flow finished");

    // 关闭发送端后订阅流结束
    drop(publisher);
    consumer.await?;

    Ok(())
}
