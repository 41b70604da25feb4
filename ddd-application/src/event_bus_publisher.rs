use crate::bus_publisher::BusPublisher;
use crate::config::{BusPublisherConfig, WrapPolicy};
use crate::event_mapper::EventMapper;
use crate::event_wrappers::IntegrationEventWrappers;
use crate::message_bus::MessageBus;
use crate::publish_failure::{LogPublishFailure, PublishFailureHandler};
use crate::service_scope::{NoopScopeFactory, ServiceScopeFactory};
use async_trait::async_trait;
use bon::Builder;
use ddd_domain::domain_event::DomainEvent;
use ddd_domain::integration_event::IntegrationEvent;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, trace, warn};

/// 基于 `MessageBus` 的总线发布器
///
/// 领域事件按 `WrapPolicy` 包装或映射为集成事件，随后按顺序逐个发布；
/// 映射步骤在 `ServiceScopeFactory` 提供的作用域内执行。
#[derive(Builder)]
pub struct EventBusPublisher {
    message_bus: Arc<dyn MessageBus>,
    event_mapper: Arc<dyn EventMapper>,
    #[builder(default)]
    wrappers: Arc<IntegrationEventWrappers>,
    #[builder(default = default_scope_factory())]
    scope_factory: Arc<dyn ServiceScopeFactory>,
    #[builder(default = default_failure_handler())]
    failure_handler: Arc<dyn PublishFailureHandler>,
    #[builder(default)]
    config: BusPublisherConfig,
}

fn default_scope_factory() -> Arc<dyn ServiceScopeFactory> {
    Arc::new(NoopScopeFactory)
}

fn default_failure_handler() -> Arc<dyn PublishFailureHandler> {
    Arc::new(LogPublishFailure)
}

impl EventBusPublisher {
    pub fn config(&self) -> &BusPublisherConfig {
        &self.config
    }

    /// 将领域事件解析为集成事件，保持输入顺序
    fn resolve(&self, events: &[Arc<dyn DomainEvent>]) -> Vec<Arc<dyn IntegrationEvent>> {
        match self.config.wrap_policy {
            WrapPolicy::Merge => self.resolve_merged(events),
            WrapPolicy::Exclusive => self.resolve_exclusive(events),
        }
    }

    fn resolve_merged(&self, events: &[Arc<dyn DomainEvent>]) -> Vec<Arc<dyn IntegrationEvent>> {
        let needs_mapping = events.iter().any(|e| !e.has_integration_event());
        let _scope = needs_mapping.then(|| self.scope_factory.create_scope());

        events
            .iter()
            .filter_map(|event| {
                if event.has_integration_event() {
                    self.wrap(event)
                } else {
                    self.event_mapper.map(event.as_ref())
                }
            })
            .collect()
    }

    // 只要有事件被包装，整批不再经过映射器
    fn resolve_exclusive(
        &self,
        events: &[Arc<dyn DomainEvent>],
    ) -> Vec<Arc<dyn IntegrationEvent>> {
        let wrapped: Vec<_> = events
            .iter()
            .filter(|e| e.has_integration_event())
            .filter_map(|e| self.wrap(e))
            .collect();
        if !wrapped.is_empty() || events.is_empty() {
            return wrapped;
        }

        let _scope = self.scope_factory.create_scope();
        self.event_mapper.map_all(events)
    }

    fn wrap(&self, event: &Arc<dyn DomainEvent>) -> Option<Arc<dyn IntegrationEvent>> {
        match self.wrappers.wrap(event) {
            Ok(wrapped) => Some(wrapped),
            Err(err) => {
                error!(
                    event_id = %event.event_id(),
                    event_type = event.event_type(),
                    error = %err,
                    "failed to wrap domain event as integration event"
                );
                None
            }
        }
    }

    async fn publish_all(
        &self,
        events: Vec<Arc<dyn IntegrationEvent>>,
        cancel: &CancellationToken,
    ) {
        let total = events.len();

        for (idx, event) in events.into_iter().enumerate() {
            if self.config.stop_on_cancel && cancel.is_cancelled() {
                warn!(
                    skipped = total - idx,
                    "publishing cancelled, remaining integration events skipped"
                );
                return;
            }

            let topic = event.event_type().to_string();
            match self
                .message_bus
                .publish(&topic, Arc::clone(&event), cancel)
                .await
            {
                Ok(()) => trace!(
                    event_id = %event.event_id(),
                    event_type = %topic,
                    "published integration event"
                ),
                Err(err) => self.failure_handler.on_publish_failed(event.as_ref(), &err),
            }
        }
    }
}

#[async_trait]
impl BusPublisher for EventBusPublisher {
    async fn send_domain_events(
        &self,
        events: Option<Vec<Arc<dyn DomainEvent>>>,
        cancel: &CancellationToken,
    ) {
        let Some(events) = events else {
            warn!("no domain events to process");
            return;
        };

        let integration_events = self.resolve(&events);
        trace!(
            domain_events = events.len(),
            integration_events = integration_events.len(),
            "resolved integration events"
        );

        if integration_events.is_empty() {
            warn!("no integration events after mapping");
            return;
        }

        self.publish_all(integration_events, cancel).await
    }

    async fn send_integration_events(
        &self,
        events: Option<Vec<Arc<dyn IntegrationEvent>>>,
        cancel: &CancellationToken,
    ) {
        let Some(events) = events else {
            warn!("no integration events to process");
            return;
        };

        self.publish_all(events, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_event_mapper::InMemoryEventMapper;
    use crate::service_scope::ServiceScope;
    use ddd_domain::error::{DomainError, DomainResult};
    use ddd_macros::{domain_event, integration_event};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[domain_event(event_type = "order.created")]
    struct OrderCreated {
        order_id: String,
    }

    #[domain_event(event_type = "order.shipped", integration)]
    struct OrderShipped {
        order_id: String,
    }

    #[integration_event]
    struct OrderCreatedIntegrationEvent {
        order_id: String,
    }

    #[derive(Default)]
    struct RecordingBus {
        topics: Mutex<Vec<String>>,
    }

    impl RecordingBus {
        fn topics(&self) -> Vec<String> {
            self.topics.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageBus for RecordingBus {
        async fn publish(
            &self,
            topic: &str,
            _event: Arc<dyn IntegrationEvent>,
            _cancel: &CancellationToken,
        ) -> DomainResult<()> {
            self.topics.lock().unwrap().push(topic.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingScopes {
        opened: Arc<AtomicUsize>,
    }

    struct CountingScope;

    impl ServiceScope for CountingScope {}

    impl ServiceScopeFactory for CountingScopes {
        fn create_scope(&self) -> Box<dyn ServiceScope> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Box::new(CountingScope)
        }
    }

    fn mapper() -> Arc<InMemoryEventMapper> {
        let mapper = InMemoryEventMapper::new();
        mapper
            .register::<OrderCreated, _, _>(|e| {
                OrderCreatedIntegrationEvent::new(e.order_id.clone())
            })
            .unwrap();
        Arc::new(mapper)
    }

    fn wrappers() -> Arc<IntegrationEventWrappers> {
        let wrappers = IntegrationEventWrappers::new();
        wrappers.register::<OrderShipped>().unwrap();
        Arc::new(wrappers)
    }

    fn mixed_batch() -> Vec<Arc<dyn DomainEvent>> {
        vec![
            Arc::new(OrderCreated::new("o-1".into())),
            Arc::new(OrderShipped::new("o-1".into())),
            Arc::new(OrderCreated::new("o-2".into())),
        ]
    }

    #[tokio::test]
    async fn merge_policy_resolves_each_event_in_order() {
        let bus = Arc::new(RecordingBus::default());
        let scopes = CountingScopes::default();
        let opened = scopes.opened.clone();
        let publisher = EventBusPublisher::builder()
            .message_bus(bus.clone())
            .event_mapper(mapper())
            .wrappers(wrappers())
            .scope_factory(Arc::new(scopes))
            .build();

        publisher
            .send_domain_events(Some(mixed_batch()), &CancellationToken::new())
            .await;

        assert_eq!(
            bus.topics(),
            vec![
                "OrderCreatedIntegrationEvent",
                "IntegrationEventWrapper<order.shipped>",
                "OrderCreatedIntegrationEvent",
            ]
        );
        assert_eq!(opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exclusive_policy_skips_mapper_when_anything_wraps() {
        let bus = Arc::new(RecordingBus::default());
        let scopes = CountingScopes::default();
        let opened = scopes.opened.clone();
        let publisher = EventBusPublisher::builder()
            .message_bus(bus.clone())
            .event_mapper(mapper())
            .wrappers(wrappers())
            .scope_factory(Arc::new(scopes))
            .config(BusPublisherConfig {
                wrap_policy: WrapPolicy::Exclusive,
                ..Default::default()
            })
            .build();

        publisher
            .send_domain_events(Some(mixed_batch()), &CancellationToken::new())
            .await;

        assert_eq!(bus.topics(), vec!["IntegrationEventWrapper<order.shipped>"]);
        assert_eq!(opened.load(Ordering::SeqCst), 0);

        // 没有可包装事件时回到映射器
        publisher
            .send_domain_event(
                Arc::new(OrderCreated::new("o-3".into())),
                &CancellationToken::new(),
            )
            .await;
        assert_eq!(bus.topics().len(), 2);
        assert_eq!(opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrap_only_batch_does_not_open_scope() {
        let bus = Arc::new(RecordingBus::default());
        let scopes = CountingScopes::default();
        let opened = scopes.opened.clone();
        let publisher = EventBusPublisher::builder()
            .message_bus(bus.clone())
            .event_mapper(mapper())
            .wrappers(wrappers())
            .scope_factory(Arc::new(scopes))
            .build();

        publisher
            .send_domain_event(
                Arc::new(OrderShipped::new("o-1".into())),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(bus.topics().len(), 1);
        assert_eq!(opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn marked_event_wraps_without_registration() {
        let bus = Arc::new(RecordingBus::default());
        let publisher = EventBusPublisher::builder()
            .message_bus(bus.clone())
            .event_mapper(mapper())
            .build();

        publisher
            .send_domain_events(Some(mixed_batch()), &CancellationToken::new())
            .await;

        assert_eq!(
            bus.topics(),
            vec![
                "OrderCreatedIntegrationEvent",
                "IntegrationEventWrapper<order.shipped>",
                "OrderCreatedIntegrationEvent",
            ]
        );
    }

    struct CollectFailures {
        failed: Mutex<Vec<String>>,
    }

    impl PublishFailureHandler for CollectFailures {
        fn on_publish_failed(&self, event: &dyn IntegrationEvent, err: &DomainError) {
            assert!(matches!(err, DomainError::EventBus { .. }));
            self.failed.lock().unwrap().push(event.event_type().to_string());
        }
    }

    struct RejectingBus;

    #[async_trait]
    impl MessageBus for RejectingBus {
        async fn publish(
            &self,
            _topic: &str,
            _event: Arc<dyn IntegrationEvent>,
            _cancel: &CancellationToken,
        ) -> DomainResult<()> {
            Err(DomainError::EventBus {
                reason: "broker unavailable".into(),
            })
        }
    }

    #[tokio::test]
    async fn custom_failure_handler_sees_every_failure() {
        let handler = Arc::new(CollectFailures {
            failed: Mutex::new(Vec::new()),
        });
        let publisher = EventBusPublisher::builder()
            .message_bus(Arc::new(RejectingBus))
            .event_mapper(mapper())
            .wrappers(wrappers())
            .failure_handler(handler.clone())
            .build();

        publisher
            .send_domain_events(Some(mixed_batch()), &CancellationToken::new())
            .await;

        assert_eq!(handler.failed.lock().unwrap().len(), 3);
    }
}
