//! 内存版消息总线（InMemoryMessageBus）
//!
//! 基于 `tokio::sync::broadcast` 实现的轻量传输，满足 `MessageBus` 协议：
//! - `publish`：把集成事件序列化为 `BusMessage` 并广播；
//! - `subscribe`：返回 `'static` 生命周期消息流，便于在 `tokio::spawn` 中使用；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：无订阅者时发送将被忽略；已取消的令牌会使发布直接失败。

use crate::message_bus::MessageBus;
use async_trait::async_trait;
use ddd_domain::domain_event::{EventId, Timestamp};
use ddd_domain::error::{DomainError, DomainResult};
use ddd_domain::integration_event::{IntegrationEvent, Payload};
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;

/// 总线上传输的消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub topic: String,
    pub event_id: EventId,
    pub occurred_at: Timestamp,
    pub payload: Payload,
}

/// 简单的内存消息总线实现
#[derive(Clone)]
pub struct InMemoryMessageBus {
    tx: broadcast::Sender<BusMessage>,
}

impl InMemoryMessageBus {
    /// 创建一个内存总线，`capacity` 为广播缓冲区容量
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 返回一个 'static 生命周期的消息流
    pub fn subscribe(&self) -> BoxStream<'static, DomainResult<BusMessage>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx).map(|r| {
            r.map_err(|e| DomainError::EventBus {
                reason: e.to_string(),
            })
        });
        Box::pin(stream)
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn publish(
        &self,
        topic: &str,
        event: Arc<dyn IntegrationEvent>,
        cancel: &CancellationToken,
    ) -> DomainResult<()> {
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        let message = BusMessage {
            topic: topic.to_string(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            payload: event.to_payload()?,
        };

        // 若当前无订阅者，broadcast 的 send 会返回错误，这里视为非致命并忽略
        let _ = self.tx.send(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddd_domain::domain_event::Event;
    use ddd_macros::integration_event;

    #[integration_event]
    struct OrderPaid {
        order_id: String,
    }

    #[tokio::test]
    async fn subscriber_receives_serialized_message() {
        let bus = InMemoryMessageBus::new(8);
        let mut stream = bus.subscribe();
        let cancel = CancellationToken::new();

        let event = Arc::new(OrderPaid::new("o-1".into()));
        bus.publish(event.event_type(), event.clone(), &cancel)
            .await
            .unwrap();

        let msg = stream.next().await.unwrap().unwrap();
        assert_eq!(msg.topic, "OrderPaid");
        assert_eq!(msg.event_id, event.event_id());
        assert_eq!(msg.occurred_at, event.occurred_at());
        assert_eq!(msg.payload["order_id"], "o-1");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let bus = InMemoryMessageBus::new(8);
        let event = Arc::new(OrderPaid::new("o-1".into()));
        assert!(
            bus.publish("OrderPaid", event, &CancellationToken::new())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn cancelled_token_fails_publish() {
        let bus = InMemoryMessageBus::new(8);
        let mut stream = bus.subscribe();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let event = Arc::new(OrderPaid::new("o-1".into()));
        let err = bus.publish("OrderPaid", event, &cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));

        drop(bus);
        assert!(stream.next().await.is_none());
    }
}
