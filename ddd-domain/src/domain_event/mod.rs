//! 领域事件（Domain Event）
//!
//! 定义所有事件共享的最小接口（`Event`）、领域事件能力（`DomainEvent`）、
//! 可直接包装为集成事件的标记（`HasIntegrationEvent`），以及在构造时
//! 填充的事件元数据 `EventMeta`。

mod as_any;
mod domain_event_trait;
mod event_meta;

pub use as_any::AsAny;
pub use domain_event_trait::{DomainEvent, Event, HasIntegrationEvent};
pub use event_meta::EventMeta;

/// 事件标识类型
pub type EventId = uuid::Uuid;

/// 事件发生时间类型
pub type Timestamp = chrono::DateTime<chrono::Utc>;
