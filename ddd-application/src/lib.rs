//! DDD 应用层（ddd-application）
//!
//! 领域事件到集成事件的发布编排：
//! - 映射：`EventMapper` 与内存注册表 `InMemoryEventMapper`
//! - 包装：`IntegrationEventWrappers`，为可直接传输的领域事件构造通用包装器
//! - 发布：`BusPublisher` 与基于 `MessageBus` 的 `EventBusPublisher`
//! - 传输：`MessageBus` 协议与内存实现 `InMemoryMessageBus`
//!
pub mod bus_publisher;
pub mod config;
pub mod error;
pub mod event_bus_publisher;
pub mod event_mapper;
pub mod event_wrappers;
pub mod inmemory_event_mapper;
pub mod inmemory_message_bus;
pub mod message_bus;
pub mod publish_failure;
pub mod service_scope;
pub mod telemetry;

pub use event_bus_publisher::EventBusPublisher;
pub use inmemory_event_mapper::InMemoryEventMapper;
pub use inmemory_message_bus::InMemoryMessageBus;
