//! DDD 领域层基础库（ddd-domain）
//!
//! 提供领域事件发布链路所需的共享词汇：
//! - 事件模型（`domain_event`）：`Event`、`DomainEvent` 与事件元数据 `EventMeta`
//! - 集成事件（`integration_event`）：可跨边界传输的 `IntegrationEvent` 与通用包装器
//! - 聚合与实体（`aggregate`）：事件累积与原子取出
//!
//! 本 crate 不依赖任何传输或运行时实现，映射与发布编排位于 `ddd-application`。
//!
//! 典型用法：
//! 1. 使用 `#[domain_event]` / `#[integration_event]` 定义事件；
//! 2. 使用 `#[aggregate]` 定义聚合，在业务方法中调用 `add_domain_event`；
//! 3. 在工作单元边界调用 `take_domain_events` 取出事件并交给总线发布器。
//!
pub mod aggregate;
pub mod domain_event;
pub mod error;
pub mod integration_event;

// 允许在本 crate 内部通过 ::ddd_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::ddd_domain 路径。
extern crate self as ddd_domain;
