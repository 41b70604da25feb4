mod aggregate;
mod domain_event;
mod utils;

use proc_macro::TokenStream;

/// 领域事件宏
/// - 仅支持具名字段结构体：`struct OrderCreated { .. }`
/// - 若缺失则追加字段 `meta: ::ddd_domain::domain_event::EventMeta`（标识与发生时间）
/// - 合并派生：Debug, Clone, serde::Serialize, serde::Deserialize
/// - 生成 `EVENT_TYPE` 常量与 `new(..)` 构造器（按声明顺序接收除 `meta` 外的字段）
/// - 实现 `Event` 与 `DomainEvent`
/// - 支持参数：
///   - `event_type = "..."`：类型标签，默认使用完整类型路径（`module_path!()::Name`）
///   - `integration`：声明可直接包装为集成事件，额外实现 `HasIntegrationEvent`
///     并覆写 `DomainEvent::into_integration_event`（生成 `IntegrationEventWrapper<Self>`）
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(domain_event::EventKind::Domain, attr, item)
}

/// 集成事件宏
/// - 字段注入、派生与构造器同 `#[domain_event]`
/// - 实现 `Event` 与 `IntegrationEvent`（载荷为结构体自身的 JSON 序列化）
/// - 支持参数：`event_type = "..."`，默认使用结构体名（作为总线路由键）
#[proc_macro_attribute]
pub fn integration_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(domain_event::EventKind::Integration, attr, item)
}

/// 聚合宏
/// - 追加字段：`id: IdType`, `version: usize`, `domain_events: DomainEvents`（若缺失）并置于字段最前
/// - 自动实现 `::ddd_domain::aggregate::Entity`（`new/id/version/set_version`）与 `Aggregate`
/// - 若结构体派生了 serde，事件缓冲区字段标记为 `#[serde(skip)]`
/// - 支持参数：`#[aggregate(id = IdType)]`，默认 `String`
#[proc_macro_attribute]
pub fn aggregate(attr: TokenStream, item: TokenStream) -> TokenStream {
    aggregate::expand(attr, item)
}
