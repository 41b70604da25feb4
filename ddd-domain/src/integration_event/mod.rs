//! 集成事件（Integration Event）
//!
//! 面向外部消费者的消息：与领域事件形态一致（标识/时间/类型），但必须能够
//! 序列化为线上载荷，不能依赖仅在进程内有意义的类型。
//!
//! 对于声明了 `HasIntegrationEvent` 的领域事件，`IntegrationEventWrapper`
//! 提供无需自定义映射的通用包装。

mod wrapper;

pub use wrapper::IntegrationEventWrapper;

use crate::domain_event::Event;
use crate::error::DomainResult;
use serde::Serialize;
use serde_json::Value;

/// 线上载荷
pub type Payload = Value;

/// 集成事件：可跨边界传输的事件
pub trait IntegrationEvent: Event {
    /// 转换为线上载荷（JSON）
    fn to_payload(&self) -> DomainResult<Payload>;
}

/// 将可序列化的事件转换为 JSON 载荷（供宏生成的实现复用）
pub fn to_payload<T>(event: &T) -> DomainResult<Payload>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_value(event)?)
}
