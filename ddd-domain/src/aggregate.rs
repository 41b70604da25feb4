//! 聚合（Aggregate）与实体（Entity）抽象
//!
//! 聚合是一致性边界：业务方法在改变状态时记录领域事件，事件按追加顺序
//! 累积在 `DomainEvents` 中，直到工作单元边界通过 `take_domain_events`
//! 一次性取出并清空。
//!
//! 取出操作需要 `&mut self`，因此对持有者而言是原子交接；跨线程共享聚合时
//! 由调用方负责外部同步。
//!
use crate::domain_event::DomainEvent;
use std::fmt::{self, Display};
use std::ops::Deref;
use std::slice::Iter;
use std::str::FromStr;
use std::sync::Arc;

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display;

    /// 使用给定标识创建实体（聚合）
    fn new(aggregate_id: Self::Id) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> usize;

    /// 设置版本，例如从存储加载或提交成功后同步
    fn set_version(&mut self, version: usize);

    /// 版本加一
    fn bump_version(&mut self) {
        let next = self.version() + 1;
        self.set_version(next);
    }
}

/// 聚合根接口：在实体之上累积领域事件
pub trait Aggregate: Entity {
    /// 已记录且尚未取出的事件（只读）
    fn domain_events(&self) -> &DomainEvents;

    fn domain_events_mut(&mut self) -> &mut DomainEvents;

    /// 记录一个领域事件
    fn add_domain_event<E>(&mut self, event: E)
    where
        E: DomainEvent,
        Self: Sized,
    {
        self.domain_events_mut().push(Arc::new(event));
    }

    /// 取出全部已记录事件并清空缓冲区
    fn take_domain_events(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        self.domain_events_mut().take()
    }
}

/// 聚合内的事件缓冲区，按追加顺序排列
#[derive(Clone, Default)]
pub struct DomainEvents {
    events: Vec<Arc<dyn DomainEvent>>,
}

impl DomainEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Arc<dyn DomainEvent>) {
        self.events.push(event);
    }

    /// 交出当前全部事件，缓冲区随即为空
    pub fn take(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Arc<dyn DomainEvent>> {
        self.events.iter()
    }
}

// 事件本身可能很大，调试输出只列出类型与标识
impl fmt::Debug for DomainEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.events
                    .iter()
                    .map(|e| (e.event_type().to_string(), e.event_id())),
            )
            .finish()
    }
}

impl<'a> IntoIterator for &'a DomainEvents {
    type Item = &'a Arc<dyn DomainEvent>;
    type IntoIter = Iter<'a, Arc<dyn DomainEvent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Deref for DomainEvents {
    type Target = [Arc<dyn DomainEvent>];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}
