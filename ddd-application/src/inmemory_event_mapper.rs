use crate::error::AppError;
use crate::event_mapper::EventMapper;
use dashmap::DashMap;
use ddd_domain::domain_event::DomainEvent;
use ddd_domain::integration_event::IntegrationEvent;
use std::any::{TypeId, type_name};
use std::sync::Arc;

type MapFn = Arc<dyn Fn(&dyn DomainEvent) -> Option<Arc<dyn IntegrationEvent>> + Send + Sync>;

/// 基于内存的 EventMapper 实现
/// - 通过 TypeId 为每种领域事件注册一条映射规则
/// - 运行时以类型擦除（Any）方式向下转型后调用规则
pub struct InMemoryEventMapper {
    rules: DashMap<TypeId, (&'static str, MapFn)>,
}

impl Default for InMemoryEventMapper {
    fn default() -> Self {
        Self {
            rules: DashMap::new(),
        }
    }
}

impl InMemoryEventMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册映射规则，同一领域事件类型只允许一条
    pub fn register<E, I, F>(&self, f: F) -> Result<(), AppError>
    where
        E: DomainEvent,
        I: IntegrationEvent,
        F: Fn(&E) -> I + Send + Sync + 'static,
    {
        let key = TypeId::of::<E>();
        if self.rules.contains_key(&key) {
            return Err(AppError::AlreadyRegisteredMapping {
                event: type_name::<E>(),
            });
        }

        let rule: MapFn = Arc::new(move |event: &dyn DomainEvent| {
            // 键与闭包同一泛型 E，正常情况下不会失败
            event
                .as_any()
                .downcast_ref::<E>()
                .map(|e| Arc::new(f(e)) as Arc<dyn IntegrationEvent>)
        });

        self.rules.insert(key, (type_name::<E>(), rule));

        Ok(())
    }

    /// 获取已注册映射的领域事件类型名列表（只读视图）
    pub fn registered_events(&self) -> Vec<&'static str> {
        self.rules.iter().map(|e| e.value().0).collect()
    }
}

impl EventMapper for InMemoryEventMapper {
    fn map(&self, event: &dyn DomainEvent) -> Option<Arc<dyn IntegrationEvent>> {
        let key = event.as_any().type_id();
        let rule = self.rules.get(&key).map(|r| r.value().1.clone())?;
        (rule)(event)
    }
}
