use crate::error::AppError;
use dashmap::DashMap;
use ddd_domain::domain_event::{DomainEvent, HasIntegrationEvent};
use ddd_domain::integration_event::{IntegrationEvent, IntegrationEventWrapper};
use std::any::{TypeId, type_name};
use std::sync::Arc;

type WrapFn =
    Arc<dyn Fn(Arc<dyn DomainEvent>) -> Result<Arc<dyn IntegrationEvent>, AppError> + Send + Sync>;

/// 集成事件包装器工厂注册表
///
/// 为声明了 `HasIntegrationEvent` 的领域事件登记 `IntegrationEventWrapper<E>` 的构造方式，
/// 发布时按事件的运行时 TypeId 查找并构造包装器。
///
/// 未登记的类型回退到事件自身的 `DomainEvent::into_integration_event`，
/// 因此 `#[domain_event(integration)]` 生成的事件无需登记；注册表用于
/// 手写实现了 `HasIntegrationEvent` 的事件。
pub struct IntegrationEventWrappers {
    factories: DashMap<TypeId, (&'static str, WrapFn)>,
}

impl Default for IntegrationEventWrappers {
    fn default() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }
}

impl IntegrationEventWrappers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记可直接包装的领域事件类型
    pub fn register<E>(&self) -> Result<(), AppError>
    where
        E: HasIntegrationEvent,
    {
        let key = TypeId::of::<E>();
        if self.factories.contains_key(&key) {
            return Err(AppError::AlreadyRegisteredWrapper {
                event: type_name::<E>(),
            });
        }

        let factory: WrapFn = Arc::new(|event: Arc<dyn DomainEvent>| {
            match event.into_any_arc().downcast::<E>() {
                Ok(inner) => {
                    Ok(Arc::new(IntegrationEventWrapper::new(inner)) as Arc<dyn IntegrationEvent>)
                }
                Err(_) => Err(AppError::TypeMismatch {
                    expected: type_name::<E>(),
                    found: "unknown",
                }),
            }
        });

        self.factories.insert(key, (type_name::<E>(), factory));

        Ok(())
    }

    /// 为领域事件构造包装器，被包装的是同一个实例
    pub fn wrap(
        &self,
        event: &Arc<dyn DomainEvent>,
    ) -> Result<Arc<dyn IntegrationEvent>, AppError> {
        let key = event.as_ref().as_any().type_id();
        if let Some(factory) = self.factories.get(&key).map(|f| f.value().1.clone()) {
            return (factory)(Arc::clone(event));
        }

        Arc::clone(event)
            .into_integration_event()
            .ok_or_else(|| AppError::WrapperNotRegistered {
                event_type: event.event_type().to_string(),
            })
    }

    /// 获取已登记包装器的领域事件类型名列表（只读视图）
    pub fn registered_events(&self) -> Vec<&'static str> {
        self.factories.iter().map(|e| e.value().0).collect()
    }
}
