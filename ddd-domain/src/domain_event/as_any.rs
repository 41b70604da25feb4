use std::any::Any;
use std::sync::Arc;

/// 运行时类型识别：供映射器/包装器按具体类型分派与还原
///
/// 对 `Arc<dyn DomainEvent>` 调用时需先解引用（`event.as_ref().as_any()`），
/// 否则拿到的是 `Arc` 本身的类型。
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T> AsAny for T
where
    T: Any + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
