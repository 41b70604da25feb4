//! 服务作用域（Service Scope）
//!
//! 映射步骤在一个短生命周期的作用域内执行，作用域内解析的依赖
//! 在守卫释放时一并释放。

/// 作用域守卫：释放（drop）即结束作用域
pub trait ServiceScope: Send {}

/// 作用域工厂
pub trait ServiceScopeFactory: Send + Sync {
    fn create_scope(&self) -> Box<dyn ServiceScope>;
}

/// 不持有任何资源的作用域
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScope;

impl ServiceScope for NoopScope {}

/// 默认工厂：每次返回一个空作用域
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScopeFactory;

impl ServiceScopeFactory for NoopScopeFactory {
    fn create_scope(&self) -> Box<dyn ServiceScope> {
        Box::new(NoopScope)
    }
}
