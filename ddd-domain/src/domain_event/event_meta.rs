use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 事件元数据：在构造时生成标识与发生时间
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    #[builder(default = Uuid::new_v4())]
    event_id: Uuid,
    #[builder(default = Utc::now())]
    occurred_at: DateTime<Utc>,
}

impl EventMeta {
    /// 生成全新的元数据（v4 标识 + 当前时间）
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Default for EventMeta {
    fn default() -> Self {
        Self::new()
    }
}
