use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Peer review row. `task_provider` is the rater's display name captured at
/// write time, not a live reference. `task_worker` is the ratee's id kept as
/// a raw string and matched by string equality.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub task_provider: String,
    pub task_worker: String,
    pub rating: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
