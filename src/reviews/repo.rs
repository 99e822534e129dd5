use crate::reviews::repo_types::Review;
use sqlx::PgPool;

impl Review {
    pub async fn create(
        db: &PgPool,
        task_provider: &str,
        task_worker: &str,
        rating: i32,
    ) -> anyhow::Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (task_provider, task_worker, rating)
            VALUES ($1, $2, $3)
            RETURNING id, task_provider, task_worker, rating, created_at, updated_at
            "#,
        )
        .bind(task_provider)
        .bind(task_worker)
        .bind(rating)
        .fetch_one(db)
        .await?;
        Ok(review)
    }

    /// Reviews whose `task_worker` equals the given id, filtered in the store.
    pub async fn list_for_worker(db: &PgPool, worker_id: &str) -> anyhow::Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, task_provider, task_worker, rating, created_at, updated_at
            FROM reviews
            WHERE task_worker = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(db)
        .await?;
        Ok(reviews)
    }
}
