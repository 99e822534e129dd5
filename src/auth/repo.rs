use crate::auth::repo_types::User;
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    /// Find a user by normalized email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, mobile, skill, password_hash, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, mobile, skill, password_hash, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password. Returns the raw sqlx error
    /// so the caller can map a unique violation on email to a conflict.
    pub async fn create(
        db: &PgPool,
        fullname: &str,
        email: &str,
        mobile: &str,
        skill: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fullname, email, mobile, skill, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, fullname, email, mobile, skill, password_hash, is_admin, created_at
            "#,
        )
        .bind(fullname)
        .bind(email)
        .bind(mobile)
        .bind(skill)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, mobile, skill, password_hash, is_admin, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Idempotent: promoting an existing admin is a no-op write.
    pub async fn set_admin(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// True when the error is a unique-constraint violation (duplicate email).
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
