use super::IUserRepo;
use salon_notifier_domain::{User, UserRole, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    role: String,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        let role = raw.role.parse().unwrap_or_else(|e| {
            warn!("User {}: {}", raw.user_uid, e);
            UserRole::Client
        });
        Self {
            id: raw.user_uid.into(),
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            role,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, name, email, phone, role)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|u| u.into())
    }

    async fn find_admin(&self) -> anyhow::Result<Option<User>> {
        let admin = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.role = 'ADMIN'
            ORDER BY u.created ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin.map(|u| u.into()))
    }
}
