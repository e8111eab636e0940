pub mod connection {
    use std::time::Duration;

    use sqlx::PgPool;

    use crate::error::persistence::PersistenceError;

    pub async fn create_sqlx_pool(database_url: &str) -> Result<PgPool, PersistenceError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 60 * 30))
            .connect(database_url)
            .await?;
        Ok(pool)
    }
}

pub mod schema {
    use sqlx::PgPool;

    use crate::error::persistence::PersistenceError;

    const DB_SCHEMA: &str = include_str!("../../dbschema.sql");

    /// Applies `dbschema.sql` in a single transaction.
    ///
    /// Every statement in the file is idempotent, so this runs on each start.
    pub async fn bootstrap(pool: &PgPool) -> Result<(), PersistenceError> {
        let mut trx = pool.begin().await?;
        for sttm in DB_SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(sttm).execute(&mut trx).await?;
        }
        trx.commit().await?;

        tracing::debug!("database schema is up to date");
        Ok(())
    }
}

pub mod repository {
    use async_trait::async_trait;
    use futures::TryStreamExt;
    use sqlx::PgPool;

    use crate::{
        domain::{
            entity::{Ident, User, UserState},
            repository::UserRepository,
        },
        error::persistence::PersistenceError,
    };

    #[derive(Debug, Clone)]
    pub struct PgUserRepository {
        pool: PgPool,
    }

    impl PgUserRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl UserRepository for PgUserRepository {
        async fn find_by_id(&self, id: Ident) -> Result<Option<User>, PersistenceError> {
            let row = sqlx::query(
                "SELECT id, first_name, last_name, email FROM users WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.as_ref().map(User::try_from).transpose()?)
        }

        async fn list_all(&self) -> Result<Vec<User>, PersistenceError> {
            let mut rows =
                sqlx::query("SELECT id, first_name, last_name, email FROM users ORDER BY id")
                    .fetch(&self.pool);

            let mut users = Vec::new();
            while let Some(row) = rows.try_next().await? {
                users.push(User::try_from(&row)?);
            }

            Ok(users)
        }

        async fn insert(&self, state: UserState) -> Result<User, PersistenceError> {
            let row = sqlx::query(concat!(
                "INSERT INTO users (first_name, last_name, email) VALUES ($1, $2, $3) ",
                "RETURNING id, first_name, last_name, email",
            ))
            .bind(state.first_name())
            .bind(state.last_name())
            .bind(state.email())
            .fetch_one(&self.pool)
            .await?;

            Ok(User::try_from(&row)?)
        }

        async fn update(
            &self,
            id: Ident,
            state: UserState,
        ) -> Result<Option<User>, PersistenceError> {
            let row = sqlx::query(concat!(
                "UPDATE users SET first_name = $2, last_name = $3, email = $4 WHERE id = $1 ",
                "RETURNING id, first_name, last_name, email",
            ))
            .bind(id)
            .bind(state.first_name())
            .bind(state.last_name())
            .bind(state.email())
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.as_ref().map(User::try_from).transpose()?)
        }

        async fn delete(&self, id: Ident) -> Result<bool, PersistenceError> {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            Ok(result.rows_affected() > 0)
        }
    }
}
