use std::sync::Arc;

use salvo::{listener::TcpListener, Server};

use user_service::{
    config::env_var,
    domain::repository::SharedUserRepository,
    infra::{
        database::{connection, repository::PgUserRepository, schema},
        memory::MemoryUserRepository,
        router,
    },
};

async fn create_repository(env: &env_var::EnvVar) -> SharedUserRepository {
    let Some(database) = &env.database else {
        tracing::warn!("using in-memory storage, users are lost on shutdown");
        return Arc::new(MemoryUserRepository::new());
    };

    let pool = connection::create_sqlx_pool(&database.url())
        .await
        .expect("Expect to create a database pool with a open connection");
    schema::bootstrap(&pool)
        .await
        .expect("Expect to apply the database schema");
    Arc::new(PgUserRepository::new(pool))
}

#[tokio::main]
async fn main() {
    let env = env_var::get();
    tracing_subscriber::fmt().with_max_level(env.log_level).init();

    let repository = create_repository(env).await;

    let address = format!("0.0.0.0:{}", env.port);
    tracing::info!(%address, storage = ?env.storage, "starting user service");
    let listener = TcpListener::bind(&address);
    Server::new(listener).serve(router::app(repository)).await;
}
