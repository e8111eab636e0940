use std::{sync::Arc, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use salvo::Service;
use url::Url;

use user_service::infra::{
    database::repository::PgUserRepository, memory::MemoryUserRepository, router,
};

/// Full router over a fresh in-memory store.
#[allow(dead_code)]
pub fn memory_service() -> Service {
    Service::new(router::app(Arc::new(MemoryUserRepository::new())))
}

#[allow(dead_code)]
pub fn test_url(path: &str) -> String {
    format!("http://127.0.0.1:5800{path}")
}

/// Starts the service over PostgreSQL on `PORT` and returns a client for it.
#[allow(dead_code)]
pub async fn setup_postgres_test() -> (Client, Url, sqlx::PgPool) {
    dotenv::dotenv().ok();
    let pool = setup_database().await;

    let url = service_url();
    let app = router::app(Arc::new(PgUserRepository::new(pool.clone())));
    let address = format!("127.0.0.1:{}", url.port().unwrap());
    tokio::spawn(async move {
        salvo::Server::new(salvo::listener::TcpListener::bind(&address))
            .serve(app)
            .await;
    });

    let client = create_client();
    wait_until_ready(&client, &url).await;
    (client, url, pool)
}

fn service_url() -> Url {
    let port: u16 = std::env::var("PORT")
        .unwrap()
        .parse()
        .expect("Invalid PORT");
    Url::parse(format!("http://127.0.0.1:{port}").as_str()).unwrap()
}

async fn wait_until_ready(client: &Client, url: &Url) {
    for _ in 0..50 {
        if client.get(url.join("/users").unwrap()).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("service did not start listening on {url}");
}

async fn setup_database() -> sqlx::PgPool {
    let database_host = std::env::var("DATABASE_HOST").unwrap();
    let database_name = std::env::var("DATABASE_NAME").unwrap();
    let database_user = std::env::var("DATABASE_USER").unwrap();
    let database_password = std::env::var("DATABASE_PASSWORD").unwrap();
    let database_port: u16 = std::env::var("DATABASE_PORT")
        .unwrap()
        .parse()
        .expect("Invalid DATABASE_PORT");

    let database_url = format!("postgres://{database_user}:{database_password}@{database_host}:{database_port}/{database_name}");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .acquire_timeout(Duration::from_millis(1000))
        .connect(&database_url)
        .await
        .expect("Expect to create a database pool with a open connection");

    let mut trx = pool.begin().await.unwrap();
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&mut trx)
        .await
        .unwrap();
    for sttm in include_str!("../../dbschema.sql").split(';') {
        if !sttm.trim().is_empty() {
            sqlx::query(sttm).execute(&mut trx).await.unwrap();
        }
    }
    trx.commit().await.unwrap();

    pool
}

fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("application/json"));

    let connect_timeout = 1000 * 5; // 5 sec
    let timeout = 1000 * 10; // 10 sec

    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(connect_timeout))
        .timeout(Duration::from_millis(timeout))
        .pool_max_idle_per_host(5)
        .default_headers(headers)
        .brotli(true)
        .gzip(true)
        .build()
        .expect("Expect to create a http client")
}
