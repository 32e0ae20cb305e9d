//! Redis counter store against a live server.
//!
//! Tests that need a server run only when `REDIS_URL` is set, e.g.
//! `REDIS_URL=redis://127.0.0.1:6379 cargo test -p hitproxy-gateway`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use redis::AsyncCommands;

use hitproxy_gateway::store::{CounterStore, RedisCounterStore};

fn redis_url() -> Option<String> {
    std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty())
}

fn table_name(test: &str) -> String {
    format!("hitproxy-test:{}:{test}", std::process::id())
}

async fn raw_conn(url: &str) -> redis::aio::MultiplexedConnection {
    redis::Client::open(url)
        .unwrap()
        .get_multiplexed_async_connection()
        .await
        .unwrap()
}

async fn drop_table(url: &str, table: &str) {
    let mut conn = raw_conn(url).await;
    let _: () = conn.del(table).await.unwrap();
}

#[tokio::test]
async fn invalid_url_is_configuration_error() {
    let err = match RedisCounterStore::connect("not a redis url", "hits").await {
        Ok(_) => panic!("must fail"),
        Err(e) => e,
    };
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIGURATION");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_are_atomic() {
    let Some(url) = redis_url() else {
        return;
    };
    let table = table_name("atomic");
    drop_table(&url, &table).await;

    let store = Arc::new(RedisCounterStore::connect(&url, table.clone()).await.unwrap());
    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.increment("/hello", 1).await })
        })
        .collect();
    for t in futures_util::future::join_all(tasks).await {
        t.unwrap().unwrap();
    }
    assert_eq!(store.increment("/test", 1).await.unwrap(), 1);

    let mut items = store.scan().await.unwrap();
    items.sort_by(|a, b| a.path.cmp(&b.path));
    let got: Vec<_> = items.iter().map(|r| (r.path.as_str(), r.hits)).collect();
    assert_eq!(got, vec![("/hello", 100), ("/test", 1)]);

    drop_table(&url, &table).await;
}

#[tokio::test]
async fn wrong_key_type_maps_to_unavailable_errors() {
    let Some(url) = redis_url() else {
        return;
    };
    let table = table_name("wrongtype");
    let mut conn = raw_conn(&url).await;
    let _: () = conn.set(&table, "not a hash").await.unwrap();

    let store = RedisCounterStore::connect(&url, table.clone()).await.unwrap();

    let err = store.increment("/hello", 1).await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "COUNTER_UNAVAILABLE");

    let err = store.scan().await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");

    drop_table(&url, &table).await;
}

#[tokio::test]
async fn empty_table_scans_to_nothing() {
    let Some(url) = redis_url() else {
        return;
    };
    let table = table_name("empty");
    drop_table(&url, &table).await;

    let store = RedisCounterStore::connect(&url, table).await.unwrap();
    assert!(store.scan().await.unwrap().is_empty());
    assert_eq!(store.backend(), "redis");
}
