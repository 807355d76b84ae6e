//! Unit tests for contact table operations

use cscan_common::ContactRecord;
use cscan_ingest::db;
use cscan_ingest::db::contacts::{delete, insert, list_all, update};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();
    db::init_tables(&pool).await.unwrap();
    pool
}

fn record(name: &str) -> ContactRecord {
    ContactRecord {
        date: "2024.01.".to_string(),
        display_name: name.to_string(),
        channel: "小程序".to_string(),
        note: "到店".to_string(),
    }
}

#[tokio::test]
async fn insert_assigns_incrementing_ids() {
    let pool = test_pool().await;

    let first = insert(&pool, &record("张三")).await.unwrap();
    let second = insert(&pool, &record("李四")).await.unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[tokio::test]
async fn list_all_returns_newest_id_first() {
    let pool = test_pool().await;

    insert(&pool, &record("张三")).await.unwrap();
    insert(&pool, &record("李四")).await.unwrap();

    let rows = list_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].display_name, "李四");
    assert_eq!(rows[1].display_name, "张三");
}

#[tokio::test]
async fn update_replaces_all_text_fields() {
    let pool = test_pool().await;

    let id = insert(&pool, &record("张三")).await.unwrap();
    let edited = ContactRecord {
        date: "2024.02.".to_string(),
        display_name: "张三三".to_string(),
        channel: "朋友介绍".to_string(),
        note: "复诊".to_string(),
    };
    update(&pool, id, &edited).await.unwrap();

    let rows = list_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2024.02.");
    assert_eq!(rows[0].display_name, "张三三");
    assert_eq!(rows[0].channel, "朋友介绍");
    assert_eq!(rows[0].note, "复诊");
}

#[tokio::test]
async fn update_of_missing_id_is_a_noop() {
    let pool = test_pool().await;

    update(&pool, 999, &record("张三")).await.unwrap();
    assert!(list_all(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let pool = test_pool().await;

    let id = insert(&pool, &record("张三")).await.unwrap();
    delete(&pool, id).await.unwrap();
    delete(&pool, id).await.unwrap();

    assert!(list_all(&pool).await.unwrap().is_empty());
}
