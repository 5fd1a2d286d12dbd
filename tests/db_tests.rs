// smoke tests against a real postgres database
// run with: cargo test --features test-db
// requires DATABASE_URL env var pointing at a database with the order schema

#![cfg(feature = "test-db")]

use orderdesk::Db;
use orderdesk::core::{NewItem, clients, orders};

fn get_db_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for db tests")
}

#[tokio::test]
async fn test_connect_and_ping() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    assert!(db.ping().await.is_ok());
}

#[tokio::test]
async fn test_list_clients() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    assert!(clients::list(&db).await.is_some());
}

#[tokio::test]
async fn test_list_orders() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    let all = orders::list(&db).await.unwrap();

    // newest first
    assert!(all.windows(2).all(|w| w[0].id > w[1].id));
}

#[tokio::test]
async fn test_unknown_client_rolls_back() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    let before = orders::list(&db).await.unwrap().len();

    let result = orders::create_with_items(&db, -1, &[NewItem::new(-1, 1, 1.0)]).await;
    assert!(result.is_none());

    assert_eq!(orders::list(&db).await.unwrap().len(), before);
}

#[tokio::test]
async fn test_missing_order() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    assert!(orders::get_with_items(&db, -999).await.is_none());
}
