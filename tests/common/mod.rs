// shared setup: a fresh sqlite database per test with the order schema

#![allow(dead_code)]

use orderdesk::Db;
use tempfile::TempDir;

const SCHEMA: &[&str] = &[
    "CREATE TABLE cliente (
        id_cliente INTEGER PRIMARY KEY AUTOINCREMENT,
        cpf TEXT NOT NULL UNIQUE,
        nome TEXT NOT NULL
    )",
    "CREATE TABLE produto (
        id_produto INTEGER PRIMARY KEY AUTOINCREMENT,
        descricao TEXT NOT NULL
    )",
    "CREATE TABLE venda (
        id_venda INTEGER PRIMARY KEY AUTOINCREMENT,
        id_cliente INTEGER NOT NULL REFERENCES cliente (id_cliente),
        data_venda TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE item_venda (
        id_venda INTEGER NOT NULL REFERENCES venda (id_venda),
        id_produto INTEGER NOT NULL REFERENCES produto (id_produto),
        qtd_produto INTEGER NOT NULL,
        preco_unit NUMERIC NOT NULL,
        PRIMARY KEY (id_venda, id_produto)
    )",
    "INSERT INTO produto (descricao) VALUES ('Caneta'), ('Caderno'), ('Mochila')",
];

pub const PEN: i64 = 1;
pub const NOTEBOOK: i64 = 2;
pub const BACKPACK: i64 = 3;
pub const MISSING_PRODUCT: i64 = 999;

// keep the TempDir alive for as long as the Db is used
pub struct TestDb {
    pub db: Db,
    _dir: TempDir,
}

pub async fn empty_db(max_connections: u32) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("orders.db").display());
    let db = Db::connect_with(&url, max_connections).await.unwrap();
    TestDb { db, _dir: dir }
}

pub async fn test_db() -> TestDb {
    test_db_with(2).await
}

pub async fn test_db_with(max_connections: u32) -> TestDb {
    let t = empty_db(max_connections).await;
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(t.db.pool()).await.unwrap();
    }
    t
}

pub async fn client_id(db: &Db, tax_id: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id_cliente FROM cliente WHERE cpf = $1")
        .bind(tax_id)
        .fetch_one(db.pool())
        .await
        .unwrap();
    id
}

pub async fn count(db: &Db, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .unwrap();
    n
}
