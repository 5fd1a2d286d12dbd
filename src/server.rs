// http server mode - clients, orders, and items over json

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::core::{ItemChanges, NewClient, NewItem, clients, items, orders};
use crate::{Db, Error};

struct AppState {
    db: Db,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest {
    client_id: i64,
    #[serde(default)]
    items: Vec<NewItem>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    dialect: &'static str,
}

type Reply = (StatusCode, Json<Value>);

pub struct Server;

impl Server {
    /// Connect, probe the database, and serve until the listener fails.
    /// Nothing is bound if the probe fails.
    pub async fn run(db_url: &str, max_connections: u32, host: &str, port: u16) -> Result<(), Error> {
        let db = Db::connect_with(db_url, max_connections).await?;
        if let Err(e) = db.ping().await {
            error!("could not connect to database: {e}");
            return Err(e);
        }

        let app = Self::router(db);

        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        info!("server running at http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }

    pub fn router(db: Db) -> Router {
        let state = Arc::new(AppState { db });

        Router::new()
            .route("/health", get(health))
            .route("/clients", get(list_clients).post(create_client))
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/{id}", get(get_order))
            .route("/orders/{id}/items", get(list_items).post(add_item))
            .route(
                "/orders/{id}/items/{product_id}",
                patch(update_item).delete(delete_item),
            )
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        dialect: state.db.dialect_name(),
    })
}

async fn list_clients(State(state): State<Arc<AppState>>) -> Reply {
    match clients::list(&state.db).await {
        Some(list) => (StatusCode::OK, Json(json!(list))),
        None => fail(StatusCode::INTERNAL_SERVER_ERROR, "could not list clients"),
    }
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(client): Json<NewClient>,
) -> Reply {
    if clients::create(&state.db, &client).await {
        (StatusCode::CREATED, Json(json!({ "created": true })))
    } else {
        fail(StatusCode::BAD_REQUEST, "could not create client")
    }
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Reply {
    match orders::list(&state.db).await {
        Ok(list) => (StatusCode::OK, Json(json!(list))),
        Err(_) => fail(StatusCode::INTERNAL_SERVER_ERROR, "could not list orders"),
    }
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Reply {
    match orders::create_with_items(&state.db, req.client_id, &req.items).await {
        Some(id) => (StatusCode::CREATED, Json(json!({ "orderId": id }))),
        None => fail(StatusCode::BAD_REQUEST, "could not create order"),
    }
}

async fn get_order(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Reply {
    match orders::get_with_items(&state.db, id).await {
        Some(order) => (StatusCode::OK, Json(json!(order))),
        None => fail(StatusCode::NOT_FOUND, "order not found"),
    }
}

async fn list_items(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Reply {
    match orders::list_items(&state.db, id).await {
        Ok(lines) => (StatusCode::OK, Json(json!(lines))),
        Err(_) => fail(StatusCode::INTERNAL_SERVER_ERROR, "could not list items"),
    }
}

async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(item): Json<NewItem>,
) -> Reply {
    if orders::add_item(&state.db, id, &item).await {
        (StatusCode::CREATED, Json(json!({ "created": true })))
    } else {
        fail(StatusCode::BAD_REQUEST, "could not add item")
    }
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((id, product_id)): Path<(i64, i64)>,
    Json(changes): Json<ItemChanges>,
) -> Reply {
    // the repository rejects empty changes without touching the table
    let empty = changes.is_empty();
    if items::update(&state.db, id, product_id, &changes).await {
        (StatusCode::OK, Json(json!({ "updated": true })))
    } else if empty {
        fail(StatusCode::BAD_REQUEST, "no fields to update")
    } else {
        fail(StatusCode::NOT_FOUND, "item not updated")
    }
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((id, product_id)): Path<(i64, i64)>,
) -> Reply {
    if items::delete(&state.db, id, product_id).await {
        (StatusCode::OK, Json(json!({ "deleted": true })))
    } else {
        fail(StatusCode::NOT_FOUND, "item not found")
    }
}
