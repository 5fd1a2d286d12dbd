// orders - transactional creation with items, plus read queries

use crate::Error;
use crate::core::items::{self, INSERT_ITEM};
use crate::core::{Db, ItemLine, NewItem, Order, OrderItem, OrderWithItems};
use sqlx::{AnyConnection, Connection};
use tracing::{debug, error, info, warn};

const SELECT_ORDERS: &str = r#"SELECT v.id_venda, v.id_cliente, CAST(v.data_venda AS TEXT), c.nome
       FROM venda v
       JOIN cliente c ON c.id_cliente = v.id_cliente"#;

/// Where an order-creation transaction is. `Committed` and `RolledBack`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Started,
    HeaderInserted { order_id: i64 },
    ItemInserted { order_id: i64, count: usize },
    Committed { order_id: i64 },
    RolledBack,
}

impl TxState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TxState::Committed { .. } | TxState::RolledBack)
    }

    fn advance(&mut self, next: TxState) {
        let from = *self;
        debug!(?from, to = ?next, "order tx");
        *self = next;
    }
}

/// Insert an order header and all of its items as one transaction.
///
/// Returns the new order id, or `None` if anything failed; in that case
/// nothing was written. The connection goes back to the pool once the
/// transaction has committed or rolled back.
pub async fn create_with_items(db: &Db, client_id: i64, items: &[NewItem]) -> Option<i64> {
    let mut conn = match db.pool().acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            error!(client_id, "failed to acquire connection for order: {e}");
            return None;
        }
    };

    let mut state = TxState::Started;
    let outcome = run_transaction(&mut conn, client_id, items, &mut state).await;
    debug_assert!(state.is_terminal());
    drop(conn);

    match outcome {
        Ok(order_id) => {
            info!(order_id, client_id, items = items.len(), "order created");
            Some(order_id)
        }
        Err(e) => {
            error!(client_id, "failed to create order: {e}");
            None
        }
    }
}

async fn run_transaction(
    conn: &mut AnyConnection,
    client_id: i64,
    items: &[NewItem],
    state: &mut TxState,
) -> Result<i64, Error> {
    let mut tx = match conn.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            state.advance(TxState::RolledBack);
            return Err(e.into());
        }
    };

    match insert_all(&mut tx, client_id, items, state).await {
        Ok(order_id) => match tx.commit().await {
            Ok(()) => {
                state.advance(TxState::Committed { order_id });
                Ok(order_id)
            }
            Err(e) => {
                state.advance(TxState::RolledBack);
                Err(e.into())
            }
        },
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!("rollback failed: {rollback}");
            }
            state.advance(TxState::RolledBack);
            Err(e)
        }
    }
}

// items go in one at a time, in caller order, on the transaction's connection
async fn insert_all(
    conn: &mut AnyConnection,
    client_id: i64,
    items: &[NewItem],
    state: &mut TxState,
) -> Result<i64, Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("INSERT INTO venda (id_cliente) VALUES ($1) RETURNING id_venda")
            .bind(client_id)
            .fetch_optional(&mut *conn)
            .await?;
    let (order_id,) = row.ok_or(Error::OrderInsert)?;
    state.advance(TxState::HeaderInserted { order_id });

    for (i, item) in items.iter().enumerate() {
        sqlx::query(INSERT_ITEM)
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *conn)
            .await?;
        state.advance(TxState::ItemInserted {
            order_id,
            count: i + 1,
        });
    }

    Ok(order_id)
}

/// Every order with its client's name, newest first.
pub async fn list(db: &Db) -> Result<Vec<Order>, Error> {
    let sql = format!("{SELECT_ORDERS} ORDER BY v.id_venda DESC");
    let rows: Vec<(i64, i64, String, String)> = sqlx::query_as(&sql)
        .fetch_all(db.pool())
        .await
        .inspect_err(|e| error!("failed to list orders: {e}"))?;

    Ok(rows.into_iter().map(order_from_row).collect())
}

/// Order header and items, fetched concurrently. `None` when the order does
/// not exist or either query failed.
pub async fn get_with_items(db: &Db, order_id: i64) -> Option<OrderWithItems> {
    let (header, lines) =
        futures::join!(fetch_header(db, order_id), items::fetch_lines(db, order_id));

    match header.and_then(|order| lines.map(|items| (order, items))) {
        Ok((Some(order), items)) => Some(OrderWithItems { order, items }),
        Ok((None, _)) => None,
        Err(e) => {
            error!(order_id, "failed to fetch order: {e}");
            None
        }
    }
}

async fn fetch_header(db: &Db, order_id: i64) -> Result<Option<Order>, Error> {
    let sql = format!("{SELECT_ORDERS} WHERE v.id_venda = $1");
    let row: Option<(i64, i64, String, String)> = sqlx::query_as(&sql)
        .bind(order_id)
        .fetch_optional(db.pool())
        .await?;

    Ok(row.map(order_from_row))
}

fn order_from_row((id, client_id, created_at, client_name): (i64, i64, String, String)) -> Order {
    Order {
        id,
        client_id,
        created_at,
        client_name,
    }
}

/// Add one item to an existing order, outside any creation transaction.
pub async fn add_item(db: &Db, order_id: i64, item: &NewItem) -> bool {
    items::create(db, &OrderItem::new(order_id, item)).await
}

pub async fn list_items(db: &Db, order_id: i64) -> Result<Vec<ItemLine>, Error> {
    items::list_by_order(db, order_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_commit_and_rollback_are_terminal() {
        assert!(!TxState::Started.is_terminal());
        assert!(!TxState::HeaderInserted { order_id: 1 }.is_terminal());
        assert!(
            !TxState::ItemInserted {
                order_id: 1,
                count: 3
            }
            .is_terminal()
        );
        assert!(TxState::Committed { order_id: 1 }.is_terminal());
        assert!(TxState::RolledBack.is_terminal());
    }

    #[test]
    fn advance_replaces_state() {
        let mut state = TxState::Started;
        state.advance(TxState::HeaderInserted { order_id: 7 });
        assert_eq!(state, TxState::HeaderInserted { order_id: 7 });
        state.advance(TxState::RolledBack);
        assert!(state.is_terminal());
    }
}
