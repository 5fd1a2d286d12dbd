// order item repository

use crate::Error;
use crate::core::{Db, ItemChanges, ItemLine, OrderItem};
use sqlx::Any;
use sqlx::any::AnyArguments;
use sqlx::query::Query;
use tracing::{error, info, warn};

pub(crate) const INSERT_ITEM: &str = "INSERT INTO item_venda (id_venda, id_produto, qtd_produto, preco_unit)
     VALUES ($1, $2, $3, $4)";

pub(crate) const SELECT_ITEMS: &str = r#"SELECT iv.id_produto, p.descricao, iv.qtd_produto,
            CAST(iv.preco_unit AS DOUBLE PRECISION)
       FROM item_venda iv
       JOIN produto p ON p.id_produto = iv.id_produto
      WHERE iv.id_venda = $1
      ORDER BY iv.id_produto"#;

pub async fn create(db: &Db, item: &OrderItem) -> bool {
    match try_create(db, item).await {
        Ok(true) => {
            info!(
                order_id = item.order_id,
                product_id = item.product_id,
                "item created"
            );
            true
        }
        Ok(false) => false,
        Err(e) => {
            error!(
                order_id = item.order_id,
                product_id = item.product_id,
                "failed to create item: {e}"
            );
            false
        }
    }
}

async fn try_create(db: &Db, item: &OrderItem) -> Result<bool, Error> {
    let done = sqlx::query(INSERT_ITEM)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(db.pool())
        .await?;

    Ok(done.rows_affected() == 1)
}

/// Items of an order joined with product descriptions, by product id.
/// An order without items gives `Ok(vec![])`; a failed query gives `Err`.
pub async fn list_by_order(db: &Db, order_id: i64) -> Result<Vec<ItemLine>, Error> {
    fetch_lines(db, order_id).await.inspect_err(|e| {
        error!(order_id, "failed to list items: {e}");
    })
}

pub(crate) async fn fetch_lines(db: &Db, order_id: i64) -> Result<Vec<ItemLine>, Error> {
    let rows: Vec<(i64, String, i64, f64)> = sqlx::query_as(SELECT_ITEMS)
        .bind(order_id)
        .fetch_all(db.pool())
        .await?;

    Ok(rows
        .into_iter()
        .map(|(product_id, description, quantity, unit_price)| ItemLine {
            product_id,
            description,
            quantity,
            unit_price,
        })
        .collect())
}

/// Rewrite only the supplied fields of one item. Empty changes never reach
/// the database and return `false`.
pub async fn update(db: &Db, order_id: i64, product_id: i64, changes: &ItemChanges) -> bool {
    match try_update(db, order_id, product_id, changes).await {
        Ok(true) => {
            info!(order_id, product_id, "item updated");
            true
        }
        Ok(false) => false,
        Err(Error::NoChanges) => {
            warn!(order_id, product_id, "no fields to update");
            false
        }
        Err(e) => {
            error!(order_id, product_id, "failed to update item: {e}");
            false
        }
    }
}

async fn try_update(
    db: &Db,
    order_id: i64,
    product_id: i64,
    changes: &ItemChanges,
) -> Result<bool, Error> {
    let set = Assignments::from(changes);
    if set.is_empty() {
        return Err(Error::NoChanges);
    }

    let next = set.len() + 1;
    let sql = format!(
        "UPDATE item_venda SET {} WHERE id_venda = ${} AND id_produto = ${}",
        set.clause(),
        next,
        next + 1
    );

    let done = set
        .bind(sqlx::query(&sql))
        .bind(order_id)
        .bind(product_id)
        .execute(db.pool())
        .await?;

    Ok(done.rows_affected() == 1)
}

/// Remove one item. Removing a missing pair is reported as `false`.
pub async fn delete(db: &Db, order_id: i64, product_id: i64) -> bool {
    let result = sqlx::query("DELETE FROM item_venda WHERE id_venda = $1 AND id_produto = $2")
        .bind(order_id)
        .bind(product_id)
        .execute(db.pool())
        .await;

    match result {
        Ok(done) if done.rows_affected() == 1 => {
            info!(order_id, product_id, "item removed");
            true
        }
        Ok(_) => false,
        Err(e) => {
            error!(order_id, product_id, "failed to remove item: {e}");
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    Int(i64),
    Real(f64),
}

/// SET clause for a partial update: the supplied (column, value) pairs in a
/// fixed column order, numbered from `$1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignments {
    pairs: Vec<(&'static str, Param)>,
}

impl Assignments {
    pub fn new(pairs: impl IntoIterator<Item = (&'static str, Option<Param>)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .filter_map(|(column, value)| value.map(|v| (column, v)))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn clause(&self) -> String {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // values go on in the same order as the placeholders in clause()
    pub fn bind<'q>(
        &self,
        mut query: Query<'q, Any, AnyArguments<'q>>,
    ) -> Query<'q, Any, AnyArguments<'q>> {
        for (_, value) in &self.pairs {
            query = match *value {
                Param::Int(v) => query.bind(v),
                Param::Real(v) => query.bind(v),
            };
        }
        query
    }
}

impl From<&ItemChanges> for Assignments {
    fn from(changes: &ItemChanges) -> Self {
        Self::new([
            ("qtd_produto", changes.quantity.map(Param::Int)),
            ("preco_unit", changes.unit_price.map(Param::Real)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changes_have_no_assignments() {
        let set = Assignments::from(&ItemChanges::default());
        assert!(set.is_empty());
        assert_eq!(set.clause(), "");
    }

    #[test]
    fn quantity_only() {
        let set = Assignments::from(&ItemChanges::quantity(5));
        assert_eq!(set.len(), 1);
        assert_eq!(set.clause(), "qtd_produto = $1");
    }

    #[test]
    fn price_only_starts_at_first_placeholder() {
        let set = Assignments::from(&ItemChanges::unit_price(9.5));
        assert_eq!(set.clause(), "preco_unit = $1");
    }

    #[test]
    fn both_fields_keep_column_order() {
        let changes = ItemChanges {
            quantity: Some(2),
            unit_price: Some(3.25),
        };
        let set = Assignments::from(&changes);
        assert_eq!(set.clause(), "qtd_produto = $1, preco_unit = $2");
        assert_eq!(
            set.pairs,
            vec![("qtd_produto", Param::Int(2)), ("preco_unit", Param::Real(3.25))]
        );
    }
}
