// plain records for clients, orders, and order items

use serde::{Deserialize, Serialize};

/// A stored client. `id` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub tax_id: String,
    pub name: String,
}

/// A client that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub tax_id: String,
    pub name: String,
}

impl NewClient {
    pub fn new(tax_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tax_id: tax_id.into(),
            name: name.into(),
        }
    }
}

/// Order header joined with the owning client's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub created_at: String,
    pub client_name: String,
}

/// One line of an order, keyed by (order_id, product_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn new(order_id: i64, item: &NewItem) -> Self {
        Self {
            order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

// item as the caller sends it, before it belongs to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

impl NewItem {
    pub fn new(product_id: i64, quantity: i64, unit_price: f64) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }
}

/// An order item joined with its product description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLine {
    pub product_id: i64,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<ItemLine>,
}

/// Partial update for an order item. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemChanges {
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
}

impl ItemChanges {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn unit_price(unit_price: f64) -> Self {
        Self {
            unit_price: Some(unit_price),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.unit_price.is_none()
    }
}
