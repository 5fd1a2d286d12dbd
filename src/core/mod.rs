// core logic - database handle, records, and per-entity repositories

pub mod clients;
mod db;
pub mod items;
mod models;
pub mod orders;

pub use db::{Db, Dialect};
pub use models::{Client, ItemChanges, ItemLine, NewClient, NewItem, Order, OrderItem, OrderWithItems};
