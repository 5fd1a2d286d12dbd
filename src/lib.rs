// orderdesk library - clients, orders, and order items

pub mod cli;
pub mod core;
mod error;
pub mod logging;
mod output;
mod server;

pub use crate::core::{Db, Dialect};
pub use error::Error;
pub use server::Server;
