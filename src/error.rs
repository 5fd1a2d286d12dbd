use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Order insert returned no id")]
    OrderInsert,

    #[error("No fields to update")]
    NoChanges,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Config error: {0}")]
    Config(String),
}
