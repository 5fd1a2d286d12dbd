// client repository

use crate::Error;
use crate::core::{Client, Db, NewClient};
use tracing::{error, info};

/// All clients in storage order. `None` means the query failed, which is
/// different from an empty table.
pub async fn list(db: &Db) -> Option<Vec<Client>> {
    match try_list(db).await {
        Ok(clients) => Some(clients),
        Err(e) => {
            error!("failed to list clients: {e}");
            None
        }
    }
}

async fn try_list(db: &Db) -> Result<Vec<Client>, Error> {
    let rows: Vec<(i64, String, String)> =
        sqlx::query_as("SELECT id_cliente, cpf, nome FROM cliente")
            .fetch_all(db.pool())
            .await?;

    Ok(rows
        .into_iter()
        .map(|(id, tax_id, name)| Client { id, tax_id, name })
        .collect())
}

/// Insert a client with its name upper-cased. Duplicate tax ids and any
/// other storage failure come back as `false`.
pub async fn create(db: &Db, client: &NewClient) -> bool {
    match try_create(db, client).await {
        Ok(Some(id)) => {
            info!(id, "client created");
            true
        }
        Ok(None) => false,
        Err(e) => {
            error!(tax_id = %client.tax_id, "failed to create client: {e}");
            false
        }
    }
}

async fn try_create(db: &Db, client: &NewClient) -> Result<Option<i64>, Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "INSERT INTO cliente (cpf, nome) VALUES ($1, $2) RETURNING id_cliente",
    )
    .bind(client.tax_id.as_str())
    .bind(client.name.to_uppercase())
    .fetch_optional(db.pool())
    .await?;

    Ok(row.map(|(id,)| id))
}
