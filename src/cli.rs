// command line interface

use crate::core::{NewClient, clients, orders};
use crate::output::Output;
use crate::{Db, Server, logging};
use clap::{Parser, Subcommand};
use miette::Result;

#[derive(Parser, Debug)]
#[command(name = "orderdesk", about = "Clients, orders, and order items")]
struct Cli {
    /// database connection url
    #[arg(long, short, env = "DATABASE_URL", global = true)]
    db: Option<String>,

    /// pool size
    #[arg(
        long,
        env = "ORDERDESK_MAX_CONNECTIONS",
        default_value_t = 5,
        global = true
    )]
    max_connections: u32,

    /// print json instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// debug logging (RUST_LOG wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3333")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// check that the database answers
    Ping,

    /// client commands
    #[command(subcommand)]
    Clients(ClientCommands),

    /// order commands
    #[command(subcommand)]
    Orders(OrderCommands),
}

#[derive(Subcommand, Debug)]
enum ClientCommands {
    /// list all clients
    List,
    /// register a client
    Add { tax_id: String, name: String },
}

#[derive(Subcommand, Debug)]
enum OrderCommands {
    /// list orders, newest first
    List,
    /// show one order with its items
    Show { id: i64 },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug)?;

    let url = cli
        .db
        .as_deref()
        .ok_or_else(|| miette::miette!("database url required (--db or DATABASE_URL)"))?;

    match cli.command {
        Commands::Serve { port, host } => {
            Ok(Server::run(url, cli.max_connections, &host, port).await?)
        }
        command => {
            let db = Db::connect_with(url, cli.max_connections).await?;
            run_command(&db, command, cli.json).await
        }
    }
}

async fn run_command(db: &Db, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Serve { .. } => miette::bail!("serve is not a one-shot command"),

        Commands::Ping => {
            db.ping().await?;
            println!("ok ({})", db.dialect_name());
        }

        Commands::Clients(ClientCommands::List) => {
            let list = clients::list(db)
                .await
                .ok_or_else(|| miette::miette!("could not list clients"))?;
            if json {
                Output::raw(&list);
            } else {
                Output::clients(&list);
            }
        }

        Commands::Clients(ClientCommands::Add { tax_id, name }) => {
            if !clients::create(db, &NewClient::new(tax_id, name)).await {
                miette::bail!("client was not created");
            }
            println!("client created");
        }

        Commands::Orders(OrderCommands::List) => {
            let list = orders::list(db).await?;
            if json {
                Output::raw(&list);
            } else {
                Output::orders(&list);
            }
        }

        Commands::Orders(OrderCommands::Show { id }) => {
            let order = orders::get_with_items(db, id)
                .await
                .ok_or_else(|| miette::miette!("order {id} not found"))?;
            if json {
                Output::raw(&order);
            } else {
                Output::order(&order);
            }
        }
    }

    Ok(())
}
