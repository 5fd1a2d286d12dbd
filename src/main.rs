// orderdesk - order management backend

use orderdesk::cli;

#[tokio::main]
async fn main() -> miette::Result<()> {
    cli::run().await
}
