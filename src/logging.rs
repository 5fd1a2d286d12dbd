// tracing setup
//
//   RUST_LOG=orderdesk=debug orderdesk serve   # fine-grained control
//   orderdesk --debug serve                    # debug unless RUST_LOG is set

use crate::Error;
use tracing_subscriber::EnvFilter;

pub fn init(debug: bool) -> Result<(), Error> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|e| Error::Config(e.to_string()))
}
