//! Lists the bridge's navigable resources, or reads one.
//!
//! # Running
//!
//! ```bash
//! # List schema, relationships and one entry per definition
//! cargo run -p spicebridge-demos --bin browse_resources
//!
//! # Read a resource
//! cargo run -p spicebridge-demos --bin browse_resources -- 'relationships://document/readme'
//! cargo run -p spicebridge-demos --bin browse_resources -- 'definition://document'
//! ```

use std::env;

use spicebridge::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let tools = Tools::new(Client::from_config(&Config::from_env())?);

    match env::args().nth(1) {
        Some(uri) => {
            let content = tools.read_resource(&uri).await?;
            println!("{}", content.text);
        }
        None => {
            for resource in tools.list_resources().await? {
                println!("{:<40} {}", resource.uri, resource.description);
            }
        }
    }

    Ok(())
}
