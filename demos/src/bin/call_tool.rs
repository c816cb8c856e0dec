//! Invokes one bridge tool from the command line.
//!
//! # Running
//!
//! ```bash
//! # Point at a backend (defaults to localhost:8443, plain HTTP)
//! export SPICEDB_ENDPOINT="localhost:8443"
//! export SPICEDB_API_KEY="somerandomkeyhere"
//!
//! # Call a tool with JSON arguments
//! cargo run -p spicebridge-demos --bin call_tool -- check-permission \
//!   '{"resourceType":"document","resourceId":"readme","permission":"view","subjectType":"user","subjectId":"alice"}'
//! ```
//!
//! Set `RUST_LOG=spicebridge=debug` to see every backend call.

use std::env;
use std::process::ExitCode;

use serde_json::Value;
use spicebridge::prelude::*;
use spicebridge::tools::names;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(name) = args.next() else {
        eprintln!("usage: call_tool <tool> [json-args]");
        eprintln!("tools: {}", names::ALL.join(", "));
        return ExitCode::FAILURE;
    };

    let tool_args = match args.next() {
        Some(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("arguments are not valid JSON: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Value::Null,
    };

    // One client for the whole process
    let client = match Client::from_config(&Config::from_env()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let tools = Tools::new(client);

    let output = tools.call(&name, tool_args).await;
    println!("{}", output.text);
    if let Some(structured) = output.structured {
        println!("\n{structured:#}");
    }

    if output.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
