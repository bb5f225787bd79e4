//! Card Authorizer CLI
//!
//! A streaming authorizer that reads line-delimited JSON events and
//! outputs one audit record per event.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.ndjson > audit.ndjson
//! ```
//!
//! An optional second argument writes the audit log to a file instead of
//! stdout.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use authorizer::{Authorizer, AuthorizerError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(AuthorizerError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut authorizer = Authorizer::new();
    authorizer.process(reader)?;

    match args.get(2) {
        Some(output_path) => {
            let file = File::create(output_path)?;
            authorizer.write_output(BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            authorizer.write_output(handle)?;
        }
    }

    Ok(())
}
