//! XCFramework bundler - multi-platform framework assembly.
//!
//! This binary archives a scheme for every requested Apple platform, collects
//! frameworks, dSYMs and BCSymbolMaps from each archive, and assembles them
//! into a single zipped XCFramework.

mod bundler;
mod cli;
mod error;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
