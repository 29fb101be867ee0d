//! # FrameIt Billing Entry Point
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Initialize tracing (logging to stderr)
//! 3. Hand the command to `frameit_billing::execute`
//! 4. Print the result, or the error with exit status 1

use std::process::ExitCode;

use clap::Parser;

use frameit_billing::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The actual work is in lib.rs for better testability
    frameit_billing::init_tracing();

    match frameit_billing::execute(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
