//! # Till Entry Point
//!
//! ```text
//! $ till --age 21
//! Bananas    1.25
//! Cereal    3.75
//! Candy    2.50
//! Beer    4.95
//! ------------------------
//! SUBTOTAL:     12.45
//! TAX:     0.61
//! TOTAL:     13.06
//! ```

use std::process::ExitCode;

use till_cli::cli::CommandLine;

fn main() -> ExitCode {
    let cli = CommandLine::parse_args();

    till_cli::init_tracing();

    match till_cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("till: {}", err);
            ExitCode::FAILURE
        }
    }
}
