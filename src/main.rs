//! ini - Read and edit sectioned key/value files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ini_store::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
