#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match covgap::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("covgap: {e}");
            ExitCode::from(2)
        }
    }
}
