use std::process::ExitCode;

fn main() -> ExitCode {
    match epack_export::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
