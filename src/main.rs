use std::process::ExitCode;

fn main() -> ExitCode {
    match chat_archive_viewer::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
