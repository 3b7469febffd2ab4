use std::process::ExitCode;

fn main() -> ExitCode {
    match mynetd::run_server() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("mynetd: {error}");
            ExitCode::FAILURE
        }
    }
}
