use std::process::ExitCode;

fn main() -> ExitCode {
    maxibot_cli::run()
}
