use std::process::ExitCode;

fn main() -> ExitCode {
    pitchcraft_cli::run()
}
