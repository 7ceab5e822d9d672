use std::{
    fs::read_to_string,
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use interpreter::repl::{
    config::Config,
    repl::{run, start},
};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!("usage: interpreter [--tokens|--parse] [FILE]");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(config.log_level)
        .init();

    match &config.file {
        Some(path) => {
            let source = match read_to_string(path) {
                Ok(source) => source,
                Err(err) => {
                    error!(path = %path.display(), %err, "failed to read source file");
                    return ExitCode::FAILURE;
                }
            };

            let file_name = path.to_string_lossy();
            info!(file = %file_name, mode = ?config.mode, "running front end over file");

            let stdout = io::stdout();
            let mut output = BufWriter::new(stdout.lock());
            let clean = run(&source, &file_name, config.mode, &mut output)
                .and_then(|clean| output.flush().map(|_| clean));

            match clean {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(err) => {
                    error!(%err, "failed to write output");
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            info!(mode = ?config.mode, "starting interactive loop");

            let stdin = io::stdin();
            let stdout = io::stdout();
            match start(stdin.lock(), stdout.lock(), config.mode) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!(%err, "interactive loop failed");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
