use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{error::ErrorKind, Parser};
use env_logger::Env;
use vmmgr::{Config, VmmgrError};

fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_filter())).init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result =
        vmmgr::run(&config, &mut out).and_then(|_| out.flush().map_err(VmmgrError::Output));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = out.flush();
            eprintln!("[-] {}", e);
            ExitCode::FAILURE
        }
    }
}
