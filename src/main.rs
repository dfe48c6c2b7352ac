extern crate clap;
extern crate i2cdev;
extern crate nix;
extern crate serde;
extern crate serde_yaml;
#[macro_use]
extern crate maplit;

#[macro_use]
extern crate log;
extern crate env_logger;

use std::env;
use std::io::Write;
use std::process;

mod command;
mod i2c;

use command::args::{self, UsageError};
use command::RunError;
use i2c::linux::Session;

const DEFAULT_NAME: &str = "ft5x06-register-tool";

fn init_logging() {
    // Every line carries the operation that produced it, taken from the log target
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}]: {}", record.target(), record.args()))
        .init();
}

fn main() {
    init_logging();

    let name = env::args().next().unwrap_or_else(|| String::from(DEFAULT_NAME));

    let config = match args::parse_args(env::args()) {
        Ok(config) => config,
        Err(UsageError::Help) => {
            print!("{}", args::usage(&name));
            process::exit(command::EXIT_USAGE);
        }
        Err(err) => {
            println!("[main]: {}", err);
            print!("{}", args::usage(&name));
            process::exit(command::EXIT_USAGE);
        }
    };

    let result = command::execute(&config, Session::open);

    if let Some(line) = command::report_line(&result) {
        println!("{}", line);
    }

    if let Err(RunError::Transport(ref err)) = result {
        warn!(target: "main", "{} reported an error, nothing to show", err.op());
    }

    process::exit(command::exit_code(&result));
}
