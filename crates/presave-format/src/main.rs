#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

#[macro_use]
mod environment;

use environment::RealEnvironment;
use environment::RealEnvironmentOptions;
use run_cli::AppError;
use utils::RealStdInReader;

mod arg_parser;
mod configuration;
mod document;
mod format;
mod pre_save;
mod run_cli;
mod utils;

#[cfg(test)]
mod test_helpers;

fn main() {
  match run() {
    Ok(_) => {}
    Err(err) => {
      let result = format!("{:#}", err.inner);
      #[allow(clippy::print_stderr)]
      if !result.is_empty() {
        eprintln!("{}", result);
      }
      std::process::exit(err.exit_code);
    }
  }
}

fn run() -> Result<(), AppError> {
  let args = arg_parser::parse_args(std::env::args().collect(), RealStdInReader)?;
  let environment = RealEnvironment::new(&RealEnvironmentOptions {
    is_verbose: args.verbose,
    is_stdout_machine_readable: args.is_stdout_machine_readable(),
  });
  run_cli::run_cli(&args, &environment)
}
