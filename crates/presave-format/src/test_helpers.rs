use crate::arg_parser::parse_args;
use crate::environment::TestEnvironment;
use crate::run_cli::AppError;
use crate::run_cli::run_cli;
use crate::utils::TestStdInReader;

pub fn run_test_cli(args: Vec<&str>, environment: &TestEnvironment) -> Result<(), AppError> {
  run_test_cli_with_stdin(args, "", environment)
}

pub fn run_test_cli_with_stdin(args: Vec<&str>, stdin_text: &str, environment: &TestEnvironment) -> Result<(), AppError> {
  let mut args: Vec<String> = args.into_iter().map(String::from).collect();
  args.insert(0, String::from(""));
  let args = parse_args(args, TestStdInReader::from(stdin_text))?;
  run_cli(&args, environment)
}
