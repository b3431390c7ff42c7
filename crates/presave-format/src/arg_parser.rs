use anyhow::Result;
use clap::ArgMatches;
use thiserror::Error;

use crate::utils::StdInReader;

pub struct CliArgs {
  pub sub_command: SubCommand,
  pub verbose: bool,
  pub config: Option<String>,
}

impl CliArgs {
  pub fn is_stdout_machine_readable(&self) -> bool {
    // these output text that's read by another program from stdout
    matches!(self.sub_command, SubCommand::StdInFmt(..) | SubCommand::OutputResolvedSteps(..))
  }

  fn new_with_sub_command(sub_command: SubCommand) -> CliArgs {
    CliArgs {
      sub_command,
      verbose: false,
      config: None,
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubCommand {
  Fmt(FmtSubCommand),
  StdInFmt(StdInFmtSubCommand),
  OutputResolvedSteps(OutputResolvedStepsSubCommand),
  Version,
  Help(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct FmtSubCommand {
  pub file_path: String,
  pub language: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct StdInFmtSubCommand {
  pub language: String,
  pub file_path: Option<String>,
  pub file_text: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct OutputResolvedStepsSubCommand {
  pub language: String,
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ParseArgsError(#[from] anyhow::Error);

pub fn parse_args<TStdInReader: StdInReader>(args: Vec<String>, std_in_reader: TStdInReader) -> Result<CliArgs, ParseArgsError> {
  inner_parse_args(args, std_in_reader).map_err(ParseArgsError)
}

fn inner_parse_args<TStdInReader: StdInReader>(args: Vec<String>, std_in_reader: TStdInReader) -> Result<CliArgs> {
  // this is all done because clap doesn't output exactly how I like
  if args.len() == 1 || (args.len() == 2 && (args[1] == "help" || args[1] == "--help")) {
    let mut cli_parser = create_cli_parser(CliArgParserKind::ForOutputtingMainHelp);
    cli_parser.try_get_matches_from_mut(vec![""])?;
    let help_text = format!("{}", cli_parser.render_help());
    return Ok(CliArgs::new_with_sub_command(SubCommand::Help(help_text)));
  } else if args.len() == 2 && (args[1] == "-v" || args[1] == "-V" || args[1] == "--version") {
    return Ok(CliArgs::new_with_sub_command(SubCommand::Version));
  }

  let cli_parser = create_cli_parser(CliArgParserKind::Default);
  let matches = cli_parser.try_get_matches_from(&args)?;

  let sub_command = match matches.subcommand() {
    Some(("fmt", matches)) => SubCommand::Fmt(FmtSubCommand {
      file_path: get_required_string(matches, "file"),
      language: matches.get_one::<String>("language").map(String::from),
    }),
    Some(("stdin-fmt", matches)) => SubCommand::StdInFmt(StdInFmtSubCommand {
      language: get_required_string(matches, "language"),
      file_path: matches.get_one::<String>("file-path").map(String::from),
      file_text: std_in_reader.read()?,
    }),
    Some(("output-resolved-steps", matches)) => SubCommand::OutputResolvedSteps(OutputResolvedStepsSubCommand {
      language: get_required_string(matches, "language"),
    }),
    Some(("version", _)) => SubCommand::Version,
    _ => unreachable!(),
  };

  Ok(CliArgs {
    sub_command,
    verbose: matches.get_flag("verbose"),
    config: matches.get_one::<String>("config").map(String::from),
  })
}

fn get_required_string(matches: &ArgMatches, id: &str) -> String {
  // clap errors before this when a required argument is missing
  matches.get_one::<String>(id).map(String::from).unwrap_or_default()
}

#[derive(Default, PartialEq, Eq)]
pub enum CliArgParserKind {
  ForOutputtingMainHelp,
  #[default]
  Default,
}

pub fn create_cli_parser(kind: CliArgParserKind) -> clap::Command {
  use clap::Arg;
  use clap::Command;

  let mut app = Command::new("presave-format");

  // hack to get this to display the way I want
  app = if kind == CliArgParserKind::ForOutputtingMainHelp {
    app.disable_help_subcommand(true).disable_version_flag(true).disable_help_flag(true)
  } else {
    app.subcommand_required(true)
  };

  app
    .bin_name("presave-format")
    .version(env!("CARGO_PKG_VERSION"))
    .about("Formats documents with external formatters right before they're saved.")
    .override_usage("presave-format <SUBCOMMAND> [OPTIONS]")
    .help_template(r#"{bin} {version}

{about}

USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

More details at `presave-format help <SUBCOMMAND>`

OPTIONS:
{options}{after-help}"#)
    .after_help(
      r#"CONFIGURATION:
  Steps are read from a presave-format.json or presave-format.jsonc file in the
  document's directory or an ancestor directory. The file is read on every run.

EXAMPLES:
  Format a file as if it was being saved:

    presave-format fmt src/Main.elm

  Format text from an editor buffer:

    presave-format stdin-fmt --language elm --file-path /project/src/Main.elm"#,
    )
    .subcommand(
      Command::new("fmt")
        .about("Runs the steps for a file and writes the result back to the file.")
        .arg(Arg::new("file").help("Path of the file to format.").required(true).num_args(1))
        .arg(
          Arg::new("language")
            .long("language")
            .value_name("id")
            .help("Language identifier of the file. Defaults to the file extension.")
            .num_args(1),
        ),
    )
    .subcommand(
      Command::new("stdin-fmt")
        .about("Runs the steps for text provided on stdin and outputs the result to stdout.")
        .arg(
          Arg::new("language")
            .long("language")
            .value_name("id")
            .help("Language identifier of the text.")
            .required(true)
            .num_args(1),
        )
        .arg(
          Arg::new("file-path")
            .long("file-path")
            .value_name("path")
            .help("Path of the document. Without it no step applies, as the include and exclude rules can't be checked.")
            .num_args(1),
        ),
    )
    .subcommand(
      Command::new("output-resolved-steps")
        .about("Prints the steps that would be considered for a language.")
        .arg(
          Arg::new("language")
            .long("language")
            .value_name("id")
            .help("Language identifier to resolve the steps for.")
            .required(true)
            .num_args(1),
        ),
    )
    .subcommand(Command::new("version").about("Prints the version."))
    .arg(
      Arg::new("config")
        .long("config")
        .short('c')
        .help("Path to the configuration file. Defaults to searching the document's directory and its ancestors.")
        .global(true)
        .num_args(1),
    )
    .arg(
      Arg::new("verbose")
        .long("verbose")
        .help("Prints additional diagnostic information.")
        .global(true)
        .action(clap::ArgAction::SetTrue),
    )
}
