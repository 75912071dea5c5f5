//! Command line entry point: inspect locales, look up keys, check dictionaries.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use hubtrac_i18n::Locale;
use hubtrac_i18n::config::{
    ConfigError,
    ConfigManager,
};
use hubtrac_i18n::dictionary::DictionaryError;
use hubtrac_i18n::schema::check_schema;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  hubtrac-i18n locales
  hubtrac-i18n lookup <locale> <key.path>
  hubtrac-i18n check [--dir <path>]";

/// Exit status for anything that kept a command from running.
const ERROR_STATUS: u8 = 2;

#[derive(Error, Debug)]
enum CliError {
    #[error("{}", USAGE)]
    Usage,
    #[error("Unexpected arguments: {0:?}\n{usage}", usage = USAGE)]
    UnexpectedArguments(Vec<OsString>),
    #[error("Invalid arguments: {0}\n{usage}", usage = USAGE)]
    Arguments(#[from] pico_args::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Locales,
    Lookup { locale: String, path: String },
    Check { dir: Option<PathBuf> },
}

impl Command {
    /// Parses the whole argument list; leftovers are an error.
    fn parse(mut args: pico_args::Arguments) -> Result<Self, CliError> {
        let command = match args.subcommand()?.as_deref() {
            Some("locales") => Self::Locales,
            Some("lookup") => {
                Self::Lookup { locale: args.free_from_str()?, path: args.free_from_str()? }
            }
            Some("check") => Self::Check { dir: args.opt_value_from_str("--dir")? },
            _ => return Err(CliError::Usage),
        };

        let remaining = args.finish();
        if !remaining.is_empty() {
            return Err(CliError::UnexpectedArguments(remaining));
        }
        Ok(command)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Command::parse(pico_args::Arguments::from_env()).and_then(run) {
        Ok(status) => ExitCode::from(status),
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::from(ERROR_STATUS)
        }
    }
}

fn run(command: Command) -> Result<u8, CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(std::env::current_dir()?))?;
    let settings = config_manager.get_settings();

    let mut stdout = std::io::stdout().lock();
    match command {
        Command::Locales => {
            for locale in Locale::ALL {
                let marker = if locale == Locale::DEFAULT { " (default)" } else { "" };
                writeln!(stdout, "{locale}\t{}\t{}{marker}", locale.flag(), locale.display_name())?;
            }
            Ok(0)
        }
        Command::Lookup { locale, path } => {
            let dictionaries = config_manager.open_dictionaries(None)?;
            writeln!(stdout, "{}", dictionaries.lookup(&locale, &path))?;
            Ok(0)
        }
        Command::Check { dir } => {
            let dictionaries = config_manager.open_dictionaries(dir.as_deref())?;
            let report = check_schema(&dictionaries, &settings.schema_check);

            write!(stdout, "{report}")?;
            if report.is_clean() {
                writeln!(stdout, "All dictionaries share the same schema")?;
            } else {
                writeln!(stdout, "{} issue(s) found", report.len())?;
            }
            Ok(if report.passes(settings.schema_check.severity) { 0 } else { 1 })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Result<Command, CliError> {
        Command::parse(pico_args::Arguments::from_vec(args.iter().map(OsString::from).collect()))
    }

    #[rstest]
    fn parses_locales() {
        assert_eq!(parse(&["locales"]).unwrap(), Command::Locales);
    }

    #[rstest]
    fn parses_lookup() {
        assert_eq!(
            parse(&["lookup", "de", "hero.title"]).unwrap(),
            Command::Lookup { locale: "de".to_string(), path: "hero.title".to_string() }
        );
    }

    #[rstest]
    #[case::bundled(&["check"], None)]
    #[case::dir(&["check", "--dir", "dicts"], Some(PathBuf::from("dicts")))]
    fn parses_check(#[case] args: &[&str], #[case] dir: Option<PathBuf>) {
        assert_eq!(parse(args).unwrap(), Command::Check { dir });
    }

    #[rstest]
    #[case::no_subcommand(&[])]
    #[case::unknown_subcommand(&["translate"])]
    fn unknown_command_is_usage_error(#[case] args: &[&str]) {
        assert!(matches!(parse(args), Err(CliError::Usage)));
    }

    #[rstest]
    fn lookup_needs_both_arguments() {
        assert!(matches!(parse(&["lookup", "de"]), Err(CliError::Arguments(_))));
    }

    #[rstest]
    #[case::misspelled_flag(&["check", "--dri", "dicts"])]
    #[case::extra_value(&["lookup", "de", "hero.title", "extra"])]
    #[case::flag_on_locales(&["locales", "--dir", "dicts"])]
    fn leftover_arguments_are_rejected(#[case] args: &[&str]) {
        let result = parse(args);

        let Err(CliError::UnexpectedArguments(remaining)) = result else {
            panic!("expected leftover arguments to be rejected, got {result:?}");
        };
        assert_that!(remaining.is_empty(), eq(false));
    }

    #[rstest]
    fn usage_errors_print_usage() {
        let message = parse(&["check", "--dri", "dicts"]).unwrap_err().to_string();

        assert_that!(message, contains_substring("--dri"));
        assert_that!(message, contains_substring("hubtrac-i18n check [--dir <path>]"));
    }
}
