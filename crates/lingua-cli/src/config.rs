//! Configuration loading helpers for the CLI.
//!
//! Leading configuration flags are split off and handed to `ortho_config`;
//! everything from the first other token onwards belongs to the subcommand
//! parser.

use std::ffi::{OsStr, OsString};

use lingua_config::Config;
use ortho_config::OrthoConfig;

use crate::{AppError, CONFIG_CLI_FLAGS, CONFIG_CLI_SWITCHES};

pub(crate) trait ConfigLoader {
    /// Loads configuration from the split-off configuration arguments.
    ///
    /// Configuration flags must precede the subcommand. Flags after it are
    /// parsed as subcommand arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = match argument_text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (&*argument_text, false),
        };

        if CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }
        if CONFIG_CLI_SWITCHES.contains(&flag) {
            return FlagAction::Include { needs_value: false };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    while let Some(argument) = remaining.next() {
        match OrthoConfigLoader::process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                if needs_value && let Some(value) = remaining.next() {
                    config_arguments.push(value.clone());
                }
            }
            FlagAction::Skip => break,
        }
    }

    let command_start = config_arguments.len();
    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case::separate_value("--log-filter", FlagAction::Include { needs_value: true })]
    #[case::inline_value("--log-filter=debug", FlagAction::Include { needs_value: false })]
    #[case::switch("--sequential", FlagAction::Include { needs_value: false })]
    #[case::subcommand("validate", FlagAction::Skip)]
    #[case::unknown_flag("--language", FlagAction::Skip)]
    fn classifies_configuration_flags(#[case] argument: &str, #[case] expected: FlagAction) {
        assert_eq!(
            OrthoConfigLoader::process_config_flag(OsStr::new(argument)),
            expected
        );
    }

    #[test]
    fn splits_leading_configuration_flags() {
        let args = os_args(&[
            "lingua",
            "--log-filter",
            "debug",
            "--sequential",
            "--min-confidence=300",
            "validate",
            "src/main.rs",
            "--log-filter",
            "trace",
        ]);
        let split = split_config_arguments(&args);

        assert_eq!(
            split.config_arguments,
            os_args(&[
                "lingua",
                "--log-filter",
                "debug",
                "--sequential",
                "--min-confidence=300"
            ])
        );
        assert_eq!(split.command_start, 5);
    }

    #[test]
    fn missing_trailing_value_is_left_to_the_loader() {
        let args = os_args(&["lingua", "--config-path"]);
        let split = split_config_arguments(&args);
        assert_eq!(split.config_arguments, args);
        assert_eq!(split.command_start, 2);
    }

    #[test]
    fn empty_arguments_split_to_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert_eq!(split.command_start, 0);
    }
}
