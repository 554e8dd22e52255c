//! Shared plumbing for the SkillCert command-line tools.
//!
//! Every binary follows the same steps:
//!
//! 1. Parse [`CommonArgs`] (plus its own flags) with `clap`.
//! 2. Load [`config::SkillcertConfig`] from `--config` or `skillcert.toml`.
//! 3. Initialise logging with [`logging::init_tracing`].
//! 4. Read every export under `--input` with [`input::load_exports`].
//!
//! Flags given on the command line override values from the config file.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod input;
pub mod logging;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use skillcert_approvals::ApprovalPolicy;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "skillcert.toml";

/// Output format for the evaluate and audit tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Flags shared by every binary.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Exported JSON file, or a directory searched recursively for `*.json`.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Config file (default: ./skillcert.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log everything down to trace level.
    #[arg(long, short, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only.
    #[arg(long, short)]
    pub quiet: bool,
}

impl CommonArgs {
    /// Loads the config named by `--config`, or the default file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing, or if any
    /// config file cannot be read or parsed.
    pub fn load_config(&self) -> Result<config::SkillcertConfig, config::ConfigError> {
        match &self.config {
            Some(path) => config::SkillcertConfig::from_file(path),
            None => config::SkillcertConfig::load_or_default(DEFAULT_CONFIG_FILE.as_ref()),
        }
    }

    /// Initialises logging from the flags and the `[logging]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init_logging(
        &self,
        config: &config::SkillcertConfig,
    ) -> Result<(), logging::LoggingError> {
        logging::init_tracing(&config.logging, self.verbose, self.quiet)
    }
}

/// Splits a comma-separated role list, dropping empty entries.
#[must_use]
pub fn split_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds the fallback policy from a `--roles` value.
///
/// # Errors
///
/// Returns [`config::ConfigError::NoRequiredRoles`] if the list holds no role.
pub fn roles_flag_policy(raw: &str) -> Result<ApprovalPolicy, config::ConfigError> {
    config::policy_for_roles(split_roles(raw).as_slice())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    }

    #[test]
    fn parses_common_flags() {
        let cli = Cli::try_parse_from(["t", "--input", "exports", "-v", "--format", "json"]);
        assert!(cli.is_ok());
        if let Ok(cli) = cli {
            assert_eq!(cli.common.input, PathBuf::from("exports"));
            assert!(cli.common.verbose);
            assert!(cli.common.config.is_none());
            assert_eq!(cli.format, OutputFormat::Json);
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["t", "-i", "x.json", "-v", "-q"]).is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["t"]).is_err());
    }

    #[test]
    fn role_lists() {
        assert_eq!(
            split_roles(" Calidad, ,produccion,"),
            vec!["Calidad", "produccion"]
        );
        assert!(split_roles("").is_empty());
    }

    #[test]
    fn roles_flag_needs_a_role() {
        for raw in ["", ",", " , ,"] {
            assert!(matches!(
                roles_flag_policy(raw),
                Err(config::ConfigError::NoRequiredRoles(_))
            ));
        }
        let policy = roles_flag_policy("Calidad, Producción");
        assert!(policy.is_ok());
        if let Ok(policy) = policy {
            assert_eq!(policy.default_required_roles().len(), 2);
        }
    }
}
