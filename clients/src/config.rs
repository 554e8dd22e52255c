//! `skillcert.toml` loading.
//!
//! Every section is optional; missing keys take the defaults below.
//!
//! ```toml
//! [approvals]
//! default_required_roles = ["mantenimiento", "produccion", "calidad"]
//!
//! [audit]
//! employee_number_pattern = "^\\d{4}$"
//!
//! [matrix]
//! line = "L001 - Ensamble"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skillcert_approvals::{ApprovalPolicy, DEFAULT_REQUIRED_ROLES};
use skillcert_audit::{AuditError, AuditSettings, DEFAULT_EMPLOYEE_NUMBER_PATTERN};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The config file is not valid TOML for [`SkillcertConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// TOML error.
        source: toml::de::Error,
    },
    /// The configured employee-number pattern does not compile.
    #[error(transparent)]
    InvalidPattern(#[from] AuditError),
    /// The fallback role list is empty after normalisation.
    #[error("no required roles configured: {0:?} normalises to an empty set")]
    NoRequiredRoles(Vec<String>),
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level SkillCert configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillcertConfig {
    /// Approval gating settings.
    pub approvals: ApprovalsConfig,
    /// Audit settings.
    pub audit: AuditConfig,
    /// Matrix settings.
    pub matrix: MatrixConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// `[approvals]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalsConfig {
    /// Roles required when a record lists none.
    pub default_required_roles: Vec<String>,
}

impl Default for ApprovalsConfig {
    fn default() -> Self {
        Self {
            default_required_roles: DEFAULT_REQUIRED_ROLES
                .iter()
                .map(|role| (*role).to_owned())
                .collect(),
        }
    }
}

/// `[audit]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Regex every employee number must match.
    pub employee_number_pattern: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            employee_number_pattern: DEFAULT_EMPLOYEE_NUMBER_PATTERN.to_owned(),
        }
    }
}

/// `[matrix]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Default line filter; absent means all lines.
    pub line: Option<String>,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when neither `RUST_LOG` nor `--verbose`/`--quiet` is set.
    pub level: String,
    /// Emit JSON log lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl SkillcertConfig {
    /// Reads and parses `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML for this schema, and
    /// [`ConfigError::NoRequiredRoles`] if `[approvals]` lists no usable role.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.policy()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if `text` does not match the schema.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Builds the gating policy from `[approvals]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRequiredRoles`] if the role list is empty or
    /// only holds blank entries.
    pub fn policy(&self) -> Result<ApprovalPolicy, ConfigError> {
        policy_for_roles(self.approvals.default_required_roles.as_slice())
    }

    /// Builds audit settings from `[approvals]` and `[audit]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRequiredRoles`] for an empty role list and
    /// [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn audit_settings(&self) -> Result<AuditSettings, ConfigError> {
        Ok(AuditSettings::new(
            self.policy()?,
            &self.audit.employee_number_pattern,
        )?)
    }
}

/// Builds a policy whose fallback set is `roles`, refusing an empty set.
///
/// # Errors
///
/// Returns [`ConfigError::NoRequiredRoles`] if no role survives normalisation.
pub fn policy_for_roles<S: AsRef<str>>(roles: &[S]) -> Result<ApprovalPolicy, ConfigError> {
    let policy = ApprovalPolicy::new(roles);
    if policy.default_required_roles().is_empty() {
        return Err(ConfigError::NoRequiredRoles(
            roles.iter().map(|r| r.as_ref().to_owned()).collect(),
        ));
    }
    Ok(policy)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = SkillcertConfig::from_toml_str("").expect("empty file parses");
        assert_eq!(config, SkillcertConfig::default());
        assert_eq!(
            config.approvals.default_required_roles,
            vec!["mantenimiento", "produccion", "calidad"]
        );
        assert_eq!(config.audit.employee_number_pattern, r"^\d{4}$");
        assert_eq!(config.logging.level, "info");
        assert!(config.matrix.line.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let text = r#"
            [approvals]
            default_required_roles = ["Calidad", "Producción"]

            [matrix]
            line = "L002"
        "#;
        let config = SkillcertConfig::from_toml_str(text).expect("partial config parses");
        assert_eq!(config.matrix.line.as_deref(), Some("L002"));
        assert_eq!(config.audit, AuditConfig::default());
        let policy = config.policy().expect("roles configured");
        let roles: Vec<&str> = policy
            .default_required_roles()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(roles, vec!["calidad", "produccion"]);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = SkillcertConfig::default();
        config.logging.json = true;
        config.matrix.line = Some("L001 - Ensamble".to_owned());
        let text = toml::to_string(&config).expect("config serializes");
        let back = SkillcertConfig::from_toml_str(&text).expect("serialized config parses");
        assert_eq!(back, config);
    }

    #[test]
    fn empty_role_lists_are_rejected() {
        for text in [
            "[approvals]\ndefault_required_roles = []",
            "[approvals]\ndefault_required_roles = [\"\", \"  \"]",
        ] {
            let config = SkillcertConfig::from_toml_str(text).expect("schema-valid config");
            assert!(matches!(
                config.policy(),
                Err(ConfigError::NoRequiredRoles(_))
            ));
            assert!(matches!(
                config.audit_settings(),
                Err(ConfigError::NoRequiredRoles(_))
            ));
        }
        assert!(policy_for_roles::<&str>(&[]).is_err());
        assert!(policy_for_roles(&["Calidad"]).is_ok());
    }

    #[test]
    fn from_file_validates_roles() {
        let path = std::env::temp_dir().join(format!(
            "skillcert-empty-roles-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[approvals]\ndefault_required_roles = []\n")
            .expect("write temp config");
        let loaded = SkillcertConfig::from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(loaded, Err(ConfigError::NoRequiredRoles(_))));
    }

    #[test]
    fn wrong_types_are_parse_errors() {
        assert!(SkillcertConfig::from_toml_str("[logging]\njson = \"yes\"").is_err());
        assert!(SkillcertConfig::from_toml_str("[logging\n").is_err());
    }

    #[test]
    fn bad_pattern_surfaces_as_config_error() {
        let mut config = SkillcertConfig::default();
        config.audit.employee_number_pattern = "([".to_owned();
        assert!(matches!(
            config.audit_settings(),
            Err(ConfigError::InvalidPattern(_))
        ));
        assert!(SkillcertConfig::default().audit_settings().is_ok());
    }

    #[test]
    fn missing_files() {
        let path = std::env::temp_dir().join("skillcert-no-such-config.toml");
        assert!(matches!(
            SkillcertConfig::from_file(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            SkillcertConfig::load_or_default(&path).ok(),
            Some(SkillcertConfig::default())
        );
    }
}
