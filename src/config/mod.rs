pub mod cli;
pub mod schema_config;

use crate::core::{ConfigProvider, EscapeMode};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "form-scaffold"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Render HTML forms from a TOML or JSON schema")
)]
pub struct CliConfig {
    /// Schema file (.toml or .json)
    #[cfg_attr(feature = "cli", arg(short, long, default_value = "form.toml"))]
    pub schema: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "form.html"))]
    pub file_name: String,

    /// Override the form action from the schema file
    #[cfg_attr(feature = "cli", arg(long))]
    pub action: Option<String>,

    /// Emit the bare form without the html/body shell
    #[cfg_attr(feature = "cli", arg(long))]
    pub no_page: bool,

    /// HTML-escape the action and field values
    #[cfg_attr(feature = "cli", arg(long))]
    pub escape: bool,

    /// Print the rendered HTML instead of writing it
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log as JSON lines"))]
    pub log_json: bool,
}

impl CliConfig {
    pub fn new(schema: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            output_path: output_path.into(),
            file_name: "form.html".to_string(),
            action: None,
            no_page: false,
            escape: false,
            dry_run: false,
            verbose: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn schema_path(&self) -> &str {
        &self.schema
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn action_override(&self) -> Option<&str> {
        self.action.as_deref()
    }

    fn wrap_page(&self) -> bool {
        !self.no_page
    }

    fn escape_mode(&self) -> EscapeMode {
        EscapeMode::from(self.escape)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("schema", &self.schema)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("file_name", &self.file_name)?;
        if let Some(action) = &self.action {
            validation::validate_action("action", action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_defaults() {
        let config = CliConfig::new("form.toml", "./out");
        assert!(config.wrap_page());
        assert_eq!(config.escape_mode(), EscapeMode::Verbatim);
        assert!(config.action_override().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_config_rejects_bad_action() {
        let mut config = CliConfig::new("form.toml", "./out");
        config.action = Some("ftp://files".to_string());
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "form-scaffold",
            "--schema",
            "signup.toml",
            "--action",
            "/signup",
            "--no-page",
            "--escape",
        ]);
        assert_eq!(config.schema_path(), "signup.toml");
        assert_eq!(config.action_override(), Some("/signup"));
        assert!(!config.wrap_page());
        assert_eq!(config.escape_mode(), EscapeMode::Escape);
        assert_eq!(config.file_name(), "form.html");
    }
}
