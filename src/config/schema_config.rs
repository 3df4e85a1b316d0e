use crate::core::{EscapeMode, Field, FieldKind, FormDocument, Schema};
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{self, Validate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub form: FormSection,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSection {
    pub name: Option<String>,
    pub action: Option<String>,
    pub page: Option<bool>,
    pub escape: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub label: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub attributes: Option<IndexMap<String, String>>,
}

fn default_kind() -> String {
    "text".to_string()
}

impl FieldConfig {
    pub fn to_field(&self) -> Field {
        let kind = FieldKind::parse(&self.kind, self.options.clone().unwrap_or_default());
        let mut field = Field::new(&self.name, kind);
        field.label = self.label.clone();
        field.value = self.value.clone();
        field.placeholder = self.placeholder.clone();
        field.required = self.required.unwrap_or(false);
        if let Some(attributes) = &self.attributes {
            field.attributes = attributes.clone();
        }
        field
    }
}

impl SchemaConfig {
    /// 從檔案載入，副檔名為 .json 時以 JSON 解析，其餘皆視為 TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ScaffoldError::IoError)?;
        Self::from_path_str(path, &content)
    }

    /// 非同步版本，供 async pipeline 使用
    pub async fn from_file_async<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(ScaffoldError::IoError)?;
        Self::from_path_str(path, &content)
    }

    /// Parses `content` as JSON when `path` ends in `.json`, TOML otherwise.
    pub fn from_path_str(path: &Path, content: &str) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(content)
        } else {
            Self::from_toml_str(content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScaffoldError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(serde_json::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${FORM_ACTION})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScaffoldError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let action = validation::validate_required_field("form.action", &self.form.action)?;
        validation::validate_action("form.action", action)?;

        for field in &self.fields {
            validation::validate_non_empty_string("fields.name", &field.name)?;

            if let Some(attributes) = &field.attributes {
                let attributes_field = format!("fields.{}.attributes", field.name);
                for key in attributes.keys() {
                    validation::validate_attribute_key(&attributes_field, key)?;
                }
            }

            if field.kind.trim().eq_ignore_ascii_case("select")
                && field.options.as_ref().map_or(true, |o| o.is_empty())
            {
                return Err(ScaffoldError::InvalidConfigValueError {
                    field: format!("fields.{}.options", field.name),
                    value: String::new(),
                    reason: "A select field needs at least one option".to_string(),
                });
            }
        }

        validation::validate_unique_names("fields.name", self.fields.iter().map(|f| f.name.as_str()))
    }

    pub fn form_name(&self) -> &str {
        self.form.name.as_deref().unwrap_or("form")
    }

    pub fn wrap_page(&self) -> bool {
        self.form.page.unwrap_or(true)
    }

    pub fn escape_mode(&self) -> EscapeMode {
        EscapeMode::from(self.form.escape.unwrap_or(false))
    }

    pub fn to_schema(&self) -> Result<Schema> {
        Schema::from_fields(self.fields.iter().map(FieldConfig::to_field).collect())
    }

    pub fn to_document(&self) -> Result<FormDocument> {
        let action = validation::validate_required_field("form.action", &self.form.action)?;
        Ok(FormDocument {
            name: self.form_name().to_string(),
            action: action.clone(),
            schema: self.to_schema()?,
            wrap_page: self.wrap_page(),
            escape: self.escape_mode(),
        })
    }
}

impl Validate for SchemaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTACT_FORM: &str = r#"
[form]
name = "contact"
action = "/contact"

[[fields]]
name = "name"
label = "Name"
required = true

[[fields]]
name = "email"
kind = "email"

[[fields]]
name = "topic"
kind = "select"
options = ["sales", "support"]
value = "support"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = SchemaConfig::from_toml_str(CONTACT_FORM).unwrap();

        assert_eq!(config.form_name(), "contact");
        assert_eq!(config.form.action.as_deref(), Some("/contact"));
        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.fields[0].kind, "text");
        assert!(config.wrap_page());
        assert_eq!(config.escape_mode(), EscapeMode::Verbatim);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_schema_keeps_declared_order() {
        let schema = SchemaConfig::from_toml_str(CONTACT_FORM)
            .unwrap()
            .to_schema()
            .unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["name", "email", "topic"]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FORM_SCAFFOLD_TEST_ACTION", "/from-env");

        let toml_content = r#"
[form]
action = "${FORM_SCAFFOLD_TEST_ACTION}"
"#;

        let config = SchemaConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.form.action.as_deref(), Some("/from-env"));

        std::env::remove_var("FORM_SCAFFOLD_TEST_ACTION");
    }

    #[test]
    fn test_missing_action_fails_validation() {
        let config = SchemaConfig::from_toml_str("[form]\nname = \"x\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ScaffoldError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_duplicate_and_empty_names_fail_validation() {
        let duplicated = r#"
[form]
action = "/s"

[[fields]]
name = "a"

[[fields]]
name = "a"
"#;
        assert!(SchemaConfig::from_toml_str(duplicated)
            .unwrap()
            .validate()
            .is_err());

        let empty = "[form]\naction = \"/s\"\n\n[[fields]]\nname = \" \"\n";
        assert!(SchemaConfig::from_toml_str(empty).unwrap().validate().is_err());
    }

    #[test]
    fn test_select_without_options_fails_validation() {
        let toml_content = "[form]\naction = \"/s\"\n\n[[fields]]\nname = \"c\"\nkind = \"select\"\n";
        let config = SchemaConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ScaffoldError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_malformed_attribute_key_fails_validation() {
        let toml_content = r#"
[form]
action = "/s"

[[fields]]
name = "q"
attributes = { "x'><script>alert(1)</script><i a='" = "v" }
"#;
        let config = SchemaConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ScaffoldError::InvalidConfigValueError { ref field, .. }) if field == "fields.q.attributes"
        ));
    }

    #[test]
    fn test_generated_attribute_key_fails_validation() {
        let toml_content = r#"
[form]
action = "/s"

[[fields]]
name = "q"
attributes = { name = "other" }
"#;
        let config = SchemaConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let allowed = "[form]\naction = \"/s\"\n\n[[fields]]\nname = \"q\"\nattributes = { maxlength = \"80\" }\n";
        assert!(SchemaConfig::from_toml_str(allowed).unwrap().validate().is_ok());
    }

    #[test]
    fn test_unknown_kind_passes_validation() {
        let toml_content = "[form]\naction = \"/s\"\n\n[[fields]]\nname = \"f\"\nkind = \"upload\"\n";
        let config = SchemaConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.fields[0].to_field().kind,
            FieldKind::Unsupported("upload".to_string())
        );
    }

    #[tokio::test]
    async fn test_config_from_file_async() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CONTACT_FORM.as_bytes()).unwrap();

        let config = SchemaConfig::from_file_async(temp_file.path()).await.unwrap();
        assert_eq!(config.form_name(), "contact");
        assert_eq!(config.fields.len(), 3);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SchemaConfig::from_toml_str("[form"),
            Err(ScaffoldError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_json_file() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json_content = r#"{
            "form": { "action": "/login", "page": false },
            "fields": [
                { "name": "user" },
                { "name": "pass", "kind": "password" }
            ]
        }"#;
        temp_file.write_all(json_content.as_bytes()).unwrap();

        let config = SchemaConfig::from_file(temp_file.path()).unwrap();
        assert!(!config.wrap_page());
        assert_eq!(config.fields[1].kind, "password");
    }

    #[test]
    fn test_config_from_toml_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CONTACT_FORM.as_bytes()).unwrap();

        let config = SchemaConfig::from_file(temp_file.path()).unwrap();
        let document = config.to_document().unwrap();
        assert_eq!(document.name, "contact");
        assert_eq!(document.action, "/contact");
        assert_eq!(document.schema.len(), 3);
    }
}
