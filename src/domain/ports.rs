use crate::domain::model::{EscapeMode, Schema, Tag};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces the tag for one schema field.
///
/// A descriptor that has no markup for itself returns
/// `ScaffoldError::MissingCapability` instead of an empty tag, so the
/// renderer never skips a field silently.
pub trait FieldDescriptor: Send + Sync {
    fn as_tag(&self) -> Result<Tag>;
}

/// Request-handling extension point.
pub trait Endpoint {
    type Input;
    type Output;

    fn execute(&self, input: Self::Input) -> Result<Self::Output>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn schema_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn file_name(&self) -> &str;
    fn action_override(&self) -> Option<&str>;
    fn wrap_page(&self) -> bool;
    fn escape_mode(&self) -> EscapeMode;
}

/// A form ready to render.
#[derive(Debug)]
pub struct FormDocument {
    pub name: String,
    pub action: String,
    pub schema: Schema,
    pub wrap_page: bool,
    pub escape: EscapeMode,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub name: String,
    pub html: String,
    pub field_count: usize,
}

#[async_trait]
pub trait Scaffold: Send + Sync {
    async fn load(&self) -> Result<FormDocument>;
    async fn render(&self, document: FormDocument) -> Result<RenderedPage>;
    async fn emit(&self, page: RenderedPage) -> Result<String>;
}
