use crate::config::schema_config::SchemaConfig;
use crate::core::{
    ConfigProvider, EscapeMode, FormDocument, PageWrapper, RenderedPage, Scaffold,
    SchemaRenderer, Storage,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Drives a [`Scaffold`] through load, render and emit.
pub struct ScaffoldEngine<P: Scaffold> {
    scaffold: P,
}

impl<P: Scaffold> ScaffoldEngine<P> {
    pub fn new(scaffold: P) -> Self {
        Self { scaffold }
    }

    pub async fn run(&self) -> Result<String> {
        let page = self.render_page().await?;

        tracing::info!("💾 Writing {} ({} bytes)", page.name, page.html.len());
        let output_path = self.scaffold.emit(page).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// Load and render only; nothing is written.
    pub async fn preview(&self) -> Result<String> {
        Ok(self.render_page().await?.html)
    }

    async fn render_page(&self) -> Result<RenderedPage> {
        tracing::info!("📄 Loading form schema...");
        let document = self.scaffold.load().await?;
        tracing::info!(
            "Loaded form '{}' with {} fields",
            document.name,
            document.schema.len()
        );

        tracing::info!("🔧 Rendering form...");
        let page = self.scaffold.render(document).await?;
        tracing::info!("Rendered {} fields", page.field_count);
        Ok(page)
    }
}

/// Schema file in, HTML file out.
pub struct FileScaffold<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FileScaffold<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Scaffold for FileScaffold<S, C> {
    async fn load(&self) -> Result<FormDocument> {
        tracing::debug!("Reading schema from: {}", self.config.schema_path());
        let mut schema_config = SchemaConfig::from_file_async(self.config.schema_path()).await?;

        // 命令列指定的 action 優先於檔案設定
        if let Some(action) = self.config.action_override() {
            tracing::debug!("Action overridden to: {}", action);
            schema_config.form.action = Some(action.to_string());
        }
        schema_config.validate()?;

        let mut document = schema_config.to_document()?;
        document.wrap_page = document.wrap_page && self.config.wrap_page();
        if self.config.escape_mode() == EscapeMode::Escape {
            document.escape = EscapeMode::Escape;
        }
        Ok(document)
    }

    async fn render(&self, document: FormDocument) -> Result<RenderedPage> {
        let renderer = SchemaRenderer::with_escape(document.escape);
        let form = renderer.render(&document.action, &document.schema)?;

        let html = if document.wrap_page {
            PageWrapper::new().wrap(&form)
        } else {
            form
        };

        Ok(RenderedPage {
            name: document.name,
            html,
            field_count: document.schema.len(),
        })
    }

    async fn emit(&self, page: RenderedPage) -> Result<String> {
        self.storage
            .write_file(self.config.file_name(), page.html.as_bytes())
            .await
    }
}
