pub mod endpoint;
pub mod form;
pub mod page;
pub mod scaffold;

pub use crate::domain::model::{EscapeMode, Field, FieldKind, Markup, Schema, Tag, ToHtml};
pub use crate::domain::ports::{
    ConfigProvider, Endpoint, FieldDescriptor, FormDocument, RenderedPage, Scaffold, Storage,
};
pub use crate::utils::error::Result;
pub use form::SchemaRenderer;
pub use page::PageWrapper;
