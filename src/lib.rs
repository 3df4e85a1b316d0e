pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, schema_config::SchemaConfig, CliConfig};

pub use core::{
    endpoint::UnimplementedEndpoint,
    scaffold::{FileScaffold, ScaffoldEngine},
    Endpoint, EscapeMode, Field, FieldDescriptor, FieldKind, PageWrapper, Schema, SchemaRenderer,
    Tag, ToHtml,
};
pub use utils::error::{Result, ScaffoldError};
