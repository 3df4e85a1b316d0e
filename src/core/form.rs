use crate::core::{EscapeMode, Schema, ToHtml};
use crate::utils::error::Result;

/// Renders a schema as an editable `<form>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRenderer {
    escape: EscapeMode,
}

impl SchemaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escape(escape: EscapeMode) -> Self {
        Self { escape }
    }

    pub fn escape_mode(&self) -> EscapeMode {
        self.escape
    }

    /// `<form action='{action}'><fieldset>{fields}</fieldset></form>`, fields in
    /// schema order with no separator. Stops at the first field that cannot
    /// produce a tag.
    pub fn render(&self, action: &str, schema: &Schema) -> Result<String> {
        let mut fields_html = String::new();
        for (name, descriptor) in schema.iter() {
            let tag = descriptor.as_tag().inspect_err(|e| {
                tracing::warn!("Field '{}' could not be rendered: {}", name, e);
            })?;
            tag.write_html(&mut fields_html, self.escape);
        }

        tracing::debug!(
            "Rendered {} fields for action '{}' ({:?})",
            schema.len(),
            action,
            self.escape
        );

        Ok(format!(
            "<form action='{}'><fieldset>{}</fieldset></form>",
            self.escape.attribute(action),
            fields_html
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, FieldDescriptor, FieldKind, Tag};
    use crate::utils::error::ScaffoldError;

    struct Broken;

    impl FieldDescriptor for Broken {
        fn as_tag(&self) -> Result<Tag> {
            Err(ScaffoldError::MissingCapability {
                field: "broken".to_string(),
                capability: "as_tag".to_string(),
            })
        }
    }

    #[test]
    fn test_empty_schema() {
        let html = SchemaRenderer::new().render("/x", &Schema::new()).unwrap();
        assert_eq!(html, "<form action='/x'><fieldset></fieldset></form>");
    }

    #[test]
    fn test_single_text_field() {
        let schema = Schema::new().with_field(Field::text("name")).unwrap();
        let html = SchemaRenderer::new().render("/submit", &schema).unwrap();
        assert_eq!(
            html,
            "<form action='/submit'><fieldset><input type='text' name='name'/></fieldset></form>"
        );
    }

    #[test]
    fn test_fields_follow_schema_order() {
        let fields = vec![
            Field::text("b"),
            Field::new("a", FieldKind::Number),
            Field::new("c", FieldKind::Hidden).with_value("1"),
        ];
        let expected: String = fields
            .iter()
            .map(|f| f.as_tag().unwrap().to_html())
            .collect();
        let schema = Schema::from_fields(fields).unwrap();

        let html = SchemaRenderer::new().render("/s", &schema).unwrap();
        assert_eq!(
            html,
            format!("<form action='/s'><fieldset>{}</fieldset></form>", expected)
        );
    }

    #[test]
    fn test_missing_capability_is_not_skipped() {
        let mut schema = Schema::new().with_field(Field::text("ok")).unwrap();
        schema.insert("broken", Box::new(Broken)).unwrap();
        schema.insert("after", Box::new(Field::text("after"))).unwrap();

        let result = SchemaRenderer::new().render("/s", &schema);
        assert!(matches!(result, Err(ScaffoldError::MissingCapability { .. })));
    }

    #[test]
    fn test_action_is_verbatim_by_default() {
        let html = SchemaRenderer::new()
            .render("/a' onclick='x", &Schema::new())
            .unwrap();
        assert_eq!(
            html,
            "<form action='/a' onclick='x'><fieldset></fieldset></form>"
        );
    }

    #[test]
    fn test_bad_attribute_keys_fail_render_in_escape_mode() {
        let renderer = SchemaRenderer::with_escape(EscapeMode::Escape);

        let injected = Schema::new()
            .with_field(Field::text("q").with_attribute("x'><script>alert(1)</script><i a='", "v"))
            .unwrap();
        assert!(matches!(
            renderer.render("/s", &injected),
            Err(ScaffoldError::InvalidConfigValueError { .. })
        ));

        let renamed = Schema::new()
            .with_field(Field::text("q").with_attribute("name", "other"))
            .unwrap();
        assert!(renderer.render("/s", &renamed).is_err());

        let allowed = Schema::new()
            .with_field(Field::text("q").with_attribute("data-id", "7"))
            .unwrap();
        assert_eq!(
            renderer.render("/s", &allowed).unwrap(),
            "<form action='/s'><fieldset><input type='text' name='q' data-id='7'/></fieldset></form>"
        );
    }

    #[test]
    fn test_escape_mode_encodes_action_and_values() {
        let schema = Schema::new()
            .with_field(Field::text("q").with_value("a'b"))
            .unwrap();
        let html = SchemaRenderer::with_escape(EscapeMode::Escape)
            .render("/a' onclick='x", &schema)
            .unwrap();
        assert!(!html.contains("onclick='x'"));
        assert!(!html.contains("a'b"));
        assert!(html.starts_with("<form action='/a&"));
    }
}
