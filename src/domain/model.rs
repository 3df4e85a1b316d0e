use crate::domain::ports::FieldDescriptor;
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How attribute values and text nodes are written into HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Values are inserted as-is. Matches the historical output byte for byte,
    /// and also lets a quote in a value break out of its attribute.
    #[default]
    Verbatim,
    Escape,
}

impl From<bool> for EscapeMode {
    fn from(escape: bool) -> Self {
        if escape {
            EscapeMode::Escape
        } else {
            EscapeMode::Verbatim
        }
    }
}

impl EscapeMode {
    pub fn attribute<'a>(&self, value: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            EscapeMode::Verbatim => std::borrow::Cow::Borrowed(value),
            EscapeMode::Escape => html_escape::encode_single_quoted_attribute(value),
        }
    }

    pub fn text<'a>(&self, value: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            EscapeMode::Verbatim => std::borrow::Cow::Borrowed(value),
            EscapeMode::Escape => html_escape::encode_text(value),
        }
    }
}

/// Anything that can be written out as an HTML string.
pub trait ToHtml {
    fn write_html(&self, out: &mut String, mode: EscapeMode);

    fn to_html(&self) -> String {
        self.to_html_with(EscapeMode::Verbatim)
    }

    fn to_html_with(&self, mode: EscapeMode) -> String {
        let mut out = String::new();
        self.write_html(&mut out, mode);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(Tag),
    Text(String),
}

impl ToHtml for Markup {
    fn write_html(&self, out: &mut String, mode: EscapeMode) {
        match self {
            Markup::Element(tag) => tag.write_html(out, mode),
            Markup::Text(text) => out.push_str(&mode.text(text)),
        }
    }
}

/// A single element. Attributes keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Markup>,
    pub void: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// An element with no closing tag, written as `<name .../>`.
    pub fn void(name: impl Into<String>) -> Self {
        Self {
            void: true,
            ..Self::new(name)
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn child(mut self, tag: Tag) -> Self {
        self.children.push(Markup::Element(tag));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Markup::Text(text.into()));
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl ToHtml for Tag {
    fn write_html(&self, out: &mut String, mode: EscapeMode) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("='");
            out.push_str(&mode.attribute(value));
            out.push('\'');
        }

        if self.void {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_html(out, mode);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    Hidden,
    Date,
    Checkbox,
    TextArea,
    Select { options: Vec<String> },
    Submit,
    /// A kind this crate has no tag for. Rendering it fails.
    Unsupported(String),
}

impl FieldKind {
    pub fn parse(kind: &str, options: Vec<String>) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "text" => FieldKind::Text,
            "number" => FieldKind::Number,
            "email" => FieldKind::Email,
            "password" => FieldKind::Password,
            "hidden" => FieldKind::Hidden,
            "date" => FieldKind::Date,
            "checkbox" => FieldKind::Checkbox,
            "textarea" => FieldKind::TextArea,
            "select" => FieldKind::Select { options },
            "submit" => FieldKind::Submit,
            _ => FieldKind::Unsupported(kind.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Hidden => "hidden",
            FieldKind::Date => "date",
            FieldKind::Checkbox => "checkbox",
            FieldKind::TextArea => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::Submit => "submit",
            FieldKind::Unsupported(kind) => kind,
        }
    }
}

/// Built-in field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub attributes: IndexMap<String, String>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            value: None,
            placeholder: None,
            required: false,
            attributes: IndexMap::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    fn input(&self, input_type: &str) -> Tag {
        let mut tag = Tag::void("input")
            .attr("type", input_type)
            .attr("name", &self.name);
        if let Some(value) = &self.value {
            tag = tag.attr("value", value);
        }
        self.common_attributes(tag)
    }

    fn common_attributes(&self, mut tag: Tag) -> Tag {
        if let Some(placeholder) = &self.placeholder {
            tag = tag.attr("placeholder", placeholder);
        }
        if self.required {
            tag = tag.attr("required", "required");
        }
        for (key, value) in &self.attributes {
            tag = tag.attr(key, value);
        }
        tag
    }

    fn control(&self) -> Result<Tag> {
        let attributes_field = format!("{}.attributes", self.name);
        for key in self.attributes.keys() {
            validation::validate_attribute_key(&attributes_field, key)?;
        }

        let tag = match &self.kind {
            FieldKind::Text
            | FieldKind::Number
            | FieldKind::Email
            | FieldKind::Password
            | FieldKind::Hidden
            | FieldKind::Date
            | FieldKind::Checkbox => self.input(self.kind.as_str()),
            FieldKind::TextArea => {
                let tag = self.common_attributes(Tag::new("textarea").attr("name", &self.name));
                match &self.value {
                    Some(value) => tag.text(value),
                    None => tag,
                }
            }
            FieldKind::Select { options } => {
                let mut select = self.common_attributes(Tag::new("select").attr("name", &self.name));
                for option in options {
                    let mut tag = Tag::new("option").attr("value", option);
                    if self.value.as_deref() == Some(option.as_str()) {
                        tag = tag.attr("selected", "selected");
                    }
                    select = select.child(tag.text(option));
                }
                select
            }
            FieldKind::Submit => {
                let caption = self
                    .label
                    .as_deref()
                    .or(self.value.as_deref())
                    .unwrap_or(&self.name);
                let tag = Tag::void("input")
                    .attr("type", "submit")
                    .attr("name", &self.name)
                    .attr("value", caption);
                self.attributes
                    .iter()
                    .fold(tag, |tag, (key, value)| tag.attr(key, value))
            }
            FieldKind::Unsupported(kind) => {
                return Err(ScaffoldError::MissingCapability {
                    field: self.name.clone(),
                    capability: format!("as_tag (unknown kind '{}')", kind),
                })
            }
        };
        Ok(tag)
    }
}

impl FieldDescriptor for Field {
    fn as_tag(&self) -> Result<Tag> {
        let control = self.control()?;
        match (&self.label, &self.kind) {
            (Some(label), kind) if *kind != FieldKind::Submit => {
                Ok(Tag::new("label").text(label).child(control))
            }
            _ => Ok(control),
        }
    }
}

/// Field name to descriptor, iterated in insertion order.
#[derive(Default)]
pub struct Schema {
    fields: IndexMap<String, Box<dyn FieldDescriptor>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: Box<dyn FieldDescriptor>,
    ) -> Result<()> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(ScaffoldError::DuplicateField { name });
        }
        self.fields.insert(name, descriptor);
        Ok(())
    }

    pub fn with_field(mut self, field: Field) -> Result<Self> {
        let name = field.name.clone();
        self.insert(name, Box::new(field))?;
        Ok(self)
    }

    pub fn from_fields(fields: Vec<Field>) -> Result<Self> {
        fields
            .into_iter()
            .try_fold(Self::new(), |schema, field| schema.with_field(field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor.as_ref()))
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
