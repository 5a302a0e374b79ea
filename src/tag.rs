//! Minimal HTML tag construction.
//!
//! [`render_tag`] turns a tag name, optional content and an attribute
//! mapping into a string. Output is well-formed by construction: tag and
//! attribute names are validated, attributes are rendered in insertion order, and a
//! self-closing tag can never carry a body. Content is NOT escaped; use
//! [`escape_html`] on untrusted text before handing it over.

use std::fmt;

use serde_json::Value;

use crate::error::{Result, StatsGridError};

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// A single attribute value.
///
/// Falsy values (null, `false`, zero, empty text, empty map, empty list)
/// are dropped from the rendered attribute string.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Rendered as `k:v` pairs joined by `;` (inline style declarations).
    Map(Vec<(String, String)>),
    /// Rendered space-joined (class lists).
    List(Vec<String>),
}

impl AttrValue {
    /// Build a [`AttrValue::Map`] from ordered key/value pairs.
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a [`AttrValue::List`] from ordered items.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::Map(pairs) => pairs.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Convert untyped JSON into an attribute value.
    ///
    /// Objects become maps and arrays become lists; their members must be
    /// scalars.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(obj) => Self::Map(
                obj.iter()
                    .map(|(k, v)| -> Result<(String, String)> { Ok((k.clone(), json_scalar(v)?)) })
                    .collect::<Result<_>>()?,
            ),
            Value::Array(items) => {
                Self::List(items.iter().map(json_scalar).collect::<Result<_>>()?)
            }
        })
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Map(pairs) => {
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                Ok(())
            }
            Self::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

/// Stringify a JSON scalar for use inside a map or list attribute.
fn json_scalar(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(StatsGridError::type_mismatch(
            "nested attribute values must be scalars",
        )),
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for AttrValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(items: Vec<&str>) -> Self {
        Self::list(items)
    }
}

impl From<Vec<(String, String)>> for AttrValue {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Map(pairs)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Attribute mapping
// ---------------------------------------------------------------------------

/// Ordered attribute mapping. Setting an existing name replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(Vec<(String, AttrValue)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attrs::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Render as ` a="x" b="y"`, skipping falsy values. Empty when nothing
    /// survives, so it can be spliced straight after the tag name.
    ///
    /// Every name is checked, falsy or not, so a bad name never renders.
    pub fn render(&self) -> Result<String> {
        for (name, _) in &self.0 {
            validate_name("attribute", name)?;
        }
        let mut out = String::new();
        for (name, value) in self.0.iter().filter(|(_, v)| !v.is_falsy()) {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&value.to_string());
            out.push('"');
        }
        Ok(out)
    }

    /// Convert a JSON object into attributes. `null` means no attributes.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(obj) => {
                let mut attrs = Self::new();
                for (name, v) in obj {
                    attrs.set(name.clone(), AttrValue::from_json(v)?);
                }
                Ok(attrs)
            }
            _ => Err(StatsGridError::type_mismatch(
                "attributes must be a mapping of name to value",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// One renderable piece of tag content.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<Item>),
}

impl Item {
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect::<Result<_>>()?)
            }
            Value::Object(_) => {
                return Err(StatsGridError::type_mismatch(
                    "content items must be scalars or lists",
                ))
            }
        })
    }
}

/// Text as-is, `null` for null, nested lists as `[a, b, c]`.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Item {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Item {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Item {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Item {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Item>> From<Vec<T>> for Item {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Item>> From<Option<T>> for Item {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Tag body: nothing, a single string, or a sequence of items.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Items(Vec<Item>),
}

impl Content {
    /// Normalize to an ordered item sequence.
    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::Empty => Vec::new(),
            Self::Text(s) => vec![Item::Text(s)],
            Self::Items(items) => items,
        }
    }

    /// Only null, a string, or an array of renderables is accepted.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Empty),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Array(items) => Ok(Self::Items(
                items.iter().map(Item::from_json).collect::<Result<_>>()?,
            )),
            _ => Err(StatsGridError::type_mismatch(
                "content must be a string or list of renderables",
            )),
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Item>> for Content {
    fn from(items: Vec<Item>) -> Self {
        Self::Items(items)
    }
}

impl From<Vec<String>> for Content {
    fn from(items: Vec<String>) -> Self {
        Self::Items(items.into_iter().map(Item::Text).collect())
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a single HTML tag.
///
/// - `<name attrs>content</name>` normally,
/// - `<name attrs>` when `self_closing` is set; content is then rejected.
pub fn render_tag(
    name: &str,
    content: impl Into<Content>,
    attrs: Option<&Attrs>,
    self_closing: bool,
) -> Result<String> {
    validate_name("tag", name)?;

    let attrs_html = attrs.map(Attrs::render).transpose()?.unwrap_or_default();
    let content_html: String = content
        .into()
        .into_items()
        .iter()
        .map(ToString::to_string)
        .collect();

    if self_closing {
        if !content_html.is_empty() {
            return Err(StatsGridError::contract_violation(format!(
                "self-closing <{name}> cannot carry content"
            )));
        }
        return Ok(format!("<{name}{attrs_html}>"));
    }

    Ok(format!("<{name}{attrs_html}>{content_html}</{name}>"))
}

/// ASCII letter first, then ASCII alphanumerics or `-`.
fn validate_name(what: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(StatsGridError::invalid_argument(format!("{what} name is required")));
    };
    if !first.is_ascii_alphabetic() || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(StatsGridError::invalid_argument(format!(
            "invalid {what} name: {name:?}"
        )));
    }
    Ok(())
}

/// Escape text for use in element bodies and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Builder over [`render_tag`] for nested markup.
#[derive(Debug, Clone, Default)]
pub struct Tag {
    name: String,
    children: Vec<Item>,
    attrs: Attrs,
    self_closing: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    #[must_use]
    pub fn child(mut self, item: impl Into<Item>) -> Self {
        self.children.push(item.into());
        self
    }

    #[must_use]
    pub fn children<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        self.children.extend(items.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    pub fn render(self) -> Result<String> {
        render_tag(
            &self.name,
            Content::Items(self.children),
            Some(&self.attrs),
            self.self_closing,
        )
    }
}
