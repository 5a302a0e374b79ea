//! Single grid cell: a title over a big value, optionally sized and
//! painted with a gradient background.

use std::fmt;

use serde::Deserialize;

use crate::color::{build_gradient, resolve_color_alias};
use crate::error::{Result, StatsGridError};
use crate::tag::{escape_html, AttrValue, Tag};

/// The displayed statistic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Integers get `,` thousands separators, floats two decimals.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => f.write_str(&group_thousands(*i)),
            Self::Float(x) => write!(f, "{x:.2}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// How the cell background is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStyle {
    #[default]
    Gradient,
    /// Colored text on a plain background. Not implemented yet.
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellOptions {
    /// Relative width (`flex-grow`) within the row.
    pub size: Option<u32>,
    /// Palette name, `transparent`, or `#rrggbb`.
    pub color: Option<String>,
    pub style: CellStyle,
}

/// One grid entry. Deserializes from `["title", value]`,
/// `["title", value, {options}]` or `{"title": .., "value": .., ..options}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "CellRepr")]
pub struct Cell {
    pub title: String,
    pub value: CellValue,
    pub options: CellOptions,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Pair(String, CellValue),
    Triple(String, CellValue, CellOptions),
    Object(CellObject),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CellObject {
    title: String,
    value: CellValue,
    #[serde(default)]
    size: Option<u32>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    style: CellStyle,
}

impl From<CellRepr> for Cell {
    fn from(repr: CellRepr) -> Self {
        let (title, value, options) = match repr {
            CellRepr::Pair(title, value) => (title, value, CellOptions::default()),
            CellRepr::Triple(title, value, options) => (title, value, options),
            CellRepr::Object(obj) => (
                obj.title,
                obj.value,
                CellOptions {
                    size: obj.size,
                    color: obj.color,
                    style: obj.style,
                },
            ),
        };
        Self {
            title,
            value,
            options,
        }
    }
}

impl Cell {
    pub fn new(title: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            options: CellOptions::default(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.options.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.options.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.options.style = style;
        self
    }

    /// Render as an outer sizing `div` around an inner `div` holding the
    /// title (`h2`) and value (`h1`).
    pub fn render(&self) -> Result<String> {
        let mut outer_style = Vec::new();
        if let Some(size) = self.options.size.filter(|&s| s > 0) {
            outer_style.push(("flex-grow".to_string(), size.to_string()));
        }

        let mut inner_style = Vec::new();
        match self.options.style {
            CellStyle::Gradient => {
                if let Some(color) = &self.options.color {
                    let (foreground, background) = cell_colors(color)?;
                    inner_style.push(("background".to_string(), background));
                    inner_style.push(("color".to_string(), foreground));
                }
            }
            CellStyle::Text => {
                return Err(StatsGridError::unsupported("cell style `text`"));
            }
        }

        let title = escape_html(&self.title);
        let value = escape_html(&self.value.to_string());

        let inner = Tag::new("div")
            .attr("style", AttrValue::Map(inner_style))
            .child(Tag::new("h2").attr("title", title.as_str()).child(title.as_str()).render()?)
            .child(Tag::new("h1").attr("title", value.as_str()).child(value.as_str()).render()?)
            .render()?;

        Tag::new("div")
            .attr("style", AttrValue::Map(outer_style))
            .child(inner)
            .render()
    }
}

/// Resolve `(foreground, background)` for a cell color.
fn cell_colors(color: &str) -> Result<(String, String)> {
    if color == "transparent" {
        return Ok(("auto".to_string(), "transparent".to_string()));
    }
    let hex = resolve_color_alias(color).unwrap_or(color);
    Ok(build_gradient(hex)?.into())
}

/// Convenience wrapper over [`Cell::render`].
pub fn render_cell(
    title: impl Into<String>,
    value: impl Into<CellValue>,
    options: CellOptions,
) -> Result<String> {
    Cell {
        title: title.into(),
        value: value.into(),
        options,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_cell() {
        let html = render_cell("key", "value", CellOptions::default()).unwrap();
        assert_eq!(
            html,
            r#"<div><div><h2 title="key">key</h2><h1 title="value">value</h1></div></div>"#
        );
    }

    #[test]
    fn cell_with_alias_color() {
        let html = Cell::new("key", "value").with_color("warning").render().unwrap();
        assert!(html.contains("linear-gradient"));
        assert!(html.contains("color:#fff"));
    }

    #[test]
    fn cell_with_hex_color() {
        let html = Cell::new("Errors", 12).with_color("#f2495c").render().unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<div><div style="background:linear-gradient(120deg, #df1410, #f03160);color:#fff">"#,
                r#"<h2 title="Errors">Errors</h2><h1 title="12">12</h1></div></div>"#
            )
        );
    }

    #[test]
    fn transparent_cell() {
        let html = Cell::new("a", "b").with_color("transparent").render().unwrap();
        assert!(html.contains(r#"style="background:transparent;color:auto""#));
    }

    #[test]
    fn sized_cell() {
        let html = Cell::new("a", "b").with_size(3).render().unwrap();
        assert!(html.starts_with(r#"<div style="flex-grow:3"><div>"#), "{html}");
    }

    #[test]
    fn zero_size_is_ignored() {
        let html = Cell::new("a", "b").with_size(0).render().unwrap();
        assert!(html.starts_with("<div><div>"), "{html}");
    }

    #[test]
    fn unknown_color_is_rejected() {
        let err = Cell::new("a", "b").with_color("magenta").render().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn text_style_is_unsupported() {
        let err = Cell::new("a", "b")
            .with_style(CellStyle::Text)
            .render()
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Unsupported(_)));
    }

    #[test]
    fn markup_in_title_is_escaped() {
        let html = Cell::new("<b>\"x\"</b>", "a & b").render().unwrap();
        assert!(html.contains(r#"<h2 title="&lt;b&gt;&quot;x&quot;&lt;/b&gt;">"#));
        assert!(html.contains(">a &amp; b</h1>"));
    }

    #[test]
    fn value_formatting() {
        assert_eq!(CellValue::Int(0).to_string(), "0");
        assert_eq!(CellValue::Int(999).to_string(), "999");
        assert_eq!(CellValue::Int(1000).to_string(), "1,000");
        assert_eq!(CellValue::Int(1_234_567).to_string(), "1,234,567");
        assert_eq!(CellValue::Int(-98_765).to_string(), "-98,765");
        assert_eq!(
            CellValue::Int(i64::MIN).to_string(),
            "-9,223,372,036,854,775,808"
        );
        assert_eq!(CellValue::Float(3.14159).to_string(), "3.14");
        assert_eq!(CellValue::Float(2.0).to_string(), "2.00");
        assert_eq!(CellValue::from("n/a").to_string(), "n/a");
    }

    #[test]
    fn deserialize_all_cell_shapes() {
        let cells: Vec<Cell> = serde_json::from_str(
            r##"[
                ["Users", 1200],
                ["Uptime", 99.95, {"color": "success", "size": 2}],
                {"title": "Status", "value": "ok", "color": "#5794f2"}
            ]"##,
        )
        .unwrap();

        assert_eq!(cells[0], Cell::new("Users", 1200));
        assert_eq!(
            cells[1],
            Cell::new("Uptime", 99.95).with_color("success").with_size(2)
        );
        assert_eq!(cells[2], Cell::new("Status", "ok").with_color("#5794f2"));
    }

    #[test]
    fn deserialize_style() {
        let cell: Cell = serde_json::from_str(r#"["a", 1, {"style": "text"}]"#).unwrap();
        assert_eq!(cell.options.style, CellStyle::Text);
    }

    #[test]
    fn deserialize_rejects_unknown_options() {
        for source in [
            r#"["a", 1, {"colour": "red"}]"#,
            r#"{"title": "a", "value": 1, "colour": "red"}"#,
            r#"{"title": "a", "value": 1, "color": "red", "extra": true}"#,
        ] {
            assert!(serde_json::from_str::<Cell>(source).is_err(), "{source}");
        }
        let cell: Cell = serde_json::from_str(r#"{"title": "a", "value": 1, "size": 3}"#).unwrap();
        assert_eq!(cell, Cell::new("a", 1).with_size(3));
    }

    #[test]
    fn deserialize_rejects_bool_value() {
        assert!(serde_json::from_str::<Cell>(r#"["a", true]"#).is_err());
    }
}
