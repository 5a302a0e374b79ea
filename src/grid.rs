//! Grid composition: rows of cells inside a `<figure>`, with an optional
//! caption, prefixed by the base stylesheet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::cell::Cell;
use crate::error::{Result, StatsGridError};
use crate::style::{base_css, GRID_CLASS};
use crate::tag::{escape_html, AttrValue, Tag};

// ---------------------------------------------------------------------------
// Caption position
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Vertical {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Horizontal {
    #[default]
    Left,
    Center,
    Right,
}

impl Horizontal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Where the caption goes: `"<top|bottom> <left|center|right>"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptionPosition {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl FromStr for CaptionPosition {
    type Err = StatsGridError;

    fn from_str(s: &str) -> Result<Self> {
        let wrong = || StatsGridError::invalid_argument(format!("wrong caption position: {s:?}"));

        let mut parts = s.split(' ');
        let (Some(v), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(wrong());
        };
        let vertical = match v {
            "top" => Vertical::Top,
            "bottom" => Vertical::Bottom,
            _ => return Err(wrong()),
        };
        let horizontal = match h {
            "left" => Horizontal::Left,
            "center" => Horizontal::Center,
            "right" => Horizontal::Right,
            _ => return Err(wrong()),
        };
        Ok(Self {
            vertical,
            horizontal,
        })
    }
}

impl fmt::Display for CaptionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            Vertical::Top => "top",
            Vertical::Bottom => "bottom",
        };
        write!(f, "{v} {}", self.horizontal.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A grid of statistic cells.
///
/// The `with_*` methods return an updated copy, so one base grid can be
/// re-rendered with different captions or styles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "GridSpec")]
pub struct StatsGrid {
    pub rows: Vec<Vec<Cell>>,
    pub caption: Option<String>,
    pub font_size: Option<u32>,
    /// Extra classes on the `<figure>` (e.g. `compact`, `borderless`).
    pub classes: Vec<String>,
    pub caption_position: CaptionPosition,
}

impl StatsGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Parse the JSON grid description used by the CLI.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source)
            .map_err(|e| StatsGridError::invalid_argument(format!("grid spec: {e}")))
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, px: u32) -> Self {
        self.font_size = Some(px);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_caption_position(mut self, position: CaptionPosition) -> Self {
        self.caption_position = position;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Render the `<figure>` without the stylesheet.
    pub fn render_figure(&self) -> Result<String> {
        let mut classes = vec![GRID_CLASS.to_string()];
        classes.extend(self.classes.iter().cloned());

        let mut styles = Vec::new();
        if let Some(px) = self.font_size.filter(|&px| px > 0) {
            styles.push(("font-size".to_string(), format!("{px}px !important")));
        }

        let caption = self
            .caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| {
                Tag::new("figcaption")
                    .attr(
                        "style",
                        format!("text-align: {}", self.caption_position.horizontal.as_str()),
                    )
                    .child(escape_html(c))
                    .render()
            })
            .transpose()?;

        let mut figure = Tag::new("figure")
            .attr("class", AttrValue::List(classes))
            .attr("style", AttrValue::Map(styles));

        if self.caption_position.vertical == Vertical::Top {
            if let Some(caption) = &caption {
                figure = figure.child(caption.as_str());
            }
        }

        for (r, row) in self.rows.iter().enumerate() {
            let cells = row
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    cell.render()
                        .map_err(|e| e.with_context(format!("row {r}, cell {c}")))
                })
                .collect::<Result<Vec<_>>>()?;
            figure = figure.child(Tag::new("div").children(cells).render()?);
        }

        if self.caption_position.vertical == Vertical::Bottom {
            if let Some(caption) = caption {
                figure = figure.child(caption);
            }
        }

        figure.render()
    }

    /// Stylesheet plus figure: a self-contained HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        let figure = self.render_figure()?;
        let html = format!("<style>{}</style>{figure}", base_css());
        log::debug!(
            "rendered grid: {} rows, {} cells, {} bytes",
            self.rows.len(),
            self.cell_count(),
            html.len()
        );
        Ok(html)
    }
}

// ---------------------------------------------------------------------------
// JSON description
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSpec {
    #[serde(default)]
    rows: Vec<Vec<Cell>>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    font_size: Option<u32>,
    #[serde(default)]
    style: Classes,
    /// Outer `None` when the key is absent, inner `None` for an explicit null.
    #[serde(default, deserialize_with = "present")]
    caption_position: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// `"compact"` or `["compact", "center"]`.
#[derive(Deserialize, Default)]
#[serde(untagged)]
enum Classes {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl TryFrom<GridSpec> for StatsGrid {
    type Error = StatsGridError;

    fn try_from(spec: GridSpec) -> Result<Self> {
        let caption_position = match spec.caption_position {
            Some(Some(p)) => p.parse()?,
            Some(None) => {
                return Err(StatsGridError::invalid_argument(
                    "wrong caption position: null",
                ))
            }
            None => CaptionPosition::default(),
        };
        let classes = match spec.style {
            Classes::None => Vec::new(),
            Classes::One(class) => vec![class],
            Classes::Many(classes) => classes,
        };
        Ok(Self {
            rows: spec.rows,
            caption: spec.caption,
            font_size: spec.font_size,
            classes,
            caption_position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn one_cell() -> StatsGrid {
        StatsGrid::new(vec![vec![Cell::new("cell", "value")]])
    }

    #[test]
    fn caption_position_default_is_top_left() {
        assert_eq!(CaptionPosition::default().to_string(), "top left");
    }

    #[rstest]
    #[case("")]
    #[case("left right")]
    #[case("left bottom")]
    #[case("center left")]
    #[case("góra prawo")]
    #[case("left")]
    #[case("bottom")]
    #[case("top  left")]
    #[case("top left ")]
    #[case("Top Left")]
    fn wrong_caption_positions(#[case] input: &str) {
        let err = input.parse::<CaptionPosition>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)), "{input:?}");
    }

    #[test]
    fn figure_without_caption() {
        let html = StatsGrid::new(Vec::new()).render_figure().unwrap();
        assert_eq!(html, r#"<figure class="stats-grid"></figure>"#);
    }

    #[test]
    fn figure_with_one_cell() {
        let html = one_cell().render_figure().unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<figure class="stats-grid"><div>"#,
                r#"<div><div><h2 title="cell">cell</h2><h1 title="value">value</h1></div></div>"#,
                r#"</div></figure>"#
            )
        );
    }

    #[test]
    fn classes_and_font_size() {
        let html = StatsGrid::new(Vec::new())
            .with_class("compact")
            .with_class("center")
            .with_font_size(12)
            .render_figure()
            .unwrap();
        assert_eq!(
            html,
            r#"<figure class="stats-grid compact center" style="font-size:12px !important"></figure>"#
        );
    }

    #[test]
    fn bottom_caption_goes_last() {
        let html = one_cell()
            .with_caption("mycaption")
            .with_caption_position("bottom right".parse().unwrap())
            .render_figure()
            .unwrap();
        assert!(html.ends_with(
            r#"<figcaption style="text-align: right">mycaption</figcaption></figure>"#
        ));
    }

    #[test]
    fn empty_caption_is_skipped() {
        let html = one_cell().with_caption("").to_html().unwrap();
        assert!(!html.contains("<figcaption"));
    }

    #[test]
    fn to_html_prefixes_stylesheet() {
        let html = one_cell().to_html().unwrap();
        assert!(html.starts_with("<style>.stats-grid {"));
        assert!(html.contains("</style><figure"));
    }

    #[test]
    fn cell_errors_carry_location() {
        let grid = StatsGrid::new(vec![
            vec![Cell::new("ok", 1)],
            vec![Cell::new("ok", 2), Cell::new("bad", 3).with_color("nope")],
        ]);
        let err = grid.to_html().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
        assert_eq!(err.context.as_deref(), Some("row 1, cell 1"));
    }

    #[test]
    fn from_json_full() {
        let grid = StatsGrid::from_json(
            r#"{
                "rows": [[["Users", 1200], ["Errors", 3, {"color": "error"}]]],
                "caption": "Today",
                "font_size": 16,
                "style": "compact",
                "caption_position": "bottom center"
            }"#,
        )
        .unwrap();
        assert_eq!(grid.cell_count(), 2);
        assert_eq!(grid.caption.as_deref(), Some("Today"));
        assert_eq!(grid.font_size, Some(16));
        assert_eq!(grid.classes, vec!["compact".to_string()]);
        assert_eq!(grid.caption_position.to_string(), "bottom center");
    }

    #[test]
    fn from_json_style_list() {
        let grid = StatsGrid::from_json(r#"{"rows": [], "style": ["a", "b"]}"#).unwrap();
        assert_eq!(grid.classes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn from_json_rejects_bad_position() {
        let err = StatsGrid::from_json(r#"{"rows": [], "caption_position": "left"}"#)
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
        assert!(err.to_string().contains("wrong caption position"));
    }

    #[test]
    fn from_json_rejects_null_position() {
        for source in [
            r#"{"rows": [], "caption": "c", "caption_position": null}"#,
            r#"{"rows": [], "caption_position": null}"#,
        ] {
            let err = StatsGrid::from_json(source).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)), "{source}");
        }
        let grid = StatsGrid::from_json(r#"{"rows": [], "caption": "c"}"#).unwrap();
        assert_eq!(grid.caption_position, CaptionPosition::default());
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        assert!(StatsGrid::from_json(r#"{"rows": [], "colour": "red"}"#).is_err());
    }
}
