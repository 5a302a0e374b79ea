pub mod cell;
pub mod color;
pub mod error;
pub mod grid;
pub mod style;
pub mod tag;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::path::Path;

pub use cell::{render_cell, Cell, CellOptions, CellStyle, CellValue};
pub use color::{build_gradient, resolve_color_alias, Gradient};
pub use error::{ErrorKind, Result, StatsGridError};
pub use grid::{CaptionPosition, StatsGrid};
pub use tag::{escape_html, render_tag, AttrValue, Attrs, Content, Item, Tag};

/// Render a JSON grid description to a self-contained HTML fragment.
pub fn render_json(source: &str) -> Result<String> {
    StatsGrid::from_json(source)?.to_html()
}

/// Output path for a grid description: same stem, `.html` extension,
/// placed in `outdir`.
pub fn output_path(input: &Path, outdir: &Path) -> std::path::PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("grid");
    outdir.join(format!("{stem}.html"))
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn end_to_end_dashboard() {
        let source = r#"{
            "caption": "Service health",
            "rows": [
                [["Requests", 1234567], ["Latency p99", 182.456, {"color": "info"}]],
                [["Errors", 42, {"color": "error", "size": 2}], ["Status", "ok", {"color": "success"}]]
            ]
        }"#;

        let html = render_json(source).expect("render should succeed");
        assert!(html.starts_with("<style>"));
        assert!(html.contains("<figcaption"));
        assert!(html.contains(r#"<h1 title="1,234,567">1,234,567</h1>"#));
        assert!(html.contains(r#"<h1 title="182.46">182.46</h1>"#));
        assert!(html.contains(r#"style="flex-grow:2""#));
        assert_eq!(html.matches("linear-gradient(120deg, #").count(), 3);
        assert!(html.ends_with("</figure>"));
    }

    #[test]
    fn end_to_end_empty_grid() {
        let html = render_json(r#"{"rows": []}"#).expect("render should succeed");
        assert!(html.ends_with(r#"<figure class="stats-grid"></figure>"#));
    }

    #[test]
    fn error_malformed_json() {
        let err = render_json("{rows: ").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn error_text_style_reports_cell() {
        let err = render_json(r#"{"rows": [[["a", 1, {"style": "text"}]]]}"#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Unsupported(_)));
        assert_eq!(err.to_string(), "unsupported: cell style `text` (in row 0, cell 0)");
    }

    #[test]
    fn error_misspelled_cell_option() {
        let err = render_json(r#"{"rows": [[["a", 1, {"colour": "red"}]]]}"#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn output_path_uses_stem() {
        let p = output_path(Path::new("grids/daily.json"), Path::new("dist"));
        assert_eq!(p, Path::new("dist/daily.html"));
    }
}
