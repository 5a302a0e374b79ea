//! Base stylesheet shipped in front of every rendered grid.

/// Class carried by the outer `<figure>` of every grid.
pub const GRID_CLASS: &str = "stats-grid";

/// Stylesheet scoped under `.{root_class}`.
pub fn build_css(root_class: &str) -> String {
    format!(
        r#".{root_class} {{
  margin: 0; padding: 0; font-size: 14px; line-height: 1.2;
  font-family: -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
}}
.{root_class} * {{ box-sizing: border-box; }}

/* ── Caption ─────────────────────────────────────── */
.{root_class} > figcaption {{
  padding: 0.25em 0.5em; font-size: 1.1em; font-weight: 600; opacity: 0.8;
}}

/* ── Rows ────────────────────────────────────────── */
.{root_class} > div {{ display: flex; flex-wrap: wrap; }}
.{root_class} > div > div {{ flex: 1 1 0; min-width: 8em; padding: 0.25em; }}

/* ── Cells ───────────────────────────────────────── */
.{root_class} > div > div > div {{
  height: 100%; padding: 0.5em 0.75em; border-radius: 4px;
  border: 1px solid rgba(128, 128, 128, 0.25); overflow: hidden;
}}
.{root_class} h2, .{root_class} h1 {{
  margin: 0; padding: 0; border: none; color: inherit;
  white-space: nowrap; overflow: hidden; text-overflow: ellipsis;
}}
.{root_class} h2 {{ font-size: 0.85em; font-weight: 400; opacity: 0.85; }}
.{root_class} h1 {{ font-size: 2em; font-weight: 600; }}

/* ── Variants ────────────────────────────────────── */
.{root_class}.compact > div > div {{ padding: 0.1em; }}
.{root_class}.compact h1 {{ font-size: 1.5em; }}
.{root_class}.borderless > div > div > div {{ border: none; }}
.{root_class}.center h2, .{root_class}.center h1 {{ text-align: center; }}
"#
    )
}

/// Stylesheet for the default [`GRID_CLASS`].
pub fn base_css() -> String {
    build_css(GRID_CLASS)
}
