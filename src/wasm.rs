//! WASM bindings for notebook and browser hosts.
//!
//! Build with: `wasm-pack build --target web --features wasm`

use wasm_bindgen::prelude::*;

use crate::grid::StatsGrid;
use crate::tag::{Attrs, Content};

fn to_json(value: JsValue) -> Result<serde_json::Value, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(serde_json::Value::Null);
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Render one HTML tag.
///
/// `content` is a string, an array of renderables, or null; `attrs` is an
/// object or null. Throws on invalid input.
#[wasm_bindgen(js_name = renderTag)]
pub fn render_tag(
    name: &str,
    content: JsValue,
    attrs: JsValue,
    self_closing: bool,
) -> Result<String, JsError> {
    let content = Content::from_json(&to_json(content)?).map_err(|e| JsError::new(&e.to_string()))?;
    let attrs = Attrs::from_json(&to_json(attrs)?).map_err(|e| JsError::new(&e.to_string()))?;
    crate::tag::render_tag(name, content, Some(&attrs), self_closing)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Build the cell background for a palette name or hex color.
///
/// Returns `{ foreground, css }`.
#[wasm_bindgen(js_name = buildGradient)]
pub fn build_gradient(color: &str) -> Result<JsValue, JsError> {
    let hex = crate::color::resolve_color_alias(color).unwrap_or(color);
    let gradient = crate::color::build_gradient(hex).map_err(|e| JsError::new(&e.to_string()))?;

    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &obj,
        &"foreground".into(),
        &JsValue::from_str(gradient.foreground),
    );
    let _ = js_sys::Reflect::set(&obj, &"css".into(), &JsValue::from_str(&gradient.css));
    Ok(obj.into())
}

/// Render a grid description (same shape as the CLI's JSON files) to an
/// HTML fragment including the stylesheet.
#[wasm_bindgen(js_name = renderGrid)]
pub fn render_grid(spec: JsValue) -> Result<String, JsError> {
    let spec = to_json(spec)?;
    let grid: StatsGrid =
        serde_json::from_value(spec).map_err(|e| JsError::new(&e.to_string()))?;
    grid.to_html().map_err(|e| JsError::new(&e.to_string()))
}
