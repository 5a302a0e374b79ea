//! Cell background gradients.
//!
//! A base color is classified as dark or light by perceived luminance,
//! which picks the foreground text color. Two gradient stops are then
//! derived in HLS space by nudging hue by ±8° and lightness by a small
//! amount scaled with the dark/light factor.

use std::fmt;

use crate::error::{Result, StatsGridError};

/// Foreground used on dark backgrounds.
pub const WHITE: &str = "#fff";
/// Foreground used on light backgrounds.
pub const BLACK: &str = "#000";

/// Backgrounds at or below this perceived luminance get white text.
pub const LUMINANCE_THRESHOLD: f64 = 186.0;

const HUE_SHIFT: f64 = 8.0 / 360.0;
const DARK_FACTOR: f64 = -1.0;
const LIGHT_FACTOR: f64 = 0.7;

// ---------------------------------------------------------------------------
// Builtin palette
// ---------------------------------------------------------------------------

/// A named palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub hex: &'static str,
    pub aliases: &'static [&'static str],
}

static BUILTIN_COLORS: &[NamedColor] = &[
    NamedColor { name: "red", hex: "#f2495c", aliases: &["error"] },
    NamedColor { name: "orange", hex: "#ff9830", aliases: &["warning"] },
    NamedColor { name: "yellow", hex: "#fade2a", aliases: &[] },
    NamedColor { name: "green", hex: "#73bf69", aliases: &["success"] },
    NamedColor { name: "blue", hex: "#5794f2", aliases: &["info"] },
    NamedColor { name: "purple", hex: "#b877d9", aliases: &[] },
];

/// The builtin palette, in display order.
pub fn builtin_colors() -> &'static [NamedColor] {
    BUILTIN_COLORS
}

/// Look up a palette name or alias (`error`, `warning`, `info`, `success`).
pub fn resolve_color_alias(name: &str) -> Option<&'static str> {
    BUILTIN_COLORS
        .iter()
        .find(|c| c.name == name || c.aliases.iter().any(|a| *a == name))
        .map(|c| c.hex)
}

// ---------------------------------------------------------------------------
// RGB / HLS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb` (either case).
    pub fn from_hex(color: &str) -> Result<Self> {
        let digits = color.strip_prefix('#').unwrap_or(color);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StatsGridError::invalid_argument(format!(
                "unsupported color: {color:?} (expected 6 hex digits)"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| StatsGridError::invalid_argument(format!("{color:?}: {e}")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Weighted sum `0.299 R + 0.587 G + 0.114 B` in thousandths, so
    /// threshold comparisons are exact.
    fn luminance_millis(self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    /// Perceived luminance in [0, 255].
    pub fn luminance(self) -> f64 {
        f64::from(self.luminance_millis()) / 1000.0
    }

    pub fn is_dark(self) -> bool {
        // 186 * 1000
        self.luminance_millis() <= 186_000
    }

    pub fn to_hls(self) -> Hls {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        rgb_to_hls(r, g, b)
    }

    /// Channels in [0, 1], rounded half-to-even to an integer step and clamped.
    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |x: f64| (x * 255.0).round_ties_even().clamp(0.0, 255.0) as u8;
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hue, lightness, saturation, each in [0, 1]. Hue is a fraction of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

impl Hls {
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = hls_to_rgb(self.h, self.l, self.s);
        Rgb::from_unit(r, g, b)
    }

    /// Rotate hue by `dh` turns and shift lightness by `dl`.
    #[must_use]
    pub fn shifted(self, dh: f64, dl: f64) -> Self {
        Self {
            h: wrap_unit(self.h + dh),
            l: (self.l + dl).clamp(0.0, 1.0),
            s: self.s,
        }
    }
}

/// Reduce to [0, 1). `rem_euclid` can round up to exactly 1.0 for tiny
/// negative inputs.
fn wrap_unit(x: f64) -> f64 {
    let w = x.rem_euclid(1.0);
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> Hls {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let range = max - min;
    let l = sum / 2.0;
    if range == 0.0 {
        return Hls { h: 0.0, l, s: 0.0 };
    }
    let s = if l <= 0.5 {
        range / sum
    } else {
        range / (2.0 - max - min)
    };
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hls {
        h: wrap_unit(h / 6.0),
        l,
        s,
    }
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = wrap_unit(hue);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

/// Foreground color plus a CSS `linear-gradient(...)` background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    pub foreground: &'static str,
    pub css: String,
}

impl From<Gradient> for (String, String) {
    fn from(g: Gradient) -> Self {
        (g.foreground.to_string(), g.css)
    }
}

/// The two HLS stops used for `base`.
pub fn gradient_stops(base: Rgb) -> (Hls, Hls) {
    let factor = if base.is_dark() {
        DARK_FACTOR
    } else {
        LIGHT_FACTOR
    };
    let hls = base.to_hls();
    (
        hls.shifted(HUE_SHIFT, 0.15 * factor),
        hls.shifted(-HUE_SHIFT, 0.05 * factor),
    )
}

/// Build the cell background for a hex color.
///
/// Resolve palette names with [`resolve_color_alias`] first; this only
/// accepts hex.
pub fn build_gradient(color: &str) -> Result<Gradient> {
    let base = Rgb::from_hex(color)?;
    let foreground = if base.is_dark() { WHITE } else { BLACK };
    let (start, end) = gradient_stops(base);
    let css = format!(
        "linear-gradient(120deg, {}, {})",
        start.to_rgb(),
        end.to_rgb()
    );
    log::debug!(
        "gradient for {base} (luminance {:.1}): {css} on {foreground}",
        base.luminance()
    );
    Ok(Gradient { foreground, css })
}
