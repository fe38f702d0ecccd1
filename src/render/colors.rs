use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Our color representation, channels in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, channels clamped into range.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

/// Named sequential color ramps, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Cool,
    Warm,
    Cubehelix,
    Hue,
}

impl Palette {
    pub const ALL: [Palette; 4] = [Palette::Cool, Palette::Warm, Palette::Cubehelix, Palette::Hue];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Cool => "cool",
            Palette::Warm => "warm",
            Palette::Cubehelix => "cubehelix",
            Palette::Hue => "hue",
        }
    }

    /// Color at `t` in 0..=1 along the ramp.
    pub fn interpolate(self, t: f64) -> AppColor {
        let t = t.clamp(0.0, 1.0);
        match self {
            Palette::Cool => cubehelix_long((260.0, 0.75, 0.35), (80.0, 1.50, 0.8), t),
            Palette::Warm => cubehelix_long((-100.0, 0.75, 0.35), (80.0, 1.50, 0.8), t),
            Palette::Cubehelix => cubehelix_long((300.0, 0.5, 0.0), (-240.0, 0.5, 1.0), t),
            Palette::Hue => hsv_to_rgb(t as f32 * 0.8, 0.65, 0.9),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Palette::ALL.iter().map(|p| p.name()).collect();
                format!("unknown palette `{}` (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Sequential scale from node height to color.
///
/// The domain runs from `domain.0` to `domain.1`; the default `[8, 0]` paints the
/// tallest containers at the start of the ramp and leaves at its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    pub palette: Palette,
    pub domain: (f64, f64),
}

impl SequentialScale {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            domain: (8.0, 0.0),
        }
    }

    pub fn color(&self, height: u32) -> AppColor {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 {
            0.5
        } else {
            (height as f64 - d0) / (d1 - d0)
        };
        self.palette.interpolate(t)
    }
}

impl Default for SequentialScale {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Interpolate hue, saturation and lightness linearly between two cubehelix colors
/// (hue in degrees, no shortest-arc wrapping).
fn cubehelix_long(from: (f64, f64, f64), to: (f64, f64, f64), t: f64) -> AppColor {
    let lerp = |a: f64, b: f64| a + (b - a) * t;
    cubehelix_to_rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn cubehelix_to_rgb(h: f64, s: f64, l: f64) -> AppColor {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    AppColor::new(
        (l + a * (A * cos_h + B * sin_h)) as f32,
        (l + a * (C * cos_h + D * sin_h)) as f32,
        (l + a * (E * cos_h)) as f32,
    )
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b }
}
