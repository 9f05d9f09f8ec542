use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{PocketError, PocketResult},
    text::fit::{TextMetrics, fit_font_size},
};

/// Name of the text layer a Fake News Fact Checkers fact is revealed into.
pub const FACT_LAYER: &str = "FACT";
/// Name of the Lightly Steamed username layer.
pub const USERNAME_LAYER: &str = "USERNAME";
/// Name of the Lightly Steamed hours layer.
pub const HOURS_LAYER: &str = "HOURS";
/// Name of the text layer a Lightly Steamed review is revealed into.
pub const REVIEW_LAYER: &str = "REVIEW";

fn default_font_family() -> String {
    "sans-serif".to_string()
}

/// A fixed-box text layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    /// Left edge of the box.
    pub x: f32,
    /// Top edge of the box.
    pub y: f32,
    /// Box width; text wraps inside it.
    pub width: f32,
    /// Box height; paragraph layers shrink their text to fit it.
    pub height: f32,
    /// Font size in points (one point per pixel).
    pub font_size: f32,
    /// Fill colour.
    pub color: Rgba8,
    /// CSS-style font family list.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Bold text.
    #[serde(default)]
    pub bold: bool,
    /// Typeface metrics used for wrapping.
    #[serde(default)]
    pub metrics: TextMetrics,
}

/// The triangle that marks a fully revealed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Left edge of the triangle's bounding box.
    pub x: f32,
    /// Top edge of the triangle's bounding box.
    pub y: f32,
    /// Edge length.
    pub size: f32,
    /// Fill colour.
    pub color: Rgba8,
}

/// Layout of a rendered reveal frame: canvas, background, named text layers and indicator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameTemplate {
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Background fill; may be transparent.
    pub background: Rgba8,
    /// Text layers by name.
    pub layers: BTreeMap<String, TextLayer>,
    /// Fully-revealed indicator.
    pub indicator: Indicator,
}

impl FrameTemplate {
    /// Built-in layout for Fake News Fact Checkers.
    pub fn fake_news() -> Self {
        Self {
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            background: Rgba8::opaque(0x10, 0x18, 0x20),
            layers: BTreeMap::from([(
                FACT_LAYER.to_string(),
                text_layer(160.0, 200.0, 1600.0, 640.0, 64.0, Rgba8::opaque(255, 255, 255)),
            )]),
            indicator: Indicator {
                x: 1720.0,
                y: 920.0,
                size: 60.0,
                color: Rgba8::opaque(0xff, 0xcc, 0x00),
            },
        }
    }

    /// Built-in layout for Lightly Steamed.
    pub fn lightly_steamed() -> Self {
        let mut username =
            text_layer(120.0, 120.0, 900.0, 60.0, 40.0, Rgba8::opaque(0xc6, 0xd4, 0xdf));
        username.bold = true;
        Self {
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            background: Rgba8::opaque(0x1b, 0x28, 0x38),
            layers: BTreeMap::from([
                (USERNAME_LAYER.to_string(), username),
                (
                    HOURS_LAYER.to_string(),
                    text_layer(120.0, 190.0, 900.0, 40.0, 28.0, Rgba8::opaque(0x8f, 0x98, 0xa0)),
                ),
                (
                    REVIEW_LAYER.to_string(),
                    text_layer(120.0, 280.0, 1680.0, 620.0, 40.0, Rgba8::opaque(0xac, 0xb2, 0xb8)),
                ),
            ]),
            indicator: Indicator {
                x: 1740.0,
                y: 940.0,
                size: 50.0,
                color: Rgba8::opaque(0x66, 0xc0, 0xf4),
            },
        }
    }

    /// Parse a template from JSON text.
    pub fn from_json(json: &str) -> PocketResult<Self> {
        let template: Self = serde_json::from_str(json)
            .map_err(|e| PocketError::data(format!("parse frame template JSON: {e}")))?;
        template.validate()?;
        Ok(template)
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> PocketResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read frame template '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Check canvas and layer geometry.
    pub fn validate(&self) -> PocketResult<()> {
        self.canvas.validate()?;
        for (name, layer) in &self.layers {
            if !(layer.width > 0.0 && layer.height > 0.0 && layer.font_size > 0.0) {
                return Err(PocketError::validation(format!(
                    "layer '{name}' needs a positive width, height and font_size"
                )));
            }
        }
        Ok(())
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> PocketResult<&TextLayer> {
        self.layers
            .get(name)
            .ok_or_else(|| PocketError::template(format!("template has no text layer named '{name}'")))
    }

    /// Largest size, at most the layer's own, at which `text` fits the layer's box.
    pub fn fit_font_size(&self, name: &str, text: &str) -> PocketResult<f32> {
        let layer = self.layer(name)?;
        Ok(fit_font_size(
            text,
            layer.font_size,
            layer.width,
            layer.height,
            &layer.metrics,
        ))
    }
}

fn text_layer(x: f32, y: f32, width: f32, height: f32, font_size: f32, color: Rgba8) -> TextLayer {
    TextLayer {
        x,
        y,
        width,
        height,
        font_size,
        color,
        font_family: default_font_family(),
        bold: false,
        metrics: TextMetrics::default(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/template.rs"]
mod tests;
