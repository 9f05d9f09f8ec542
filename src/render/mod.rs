pub(crate) mod sink;
pub(crate) mod svg;
pub(crate) mod template;

use crate::foundation::error::PocketResult;

/// A rendered RGBA8 frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
    /// Whether `data` holds premultiplied alpha.
    pub premultiplied: bool,
}

/// Contents of one named text layer for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerText {
    /// Template layer name.
    pub layer: String,
    /// Text to show.
    pub text: String,
    /// Font size override (from box fitting); the layer's own size when `None`.
    pub font_size: Option<f32>,
}

impl LayerText {
    /// Text at the layer's own font size.
    pub fn new(layer: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            text: text.into(),
            font_size: None,
        }
    }

    /// Text at an explicit font size.
    pub fn sized(layer: impl Into<String>, text: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Self::new(layer, text)
        }
    }
}

/// Image-document collaborator: sets the text layers and the indicator, and rasterizes.
pub trait FrameRenderer {
    /// Render one frame with `layers` filled in and the indicator on or off.
    fn render_frame(&mut self, layers: &[LayerText], indicator_active: bool)
    -> PocketResult<FrameRGBA>;
}
