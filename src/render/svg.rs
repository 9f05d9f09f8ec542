use std::{fmt::Write as _, path::Path, sync::Arc};

use crate::{
    foundation::core::Rgba8,
    foundation::error::{PocketError, PocketResult},
    render::{FrameRGBA, FrameRenderer, LayerText, template::FrameTemplate},
    text::fit::wrap_lines,
};

/// Build the SVG document for one frame.
///
/// Text is pre-wrapped with the layer's metrics and emitted one `<tspan>` per line, so the output
/// does not depend on SVG text-wrapping support.
pub fn frame_svg(
    template: &FrameTemplate,
    layers: &[LayerText],
    indicator_active: bool,
) -> PocketResult<String> {
    let (width, height) = (template.canvas.width, template.canvas.height);
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{width}" height="{height}" {}/>"#,
        fill_attrs(template.background)
    );

    for content in layers {
        let layer = template.layer(&content.layer)?;
        let size = content.font_size.unwrap_or(layer.font_size);
        let line_step = size * layer.metrics.line_height_em;
        let lines = wrap_lines(&content.text, size, layer.width, &layer.metrics);

        let _ = write!(
            svg,
            r#"<text font-family="{}" font-size="{size}" font-weight="{}" {}>"#,
            escape_xml(&layer.font_family),
            if layer.bold { "bold" } else { "normal" },
            fill_attrs(layer.color)
        );
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = layer.y + size + line_step * i as f32;
            let _ = write!(
                svg,
                r#"<tspan x="{}" y="{baseline}">{}</tspan>"#,
                layer.x,
                escape_xml(line)
            );
        }
        svg.push_str("</text>");
    }

    if indicator_active {
        let ind = &template.indicator;
        let tip_y = ind.y + ind.size * 0.866;
        let _ = write!(
            svg,
            r#"<polygon points="{},{} {},{} {},{}" {}/>"#,
            ind.x,
            ind.y,
            ind.x + ind.size,
            ind.y,
            ind.x + ind.size / 2.0,
            tip_y,
            fill_attrs(ind.color)
        );
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn fill_attrs(c: Rgba8) -> String {
    format!(
        r##"fill="#{:02x}{:02x}{:02x}" fill-opacity="{}""##,
        c.r,
        c.g,
        c.b,
        f32::from(c.a) / 255.0
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Rasterizes [`frame_svg`] documents with `resvg`.
pub struct SvgFrameRenderer {
    template: FrameTemplate,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgFrameRenderer {
    /// Renderer using system fonts only.
    pub fn new(template: FrameTemplate) -> PocketResult<Self> {
        Self::with_font_dir(template, None)
    }

    /// Renderer using system fonts plus any `.ttf`/`.otf`/`.ttc` files in `font_dir`.
    pub fn with_font_dir(template: FrameTemplate, font_dir: Option<&Path>) -> PocketResult<Self> {
        template.validate()?;
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Ok(Self {
            template,
            fontdb: Arc::new(db),
        })
    }

    /// The layout being rendered.
    pub fn template(&self) -> &FrameTemplate {
        &self.template
    }
}

impl FrameRenderer for SvgFrameRenderer {
    fn render_frame(
        &mut self,
        layers: &[LayerText],
        indicator_active: bool,
    ) -> PocketResult<FrameRGBA> {
        let svg = frame_svg(&self.template, layers, indicator_active)?;

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| PocketError::render(format!("parse frame svg: {e}")))?;

        let canvas = self.template.canvas;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| PocketError::render("failed to allocate frame pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
