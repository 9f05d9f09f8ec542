use std::path::PathBuf;

use crate::{
    data::records::{FactRecord, ReviewRecord, format_hours},
    foundation::error::PocketResult,
    render::{
        FrameRenderer, LayerText,
        sink::ImageSink,
        template::{FACT_LAYER, FrameTemplate, HOURS_LAYER, REVIEW_LAYER, USERNAME_LAYER},
    },
    reveal::sequence::{frame_label, sequence},
    text::segment::{normalize_line_endings, segment},
};

/// The record-specific half of a reveal render.
pub trait RevealJob {
    /// Short identifier for logs and errors.
    fn describe(&self) -> String;
    /// Text revealed fragment by fragment.
    fn body(&self) -> &str;
    /// Layer the body is revealed into.
    fn reveal_layer(&self) -> &str;
    /// Whether the reveal layer's font shrinks so the full body fits its box.
    fn fit_to_box(&self) -> bool {
        false
    }
    /// Layers that hold the same text on every frame.
    fn static_layers(&self) -> Vec<LayerText> {
        Vec::new()
    }
    /// Output path of `frame`, relative to the export root.
    fn frame_path(&self, frame: usize) -> PathBuf;
}

impl RevealJob for FactRecord {
    fn describe(&self) -> String {
        format!("fact {}", self.fact_num)
    }

    fn body(&self) -> &str {
        &self.fact
    }

    fn reveal_layer(&self) -> &str {
        FACT_LAYER
    }

    fn frame_path(&self, frame: usize) -> PathBuf {
        PathBuf::from(format!("{:02}-{}.png", self.fact_num, frame_label(frame)))
    }
}

impl RevealJob for ReviewRecord {
    fn describe(&self) -> String {
        format!("game {} review {}", self.game_num, self.review_num)
    }

    fn body(&self) -> &str {
        &self.review
    }

    fn reveal_layer(&self) -> &str {
        REVIEW_LAYER
    }

    fn fit_to_box(&self) -> bool {
        true
    }

    fn static_layers(&self) -> Vec<LayerText> {
        vec![
            LayerText::new(USERNAME_LAYER, self.username.clone()),
            LayerText::new(
                HOURS_LAYER,
                format!("{} hrs on record", format_hours(self.hours)),
            ),
        ]
    }

    fn frame_path(&self, frame: usize) -> PathBuf {
        PathBuf::from(self.game_num.to_string())
            .join(self.review_num.to_string())
            .join(format!("{}.png", frame_label(frame)))
    }
}

/// Totals of a finished batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records rendered.
    pub records: usize,
    /// Frames written across all records.
    pub frames: usize,
}

/// Render every reveal frame of one record. Returns the number of frames written.
pub fn render_reveal_job<J: RevealJob + ?Sized>(
    job: &J,
    template: &FrameTemplate,
    renderer: &mut dyn FrameRenderer,
    sink: &mut dyn ImageSink,
) -> PocketResult<usize> {
    let layer_name = job.reveal_layer();
    let statics = job.static_layers();
    template.layer(layer_name)?;
    for layer in &statics {
        template.layer(&layer.layer)?;
    }

    let body = normalize_line_endings(job.body());
    let fragments = segment(&body);
    let states = sequence(&fragments);

    let font_size = if job.fit_to_box() {
        Some(template.fit_font_size(layer_name, &body)?)
    } else {
        None
    };
    tracing::info!(
        record = %job.describe(),
        frames = states.len(),
        ?font_size,
        "rendering reveal"
    );

    for state in &states {
        let mut layers = statics.clone();
        layers.push(LayerText {
            layer: layer_name.to_string(),
            text: state.text.clone(),
            font_size,
        });

        let frame = renderer.render_frame(&layers, state.is_final)?;
        let rel = job.frame_path(state.frame);
        sink.save(&rel, &frame)?;
        tracing::debug!(path = %rel.display(), is_final = state.is_final, "frame exported");
    }

    Ok(states.len())
}

/// Render all `jobs` in order, stopping at the first failure.
#[tracing::instrument(skip_all, fields(records = jobs.len()))]
pub fn render_reveal_batch<J: RevealJob>(
    jobs: &[J],
    template: &FrameTemplate,
    renderer: &mut dyn FrameRenderer,
    sink: &mut dyn ImageSink,
) -> PocketResult<BatchSummary> {
    let mut summary = BatchSummary::default();
    for job in jobs {
        summary.frames += render_reveal_job(job, template, renderer, sink)?;
        summary.records += 1;
    }
    tracing::info!(records = summary.records, frames = summary.frames, "batch done");
    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/reveal.rs"]
mod tests;
