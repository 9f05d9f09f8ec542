use std::path::Path;

use anyhow::Context as _;
use image::{RgbaImage, imageops::FilterType};

use crate::{
    batch::render_queue::{CompositionRenderer, RenderQueueJob},
    encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts},
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{PocketError, PocketResult},
    foundation::math::{over_opaque, premultiply_rgba8_in_place},
    render::FrameRGBA,
};

/// Largest share of the canvas the logo may cover on either axis.
const LOGO_MAX_FRACTION: f64 = 0.6;

/// Timing and size of the screenshot slideshow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideshowOpts {
    /// Output size; both sides must be even for MP4 output.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Seconds each screenshot stays on screen.
    pub hold_secs: f64,
    /// Seconds the logo stays on screen over the last screenshot.
    pub logo_secs: f64,
    /// Replace an existing output video instead of failing.
    pub overwrite: bool,
}

impl Default for SlideshowOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            fps: Fps { num: 30, den: 1 },
            hold_secs: 5.0,
            logo_secs: 5.0,
            overwrite: true,
        }
    }
}

/// Builds the Screenshot in the Dark video: each screen in turn, then the logo.
#[derive(Clone, Debug, Default)]
pub struct FfmpegSlideshow {
    opts: SlideshowOpts,
}

impl FfmpegSlideshow {
    /// A slideshow with the given timing.
    pub fn new(opts: SlideshowOpts) -> Self {
        Self { opts }
    }

    /// Decode `job`'s slots and push every frame into `sink`. Returns the frame count.
    ///
    /// A failed push still ends the sink before the error is returned.
    pub fn render_into(&self, job: &RenderQueueJob, sink: &mut dyn FrameSink) -> PocketResult<u64> {
        let canvas = self.opts.canvas;
        canvas.validate()?;
        if job.screens.is_empty() {
            return Err(PocketError::template(format!(
                "job {} has no screen slots",
                job.number
            )));
        }

        let screens = job
            .screens
            .iter()
            .map(|path| load_cover(path, canvas))
            .collect::<PocketResult<Vec<_>>>()?;
        let logo = load_logo(&job.logo, canvas)?;

        let mut finale = screens[screens.len() - 1].clone();
        composite_centered(&mut finale, canvas, &logo);

        let per_screen = self.hold_frames(self.opts.hold_secs);
        let per_logo = self.hold_frames(self.opts.logo_secs);

        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.opts.fps,
        })?;

        let mut idx = 0u64;
        let segments = screens
            .iter()
            .map(|screen| (screen, per_screen))
            .chain(std::iter::once((&finale, per_logo)));
        for (frame, count) in segments {
            for _ in 0..count {
                if let Err(e) = sink.push_frame(FrameIndex(idx), frame) {
                    if let Err(end_err) = sink.end() {
                        tracing::debug!(error = %end_err, "sink end after failed push");
                    }
                    return Err(e);
                }
                idx += 1;
            }
        }
        sink.end()?;

        tracing::debug!(number = job.number, frames = idx, "slideshow encoded");
        Ok(idx)
    }

    fn hold_frames(&self, secs: f64) -> u64 {
        self.opts.fps.secs_to_frames_floor(secs).max(1)
    }
}

impl CompositionRenderer for FfmpegSlideshow {
    fn render(&mut self, job: &RenderQueueJob) -> PocketResult<()> {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts {
            overwrite: self.opts.overwrite,
            ..FfmpegSinkOpts::new(&job.out_path)
        });
        self.render_into(job, &mut sink)?;
        Ok(())
    }
}

fn decode(path: &Path) -> PocketResult<RgbaImage> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Scale to cover the canvas and crop the centre. The result is opaque.
fn load_cover(path: &Path, canvas: Canvas) -> PocketResult<FrameRGBA> {
    let img = decode(path)?;
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(PocketError::data(format!("image '{}' is empty", path.display())));
    }

    let scale = f64::max(
        f64::from(canvas.width) / f64::from(w),
        f64::from(canvas.height) / f64::from(h),
    );
    let sw = ((f64::from(w) * scale).ceil() as u32).max(canvas.width);
    let sh = ((f64::from(h) * scale).ceil() as u32).max(canvas.height);
    let scaled = image::imageops::resize(&img, sw, sh, FilterType::Triangle);
    let cropped = image::imageops::crop_imm(
        &scaled,
        (sw - canvas.width) / 2,
        (sh - canvas.height) / 2,
        canvas.width,
        canvas.height,
    )
    .to_image();

    let mut data = cropped.into_raw();
    for px in data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data,
        premultiplied: false,
    })
}

/// Shrink (never enlarge) into the logo area, premultiplied for compositing.
fn load_logo(path: &Path, canvas: Canvas) -> PocketResult<FrameRGBA> {
    let img = decode(path)?;
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(PocketError::data(format!("image '{}' is empty", path.display())));
    }

    let scale = f64::min(
        1.0,
        f64::min(
            f64::from(canvas.width) * LOGO_MAX_FRACTION / f64::from(w),
            f64::from(canvas.height) * LOGO_MAX_FRACTION / f64::from(h),
        ),
    );
    let img = if scale < 1.0 {
        let lw = ((f64::from(w) * scale).round() as u32).max(1);
        let lh = ((f64::from(h) * scale).round() as u32).max(1);
        image::imageops::resize(&img, lw, lh, FilterType::Triangle)
    } else {
        img
    };

    let (width, height) = img.dimensions();
    let mut data = img.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: true,
    })
}

fn composite_centered(dst: &mut FrameRGBA, canvas: Canvas, overlay: &FrameRGBA) {
    let ox = (canvas.width.saturating_sub(overlay.width)) / 2;
    let oy = (canvas.height.saturating_sub(overlay.height)) / 2;
    let cols = overlay.width.min(canvas.width) as usize;
    let rows = overlay.height.min(canvas.height);

    for y in 0..rows {
        let src_row = (y * overlay.width) as usize * 4;
        let dst_row = (((oy + y) * canvas.width + ox) as usize) * 4;
        for x in 0..cols {
            let s = src_row + x * 4;
            let d = dst_row + x * 4;
            over_opaque(&mut dst.data[d..d + 4], &overlay.data[s..s + 4]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/slideshow.rs"]
mod tests;
