use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{PocketError, PocketResult},
    foundation::fs::ensure_parent_dir,
    foundation::math::unpremultiply_rgba8_in_place,
    render::FrameRGBA,
};

/// Destination for exported still frames, addressed by path relative to the export root.
pub trait ImageSink {
    /// Store `frame` under `rel_path`.
    fn save(&mut self, rel_path: &Path, frame: &FrameRGBA) -> PocketResult<()>;
}

/// Writes PNG files under a root directory, creating subdirectories as needed.
#[derive(Clone, Debug)]
pub struct PngDirectory {
    root: PathBuf,
}

impl PngDirectory {
    /// Export into `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The export root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSink for PngDirectory {
    fn save(&mut self, rel_path: &Path, frame: &FrameRGBA) -> PocketResult<()> {
        if frame.data.len() != (frame.width as usize) * (frame.height as usize) * 4 {
            return Err(PocketError::render(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let path = self.root.join(rel_path);
        ensure_parent_dir(&path)?;

        let straight;
        let data = if frame.premultiplied {
            let mut buf = frame.data.clone();
            unpremultiply_rgba8_in_place(&mut buf);
            straight = buf;
            &straight
        } else {
            &frame.data
        };

        image::save_buffer_with_format(
            &path,
            data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;

        tracing::debug!(path = %path.display(), "wrote frame");
        Ok(())
    }
}

/// Keeps frames in memory, for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryImages {
    /// Saved frames in save order.
    pub frames: Vec<(PathBuf, FrameRGBA)>,
}

impl MemoryImages {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative paths saved so far, in order.
    pub fn paths(&self) -> Vec<&Path> {
        self.frames.iter().map(|(p, _)| p.as_path()).collect()
    }
}

impl ImageSink for MemoryImages {
    fn save(&mut self, rel_path: &Path, frame: &FrameRGBA) -> PocketResult<()> {
        self.frames.push((rel_path.to_path_buf(), frame.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
