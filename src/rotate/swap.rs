use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{PocketError, PocketResult},
    foundation::fs::copy_dir_all,
};

/// Name of the file that records the index currently on air.
pub const STATE_FILE: &str = "current.txt";

/// What a rendered item is on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RotateMode {
    /// `Rendered/{n}/`, copied into `Current/`.
    Directory,
    /// `Rendered/{n}.mp4`, copied to `Rendered/current.mp4`.
    File,
}

/// Where the rendered items, the live slot and the state file live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotatePaths {
    /// Directory of numbered renders.
    pub rendered: PathBuf,
    /// Live directory (directory mode).
    pub current_dir: PathBuf,
    /// Live file (file mode).
    pub current_file: PathBuf,
    /// Last index shown.
    pub state_file: PathBuf,
}

impl RotatePaths {
    /// The standard layout: `Rendered/`, `Current/`, `Rendered/current.mp4` and `current.txt`.
    pub fn under(root: &Path) -> Self {
        let rendered = root.join("Rendered");
        Self {
            current_file: rendered.join("current.mp4"),
            rendered,
            current_dir: root.join("Current"),
            state_file: root.join(STATE_FILE),
        }
    }

    fn item(&self, mode: RotateMode, index: u32) -> PathBuf {
        match mode {
            RotateMode::Directory => self.rendered.join(index.to_string()),
            RotateMode::File => self.rendered.join(format!("{index}.mp4")),
        }
    }
}

/// Result of one rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotateOutcome {
    /// Index now live.
    pub index: u32,
    /// The rendered item that was copied.
    pub source: PathBuf,
    /// Whether the index wrapped back to 1.
    pub wrapped: bool,
}

/// Read the state file, creating it with `0` when it does not exist yet.
pub fn read_state(path: &Path) -> PocketResult<u32> {
    if !path.exists() {
        std::fs::write(path, "0")
            .with_context(|| format!("create state file '{}'", path.display()))?;
        return Ok(0);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read state file '{}'", path.display()))?;
    raw.trim().parse().map_err(|e| {
        PocketError::data(format!(
            "state file '{}' holds '{}', not an index: {e}",
            path.display(),
            raw.trim()
        ))
    })
}

/// Make the next rendered item live and record its index.
pub fn swap_next(paths: &RotatePaths, mode: RotateMode) -> PocketResult<RotateOutcome> {
    let previous = read_state(&paths.state_file)?;

    let mut index = previous.saturating_add(1);
    let mut source = paths.item(mode, index);
    let mut wrapped = false;
    if !exists(mode, &source) {
        index = 1;
        source = paths.item(mode, index);
        wrapped = true;
        if !exists(mode, &source) {
            return Err(PocketError::data(format!(
                "nothing to rotate: '{}' does not exist",
                source.display()
            )));
        }
    }

    match mode {
        RotateMode::Directory => {
            if paths.current_dir.exists() {
                std::fs::remove_dir_all(&paths.current_dir).with_context(|| {
                    format!("remove directory '{}'", paths.current_dir.display())
                })?;
            }
            copy_dir_all(&source, &paths.current_dir)?;
        }
        RotateMode::File => {
            if paths.current_file.exists() {
                std::fs::remove_file(&paths.current_file).with_context(|| {
                    format!("remove file '{}'", paths.current_file.display())
                })?;
            }
            std::fs::copy(&source, &paths.current_file).with_context(|| {
                format!(
                    "copy '{}' to '{}'",
                    source.display(),
                    paths.current_file.display()
                )
            })?;
        }
    }

    std::fs::write(&paths.state_file, index.to_string())
        .with_context(|| format!("write state file '{}'", paths.state_file.display()))?;

    tracing::info!(previous, index, wrapped, source = %source.display(), "rotated");
    Ok(RotateOutcome {
        index,
        source,
        wrapped,
    })
}

fn exists(mode: RotateMode, path: &Path) -> bool {
    match mode {
        RotateMode::Directory => path.is_dir(),
        RotateMode::File => path.is_file(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotate/swap.rs"]
mod tests;
