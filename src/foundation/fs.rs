use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::PocketResult;

pub fn ensure_parent_dir(path: &Path) -> PocketResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Recursively copy the contents of `src` into `dst`, creating `dst` if needed.
pub fn copy_dir_all(src: &Path, dst: &Path) -> PocketResult<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("create directory '{}'", dst.display()))?;

    let entries =
        std::fs::read_dir(src).with_context(|| format!("read directory '{}'", src.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", src.display()))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).with_context(|| {
                format!("copy '{}' to '{}'", from.display(), to.display())
            })?;
        }
    }
    Ok(())
}
