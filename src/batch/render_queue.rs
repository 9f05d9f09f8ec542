use std::path::{Path, PathBuf};

use crate::foundation::error::{PocketError, PocketResult};

/// Asset files every numbered source folder must supply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotSet {
    /// Screenshots, shown in this order.
    pub screens: Vec<String>,
    /// Logo revealed at the end.
    pub logo: String,
}

impl Default for SlotSet {
    fn default() -> Self {
        Self {
            screens: (1..=6).map(|i| format!("{i}.jpg")).collect(),
            logo: "logo.png".to_string(),
        }
    }
}

impl SlotSet {
    /// Every slot file name, screens first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.logo.as_str()))
    }
}

/// One resolved composition render: the source files for each slot and the output path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderQueueJob {
    /// Source folder number.
    pub number: u32,
    /// `Source/{number}`.
    pub folder: PathBuf,
    /// Resolved screen files, in slot order.
    pub screens: Vec<PathBuf>,
    /// Resolved logo file.
    pub logo: PathBuf,
    /// `Rendered/{number}.mp4`.
    pub out_path: PathBuf,
}

/// Resolve the slots of source folder `number`, failing on the first missing folder or file.
pub fn plan_job(
    source_root: &Path,
    export_root: &Path,
    number: u32,
    slots: &SlotSet,
) -> PocketResult<RenderQueueJob> {
    let folder = source_root.join(number.to_string());
    if !folder.is_dir() {
        return Err(PocketError::template(format!(
            "source folder '{}' does not exist",
            folder.display()
        )));
    }

    let resolve = |name: &str| -> PocketResult<PathBuf> {
        let path = folder.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(PocketError::template(format!(
                "the file {name} does not exist in '{}'",
                folder.display()
            )))
        }
    };

    let screens = slots
        .screens
        .iter()
        .map(|name| resolve(name))
        .collect::<PocketResult<Vec<_>>>()?;
    let logo = resolve(&slots.logo)?;

    Ok(RenderQueueJob {
        number,
        out_path: export_root.join(format!("{number}.mp4")),
        folder,
        screens,
        logo,
    })
}

/// Video-composition collaborator: renders one resolved job to its `out_path`.
pub trait CompositionRenderer {
    /// Render `job`.
    fn render(&mut self, job: &RenderQueueJob) -> PocketResult<()>;
}

/// Options for [`run_render_queue`].
#[derive(Clone, Debug)]
pub struct RenderQueueOpts {
    /// Directory holding the numbered source folders.
    pub source_root: PathBuf,
    /// Directory the videos are written into.
    pub export_root: PathBuf,
    /// First folder number; must be positive.
    pub start: u32,
    /// How many consecutive folders to render.
    pub amount: u32,
    /// Slots each folder supplies.
    pub slots: SlotSet,
}

/// Render folders `start..start + amount` in order. Returns the written video paths.
///
/// Each folder is planned right before it renders, so a missing folder stops the queue after
/// the earlier numbers have been written.
#[tracing::instrument(skip_all, fields(start = opts.start, amount = opts.amount))]
pub fn run_render_queue(
    opts: &RenderQueueOpts,
    renderer: &mut dyn CompositionRenderer,
) -> PocketResult<Vec<PathBuf>> {
    if opts.start == 0 {
        return Err(PocketError::validation("invalid start number: must be > 0"));
    }
    let end = opts.start.checked_add(opts.amount).ok_or_else(|| {
        PocketError::validation(format!(
            "start {} plus amount {} overflows",
            opts.start, opts.amount
        ))
    })?;

    let mut written = Vec::with_capacity(opts.amount as usize);
    for number in opts.start..end {
        let job = plan_job(&opts.source_root, &opts.export_root, number, &opts.slots)?;
        tracing::info!(number, out = %job.out_path.display(), "rendering composition");
        renderer.render(&job)?;
        written.push(job.out_path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/render_queue.rs"]
mod tests;
