//! pocketpals batch-produces the image and video assets for the Pocket Pals segment games and
//! runs the randomized Order Up timeline.
//!
//! The core is pure and host-independent:
//!
//! - [`segment`] splits text into sentence fragments
//! - [`sequence`] turns fragments into cumulative [`RevealState`]s
//! - [`ShuffleState`] and [`OrderUpSession`] reveal catalog items in random order while keeping
//!   the track sorted
//!
//! Drivers wire the core to collaborators behind narrow traits: [`FrameRenderer`] and
//! [`ImageSink`] for still frames, [`CompositionRenderer`] and [`FrameSink`] for video, and
//! [`TrackView`] for the timeline.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod batch;
pub(crate) mod data;
pub(crate) mod encode;
pub(crate) mod order_up;
pub(crate) mod render;
pub(crate) mod reveal;
pub(crate) mod rotate;
pub(crate) mod subtitles;
pub(crate) mod text;
pub(crate) mod track;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgba8};
pub use crate::foundation::error::{PocketError, PocketResult};

pub use crate::text::fit::{FONT_SIZE_STEP, MIN_FONT_SIZE, TextMetrics, fit_font_size, wrap_lines};
pub use crate::text::segment::{normalize_line_endings, segment};

pub use crate::reveal::sequence::{RevealState, frame_label, sequence};

pub use crate::track::session::{OrderUpSession, SessionStep, Track};
pub use crate::track::shuffle::{Phase, Placement, ShuffleState, Step};

pub use crate::data::catalog::{DEFAULT_DECADE, Game, GameCatalog, missing_assets};
pub use crate::data::records::{
    FactRecord, ReviewRecord, format_hours, parse_records, read_records,
};

pub use crate::render::sink::{ImageSink, MemoryImages, PngDirectory};
pub use crate::render::svg::{SvgFrameRenderer, frame_svg};
pub use crate::render::template::{
    FACT_LAYER, FrameTemplate, HOURS_LAYER, Indicator, REVIEW_LAYER, TextLayer, USERNAME_LAYER,
};
pub use crate::render::{FrameRGBA, FrameRenderer, LayerText};

pub use crate::batch::render_queue::{
    CompositionRenderer, RenderQueueJob, RenderQueueOpts, SlotSet, plan_job, run_render_queue,
};
pub use crate::batch::reveal::{BatchSummary, RevealJob, render_reveal_batch, render_reveal_job};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::slideshow::{FfmpegSlideshow, SlideshowOpts};

pub use crate::order_up::controller::{DEFAULT_NEXT_EVENT, PageController, Trigger, TrackView};
pub use crate::order_up::terminal::{Card, TerminalView};

pub use crate::rotate::swap::{
    RotateMode, RotateOutcome, RotatePaths, STATE_FILE, read_state, swap_next,
};

pub use crate::subtitles::countdown::{FINAL_CUE_SECS, countdown_srt, timestamp, write_srt};
