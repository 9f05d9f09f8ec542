//! Video output: frame sinks and the screenshot slideshow composition.

pub(crate) mod ffmpeg;
pub(crate) mod sink;
pub(crate) mod slideshow;
