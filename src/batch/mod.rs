pub(crate) mod render_queue;
pub(crate) mod reveal;
