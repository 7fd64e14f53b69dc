#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, item_labels, render_schedule};
