pub mod analyze;
pub mod caption;
pub mod config;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod summary;
pub mod translate;
pub mod util;

pub use caption::{CaptionInterval, CaptionTrack};
pub use config::Config;
pub use error::{ClipError, Result};
pub use pipeline::{clip_segment, print_summary, ClipOutcome, ClipRequest, ClipStats};
