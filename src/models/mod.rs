pub mod cue;
pub mod record;

pub use cue::*;
pub use record::*;
