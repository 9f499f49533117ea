pub mod stage0_merge;
pub mod stage1_segment;
pub mod stage2_dialogue;
pub mod stage3_render;

pub use stage0_merge::*;
pub use stage1_segment::*;
pub use stage2_dialogue::*;
pub use stage3_render::*;
