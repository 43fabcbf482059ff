pub mod walk;

pub use walk::{WalkError, WalkOptions, walk_files};
