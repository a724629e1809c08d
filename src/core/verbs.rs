//! Status verbs printed by [`Progress`](super::util::progress::Progress)

pub const USING: &str = "Using";
pub const CREATING: &str = "Creating";
pub const COPYING: &str = "Copying";
pub const LINKING: &str = "Linking";
pub const RENDERING: &str = "Rendering";
pub const PRINTING: &str = "Printing";
pub const DONE: &str = "Done";
pub const FAILED: &str = "Failed";
