mod helpers;
pub use helpers::{counter, substitute, ConversionError};

mod syntax;
pub use syntax::rewrite_dot_paths;

mod execute;
pub use execute::*;
mod util;
pub use util::progress::Summary;
pub mod verbs;
