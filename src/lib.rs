//! # stemplate
//! A simple template renderer for the shell.
//!
//! Templates are [Handlebars](https://handlebarsjs.com/) files rendered against a dictionary
//! loaded from a config file and/or environment variables. The template input can be
//! a single file, a directory, or a comma separated list of files and directories.
//!
//! Fields can also be written with a leading dot, `{{ .user }}`, see [`rewrite_dot_paths`].
//!
//! # stemplate as a library
//! ```no_run
//! use stemplate::{Config, DictionarySource, Stemplate};
//!
//! let source = DictionarySource {
//!     file: Some("values.toml".into()),
//!     ..Default::default()
//! };
//! let dictionary = source.load().unwrap();
//!
//! let mut cfg = Config::default();
//! cfg.input = "templates".to_string();
//! cfg.output = Some("out".into());
//! Stemplate::run(cfg, &dictionary).unwrap();
//! ```

mod core;
pub use crate::core::{
    counter, rewrite_dot_paths, stemplate, substitute, Config, ConversionError, Loaded, Renderer,
    Stemplate, Summary, Verbosity,
};
pub mod dictionary;
pub use dictionary::{Dictionary, DictionarySource};
pub mod error;
mod fs;
pub use fs::DEFAULT_TEMPLATE_EXT;
