use crate::core::helpers::register_helpers;
use crate::core::rewrite_dot_paths;
use crate::dictionary::Dictionary;
use crate::error::StemplateError;
use crate::fs::{create_output_file, ensure_parent};
use derivative::Derivative;
use error_stack::{IntoReport, Result, ResultExt};
use handlebars::Handlebars;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Renders templates against one dictionary.
///
/// The registry is built per run, with the helpers bound to the dictionary.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Renderer<'d> {
    #[derivative(Debug = "ignore")]
    registry: Handlebars<'d>,
    dictionary: &'d Dictionary,
}

impl<'d> Renderer<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        let mut registry = Handlebars::new();
        // output is plain text
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);
        register_helpers(&mut registry, dictionary);
        Self {
            registry,
            dictionary,
        }
    }

    /// Read and compile the template at `source`.
    ///
    /// A file that is not UTF-8 cannot hold a template and is loaded as raw bytes.
    pub fn load(&mut self, source: &Path) -> Result<Loaded, StemplateError> {
        let bytes = fs::read(source)
            .into_report()
            .change_context_lazy(|| StemplateError::filesystem(source))
            .attach_printable("cannot read template")?;
        match String::from_utf8(bytes) {
            Ok(content) => {
                let name = source.display().to_string();
                self.compile_str(&name, &content)?;
                Ok(Loaded::Template(name))
            }
            Err(e) => {
                log::debug!("{} is not UTF-8, passing it through", source.display());
                Ok(Loaded::Raw(e.into_bytes()))
            }
        }
    }

    /// Compile a template from a string
    pub fn compile_str(&mut self, name: &str, template: &str) -> Result<(), StemplateError> {
        log::debug!("compiling template: {name}");
        let template = rewrite_dot_paths(template);
        self.registry
            .register_template_string(name, template.as_ref())
            .into_report()
            .change_context_lazy(|| StemplateError::TemplateSyntax(name.to_string()))
    }

    /// Execute a compiled template into `out`
    pub fn execute<W: Write>(&self, name: &str, out: W) -> Result<(), StemplateError> {
        self.registry
            .render_to_write(name, self.dictionary, out)
            .into_report()
            .change_context_lazy(|| StemplateError::TemplateExecution(name.to_string()))
    }

    /// Render a template string, returning the output
    pub fn render_str(&mut self, name: &str, template: &str) -> Result<String, StemplateError> {
        self.compile_str(name, template)?;
        let mut out = Vec::new();
        self.execute(name, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Write what was loaded from `source` into `out`
    fn emit<W: Write>(&self, loaded: &Loaded, source: &Path, mut out: W) -> Result<(), StemplateError> {
        match loaded {
            Loaded::Template(name) => self.execute(name, out),
            Loaded::Raw(bytes) => out
                .write_all(bytes)
                .into_report()
                .change_context_lazy(|| StemplateError::filesystem(source))
                .attach_printable("cannot write raw content"),
        }
    }

    /// Render the template at `source` into the file at `dest`.
    ///
    /// The template is compiled before the destination is created.
    pub fn render_file(&mut self, source: &Path, dest: &Path) -> Result<(), StemplateError> {
        let loaded = self.load(source)?;
        ensure_parent(dest)?;
        let mut out = create_output_file(dest)?;
        self.emit(&loaded, source, &mut out)
            .attach_printable_lazy(|| format!("output file `{}` may be incomplete", dest.display()))?;
        out.flush()
            .into_report()
            .change_context_lazy(|| StemplateError::filesystem(dest))
            .attach_printable("cannot write output file")
    }

    /// Render the template at `source` to the console
    pub fn render_console(&mut self, source: &Path, console: &mut dyn Write) -> Result<(), StemplateError> {
        let loaded = self.load(source)?;
        self.emit(&loaded, source, console)
    }
}

/// A template file after loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// Compiled and registered under this name
    Template(String),
    /// Not text, written out unchanged
    Raw(Vec<u8>),
}
