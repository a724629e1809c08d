use crate::core::util::progress::{Progress, Summary};
use crate::core::verbs;
use crate::dictionary::Dictionary;
use crate::error::StemplateError;
use crate::fs::{create_dir_mirror, ensure_parent, link_or_copy, print_raw, Materialized};
use error_stack::{IntoReport, Result, ResultExt};
use std::io::{self, Write};
use termcolor::Color;

mod config;
pub use config::*;

mod classify;
pub use classify::{InputKind, OutputTarget, Plan, Root};
mod destination;
pub use destination::{Action, Resolver};
mod render;
pub use render::{Loaded, Renderer};
mod walk;
pub use walk::{walk, Visit};

/// Run stemplate with the given config and dictionary
///
/// This is the main entry point for stemplate. Rendered output without an output path goes to stdout.
/// If an error occurs, it will be printed to stderr and the function will return [`Err`].
///
/// If you want to retrieve the error object instead of printing it, use [`Stemplate::run`].
pub fn stemplate(config: Config, dictionary: &Dictionary) -> std::result::Result<(), ()> {
    match Stemplate::run(config, dictionary) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{:?}", e);
            Err(())
        }
    }
}

/// The runtime state when executing stemplate
#[derive(Debug)]
pub struct Stemplate<'a> {
    /// The template renderer, bound to the dictionary
    renderer: Renderer<'a>,
    /// The Progress reporter
    progress: Progress,
    /// Where console output goes
    console: ConsoleOut<'a>,
}

/// Wrapper so the runtime can be printed with `{:?}`
struct ConsoleOut<'a>(&'a mut dyn Write);

impl std::fmt::Debug for ConsoleOut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConsoleOut")
    }
}

impl<'a> Stemplate<'a> {
    /// Internal run function
    ///
    /// This is what [`stemplate`] calls internally. The difference is that this function
    /// returns the error instead of printing it.
    pub fn run(config: Config, dictionary: &Dictionary) -> Result<Summary, StemplateError> {
        let stdout = io::stdout();
        let mut console = stdout.lock();
        Stemplate::run_with_console(config, dictionary, &mut console)
    }

    /// Run with console output going to `console` instead of stdout
    pub fn run_with_console(
        config: Config,
        dictionary: &'a Dictionary,
        console: &'a mut dyn Write,
    ) -> Result<Summary, StemplateError> {
        log::info!("creating stemplate");
        log::debug!("using config: {:?}", config);

        let mut runtime = Self {
            renderer: Renderer::new(dictionary),
            progress: Progress::new(config.verbosity.clone()),
            console: ConsoleOut(console),
        };

        let result = runtime.run_internal(&config);
        match result {
            Ok(_) => {
                runtime.progress.print_done();
                Ok(runtime.progress.summary.clone())
            }
            Err(e) => {
                runtime.progress.print_failed();
                Err(e)
            }
        }
    }

    fn run_internal(&mut self, config: &Config) -> Result<(), StemplateError> {
        let plan = Plan::classify(&config.base_dir, &config.input, config.output_path())
            .prepare_output()?;
        let marker = config.marker();
        self.progress.print_entry(
            verbs::USING,
            &format!("template marker `{marker}`"),
            Color::Yellow,
        );
        let resolver = Resolver::new(&plan, marker, config.all);

        for root in &plan.roots {
            log::info!("walking template root: {}", root.path.display());
            for visit in walk(root) {
                let visit = visit.attach_printable_lazy(|| {
                    format!("cannot walk template root `{}`", root.given.display())
                })?;
                let action = resolver.resolve(root, &visit);
                log::debug!("{} -> {:?}", visit.path.display(), action);
                self.execute_entry(&visit, action)?;
            }
        }

        self.console
            .0
            .flush()
            .into_report()
            .change_context(StemplateError::Filesystem("<console>".to_string()))
            .attach_printable("cannot flush console output")
    }

    fn execute_entry(&mut self, visit: &Visit, action: Action) -> Result<(), StemplateError> {
        match action {
            Action::Skip => {}
            Action::CreateDir(dest) => {
                create_dir_mirror(&dest, visit.permissions.clone())?;
                self.progress.summary.directories += 1;
                self.progress
                    .print_entry(verbs::CREATING, &dest.display().to_string(), Color::Yellow);
            }
            Action::Copy(dest) => {
                ensure_parent(&dest)?;
                let verb = match link_or_copy(&visit.path, &dest)? {
                    Materialized::HardLink => verbs::LINKING,
                    Materialized::Copy => verbs::COPYING,
                };
                self.progress.summary.copied += 1;
                self.progress
                    .print_entry(verb, &dest.display().to_string(), Color::Green);
            }
            Action::Render(dest) => {
                self.progress.print_entry(
                    verbs::RENDERING,
                    &format!("{} -> {}", visit.path.display(), dest.display()),
                    Color::Green,
                );
                self.renderer.render_file(&visit.path, &dest)?;
                self.progress.summary.rendered += 1;
            }
            Action::Print => {
                self.progress.print_entry(
                    verbs::PRINTING,
                    &visit.path.display().to_string(),
                    Color::Green,
                );
                print_raw(&visit.path, &mut *self.console.0)?;
                self.progress.summary.printed += 1;
            }
            Action::RenderToConsole => {
                self.progress.print_entry(
                    verbs::RENDERING,
                    &visit.path.display().to_string(),
                    Color::Green,
                );
                self.renderer
                    .render_console(&visit.path, &mut *self.console.0)?;
                self.progress.summary.rendered += 1;
            }
        }
        Ok(())
    }
}
