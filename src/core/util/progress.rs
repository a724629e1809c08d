use crate::core::{verbs, Verbosity};
use std::error::Error;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Counts of what a run produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Templates rendered to files or the console
    pub rendered: usize,
    /// Files hard linked or copied verbatim
    pub copied: usize,
    /// Directories created
    pub directories: usize,
    /// Files printed verbatim to the console
    pub printed: usize,
}

/// Utility for displaying status on stderr
///
/// Stdout is reserved for rendered output.
#[derive(Debug)]
pub struct Progress {
    out: StandardStream,
    verbosity: Verbosity,
    pub summary: Summary,
}

impl Progress {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            out: StandardStream::stderr(ColorChoice::Auto),
            verbosity,
            summary: Summary::default(),
        }
    }

    /// Print the status of one entry. Only shown in verbose mode
    pub fn print_entry(&mut self, status: &str, message: &str, color: Color) {
        let _ = self.print_status(status, message, color, true);
    }

    /// Print the summary line
    pub fn print_done(&mut self) {
        let s = &self.summary;
        let message = format!(
            "{} rendered, {} copied, {} printed, {} director(ies) created",
            s.rendered, s.copied, s.printed, s.directories
        );
        let _ = self.print_status(verbs::DONE, &message, Color::Green, false);
    }

    pub fn print_failed(&mut self) {
        let _ = self.print_status(verbs::FAILED, "", Color::Red, false);
    }

    fn print_status(
        &mut self,
        status: &str,
        message: &str,
        color: Color,
        verbose: bool,
    ) -> Result<(), Box<dyn Error>> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }
        if verbose && self.verbosity != Verbosity::Verbose {
            return Ok(());
        }
        self.out.reset()?;
        self.out
            .set_color(ColorSpec::new().set_bold(true).set_fg(Some(color)))?;
        write!(self.out, "{:>12}", status)?;
        self.out.reset()?;
        writeln!(self.out, " {}", message)?;
        Ok(())
    }
}
