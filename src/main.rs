//! stemplate CLI entrypoint
//! Parses command-line arguments, loads the dictionary and runs the renderer.
use clap::{ArgAction, Parser};
use error_stack::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use stemplate::error::StemplateError;
use stemplate::{Config, DictionarySource, Stemplate, Verbosity, DEFAULT_TEMPLATE_EXT};

/// Simple template parser for the shell.
///
/// Renders Handlebars templates with values from a config file and/or environment variables.
/// The template can be a file, a directory, or a comma separated list of files and directories.
#[derive(Parser, Debug)]
#[command(name = "stemplate", author, version, about, long_about)]
struct Cli {
    /// Template file, directory, or comma separated list of files and directories
    template: String,

    /// Send results to this file or directory instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File that contains the data structure (JSON, TOML or YAML)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Comma separated environment variable names that contain strings
    #[arg(short, long, value_delimiter = ',')]
    string: Vec<String>,

    /// Comma separated environment variable names that contain comma separated strings
    #[arg(short, long, value_delimiter = ',')]
    list: Vec<String>,

    /// Comma separated environment variable names that contain comma separated key=value pairs
    #[arg(short, long, value_delimiter = ',')]
    map: Vec<String>,

    /// Extension of template files when the template input is a directory or a list
    #[arg(short = 't', long, default_value = DEFAULT_TEMPLATE_EXT)]
    extension: String,

    /// Consider all files in a directory templates, regardless of extension
    #[arg(short, long)]
    all: bool,

    /// Print status to stderr. Repeat for every processed entry
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn dictionary_source(&self) -> DictionarySource {
        DictionarySource {
            file: self.file.clone(),
            strings: self.string.clone(),
            lists: self.list.clone(),
            maps: self.map.clone(),
            ..Default::default()
        }
    }

    fn config(&self) -> Config {
        let mut config = Config::default();
        config.input = self.template.clone();
        config.output = self.output.clone();
        config.extension = self.extension.clone();
        config.all = self.all;
        config.verbosity = match self.verbose {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        };
        config
    }
}

fn run(cli: &Cli) -> Result<(), StemplateError> {
    let source = cli.dictionary_source();
    let config = cli.config();
    source.validate()?;
    config.validate()?;
    let dictionary = source.load()?;
    Stemplate::run(config, &dictionary)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("parsed arguments: {cli:?}");
    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
