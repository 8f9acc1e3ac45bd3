//! CLI command definitions

use casequery_domain::ProviderFamily;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Provider family selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProviderArg {
    /// Remote Gemini sequence with local fallback
    #[default]
    Gemini,
    /// Local DeepSeek model only
    Deepseek,
}

impl From<ProviderArg> for ProviderFamily {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => ProviderFamily::Gemini,
            ProviderArg::Deepseek => ProviderFamily::DeepSeek,
        }
    }
}

/// CLI arguments for casequery
#[derive(Parser, Debug)]
#[command(name = "casequery")]
#[command(author, version, about = "Answer catalog questions about documents with LLMs")]
#[command(long_about = r#"
casequery extracts the text of HTML and plain-text documents, asks a
selected set of catalog questions about each one, and writes the answers
next to an archived copy of the source.

Remote Gemini models are tried in the configured order; quota and rate
limit errors move on to the next model, and a local model answers once
every remote model is exhausted.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./casequery.toml       Project-level config
3. ~/.config/casequery/config.toml   Global config

Example:
  casequery questions add "Who is the treating physician?"
  casequery process uploads/YB12345_1.html -Q 1 -Q 2
  casequery bulk input --all-questions
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process a single standalone document (the source is moved when done)
    Process {
        /// Document to process (.htm, .html or .txt)
        file: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Process every subfolder of ROOT as one all-or-nothing group
    Bulk {
        /// Input root (defaults to paths.input_dir)
        root: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Manage the question catalogs
    Questions {
        #[command(subcommand)]
        action: QuestionAction,

        /// Catalog to operate on
        #[arg(short, long, value_enum, global = true, default_value = "gemini")]
        provider: ProviderArg,
    },

    /// View or edit the remote model sequence
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Check network reachability
    Probe,

    /// Show configuration sources and validation issues
    Config,
}

/// Options shared by `process` and `bulk`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Provider family (selects the question catalog and backend)
    #[arg(short, long, value_enum, default_value = "gemini")]
    pub provider: ProviderArg,

    /// Question id to ask (repeatable; order is kept)
    #[arg(short = 'Q', long = "question", value_name = "ID")]
    pub questions: Vec<u32>,

    /// Ask every question in the catalog
    #[arg(long, conflicts_with = "questions")]
    pub all_questions: bool,

    /// Override the configured sampling temperature
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,
}

#[derive(Subcommand, Debug)]
pub enum QuestionAction {
    /// List the catalog
    List,
    /// Append a question
    Add { text: String },
    /// Replace the text of a question
    Edit { id: u32, text: String },
    /// Delete a question (the rest are renumbered)
    Delete { id: u32 },
}

#[derive(Subcommand, Debug)]
pub enum ModelAction {
    /// Print the current sequence
    Show,
    /// Replace the sequence (tried in the given order)
    Set {
        #[arg(required = true, value_name = "MODEL")]
        models: Vec<String>,
    },
    /// Restore the configured default sequence
    Reset,
}
