use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};

use crate::digest::algorithm::DigestAlgorithm;
use crate::registry::Registry;

#[derive(Debug, Parser)]
#[command(name = "checksum-url")]
#[command(version, about = "calculate hashes from web links")]
pub struct Cli {
    /// Verbose output (>0 with progress bars, >1 with html responses)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Exit on first error
    #[arg(short = 'e', long = "fail-early")]
    pub fail_early: bool,

    /// Root url to log in to, scan, or expand templates against
    #[arg(short, long, value_name = "URL")]
    pub root: Option<String>,

    /// Which digest algorithm to use [default: sha256]
    #[arg(short, long, value_name = "NAME")]
    pub digest: Option<String>,

    /// Use urls as unix filename templates and scan the root page, --root must also be set
    #[arg(short, long)]
    pub template: bool,

    /// Provide a username and password
    #[arg(short, long, num_args = 2, value_names = ["USERNAME", "PASSWORD"])]
    pub password: Option<Vec<String>>,

    /// Use a form for login, --root is the url of the form
    #[arg(
        short,
        long,
        num_args = 4,
        value_names = ["FORM_SELECTOR", "USERNAME_FIELD", "PASSWORD_FIELD", "SUBMIT_FIELD"]
    )]
    pub form: Option<Vec<String>>,

    /// Method to navigate to download urls [default: url]
    #[arg(short, long, value_name = "NAME")]
    pub navigator: Option<String>,

    /// Answer yes to all questions, including accepting licenses
    #[arg(short, long)]
    pub yes: bool,

    /// How results are reported [default: simple]
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Regex selecting the version from each url; must contain exactly one capture group
    #[arg(long = "version-format", value_name = "REGEX")]
    pub version_format: Option<String>,

    /// Hash the url text instead of downloading, for fast debugging
    #[arg(long)]
    pub debug: bool,

    /// Read defaults from this config file instead of the standard location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    pub urls: Vec<String>,
}

impl Cli {
    /// Parses the process arguments with the registered names listed in `--help`.
    pub fn parse_with_registry(registry: &Registry) -> Self {
        let matches = Self::command()
            .after_help(help_footer(registry))
            .get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}

fn help_footer(registry: &Registry) -> String {
    format!(
        "navigators: {}\noutputs: {}\ndigests:\n{}",
        registry.list_navigators().join(", "),
        registry.list_outputs().join(", "),
        DigestAlgorithm::formatted_list()
    )
}
