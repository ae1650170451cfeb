use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved configuration to stdout
    Config {
        /// Write a default quarry.toml instead of printing
        #[arg(required = false, long)]
        init: bool,
    },

    /// Create an authorization policy for a model
    #[command(arg_required_else_help = true)]
    #[clap(name = "generate-policy")]
    GeneratePolicy {
        /// Model name, e.g. `User` or `blog_post`
        model: String,

        /// Override the configured output directory
        #[arg(required = false, long, value_hint = ValueHint::DirPath)]
        path: Option<String>,
    },

    /// Create a repository for a model
    #[command(arg_required_else_help = true)]
    #[clap(name = "generate-repository")]
    GenerateRepository {
        /// Model name, e.g. `User` or `blog_post`
        model: String,

        /// Override the configured output directory
        #[arg(required = false, long, value_hint = ValueHint::DirPath)]
        path: Option<String>,
    },
}
