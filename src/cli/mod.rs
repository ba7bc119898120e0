pub mod args;
pub mod commands;

pub use args::PassArgs;
use crate::core::PassKind;
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
PASSES:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "kgnorm")]
#[command(version = crate::VERSION)]
#[command(about = "Normalize knowledge-graph JSON documents in place")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Each pass rewrites every *_KG.json file of its directory and leaves unchanged files untouched. Settings come from <PATH>/kgnorm.toml and KGNORM_* environment variables."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Flatten endpoints, examples and agents",
        long_about = "Flatten moves endpoints to endpoint_<name> keys, rewrites example sections to snake_case records, and flattens nested agent fields.",
        after_help = "Example:\n    kgnorm flatten ./workspace"
    )]
    Flatten(PassArgs),
    #[command(
        about = "Merge the security policy into each document",
        long_about = "Secure adds the default security section and stamps security endpoints, scripts, metadata, monitoring and validation settings derived from the document domain.",
        after_help = "Example:\n    kgnorm secure --dir safeAI-plugin/src/main/resources"
    )]
    Secure(PassArgs),
    #[command(
        about = "Encode object approvalCriteria as JSON strings",
        long_about = "Normalize-criteria rewrites every object-valued approvalCriteria, at any depth, as its compact JSON string.",
        after_help = "Example:\n    kgnorm normalize-criteria ./workspace --config kgnorm.toml"
    )]
    NormalizeCriteria(PassArgs),
}

impl Command {
    pub fn pass(&self) -> PassKind {
        match self {
            Command::Flatten(_) => PassKind::Flatten,
            Command::Secure(_) => PassKind::SecurityPolicy,
            Command::NormalizeCriteria(_) => PassKind::CriteriaNormalize,
        }
    }

    pub fn pass_args(&self) -> &PassArgs {
        match self {
            Command::Flatten(args) | Command::Secure(args) | Command::NormalizeCriteria(args) => {
                args
            }
        }
    }
}

pub fn run(args: Args) -> crate::Result<()> {
    commands::run_pass(args.command.pass(), args.command.pass_args())?;
    Ok(())
}
