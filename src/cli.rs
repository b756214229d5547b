use clap::{Args, Parser, Subcommand};

use crate::fetch::DEFAULT_ENDPOINT;
use crate::render::Theme;

#[derive(Parser, Debug)]
#[command(
    name = "arsearch",
    version,
    about = "Search ars-tagged Arweave transactions and list unique destinations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Search(SearchArgs),
    Interactive(InteractiveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Overall request timeout; unset uses the transport default.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[arg(long)]
    pub query: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub endpoint: EndpointArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}
