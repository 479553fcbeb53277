use crate::prelude::*;
use clap::Parser;

mod batch;
mod config;
mod error;
mod prelude;
mod server;
mod workspace;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Count and highlight words of a word list inside PDF documents"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "WORDLIGHT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the upload form and the highlighted documents over HTTP
    Serve(crate::server::ServeOptions),

    /// Highlight every PDF of a directory
    Batch(crate::batch::BatchOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    let default_filter = if app.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Batch(options) => crate::batch::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
