//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the session replay example
#[derive(Debug, Parser)]
pub struct ExampleSessionArgs {
    /// Fixture set to use for the config & catalog
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Scripted session to replay
    #[clap(short, long, default_value = "checkout")]
    pub session: String,

    /// Write the resulting store snapshot to this path
    #[clap(short, long)]
    pub out: Option<PathBuf>,
}
