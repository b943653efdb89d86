// SPDX-License-Identifier: GPL-3.0

use clap::Parser;
use word_shorts::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<(), anywho::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    cli::run(cli).await
}
