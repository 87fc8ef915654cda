use anyhow::Result;
use clap::Parser;
use gold_desk::chart;
use gold_desk::cli::{self, Cli};
use gold_desk::commands;

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command() {
        cli::Command::Run(args) => commands::run(args).await,
        cli::Command::Chart(args) => chart::run(args),
        cli::Command::Project(args) => commands::project(args),
        cli::Command::Toto(args) => commands::toto(args),
    }
}
