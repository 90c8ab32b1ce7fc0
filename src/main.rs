use anyhow::Result;
use cli::Cli;
use std::process::ExitCode;

mod cli;
mod config;
mod config_wizard;
mod highlight;
mod markdown;
mod markup;
mod sinks {
    mod html;
    pub use html::{HtmlSink, HtmlSinkBuilder};
}
mod site;
mod source;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match cli.command {
        cli::Commands::Init => config_wizard::run(),
        cli::Commands::Build(args) => site::build(args),
    }
}
