//! bcr-openssl CLI - OpenSSL release automation for the Bazel Central Registry
//!
//! Usage: bcr-openssl <COMMAND>
//!
//! Commands:
//!   generate      Build this host's platforms and publish a release
//!   harvest       Build this host's platforms into a JSON bundle
//!   combine       Publish a release from several hosts' bundles
//!   dedupe        Link files identical to a previous release tree
//!   integrity     Print a file's integrity fingerprint
//!   platforms     List the platforms of a host selection
//!   previous-tag  Print the tag released before another

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let load = || CommandContext::load(cli.config.as_deref(), cli.json, cli.verbose);

    match cli.command {
        Commands::Generate {
            os,
            publish,
            work_dir,
            openssl_version,
        } => commands::generate::cmd_generate(load()?, &os, &publish, work_dir, openssl_version),
        Commands::Harvest {
            os,
            output,
            work_dir,
            openssl_version,
        } => commands::harvest::cmd_harvest(&load()?, &os, &output, work_dir, openssl_version),
        Commands::Combine {
            bundles,
            os,
            publish,
        } => commands::combine::cmd_combine(load()?, &bundles, &os, &publish),
        Commands::Dedupe { previous, current } => {
            commands::dedupe::cmd_dedupe(&load()?, &previous, &current)
        }
        Commands::Integrity { file, algorithm } => {
            commands::integrity::cmd_integrity(&file, &algorithm, cli.json)
        }
        Commands::Platforms { os } => commands::platforms::cmd_platforms(&os, cli.json, cli.verbose),
        Commands::PreviousTag { tag } => commands::previous_tag::cmd_previous_tag(&tag, cli.json),
    }
}
