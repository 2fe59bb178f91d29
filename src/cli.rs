use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// bcr-openssl - publish OpenSSL's generated sources to the Bazel Central Registry
#[derive(Parser, Debug)]
#[command(name = "bcr-openssl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./bcr-openssl.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and under which tag a release tree is published
#[derive(Args, Debug, Clone)]
pub struct PublishArgs {
    /// Root of the Bazel Central Registry checkout
    #[arg(long)]
    pub bcr_dir: PathBuf,

    /// Release tag, e.g. 3.3.1.bcr.1
    #[arg(long)]
    pub tag: String,

    /// Where to write the overlay archive
    #[arg(long)]
    pub overlay_tar_path: PathBuf,

    /// Published archive URL; `{tag}` is substituted
    #[arg(long)]
    pub release_url_template: Option<String>,

    /// buildifier binary used to check the constants files
    #[arg(long)]
    pub buildifier: Option<String>,

    /// Directory holding the BUILD, presubmit and helper templates
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every platform of this host and publish the release in one go
    Generate {
        /// Host selection: unix, windows or all
        #[arg(long)]
        os: String,

        #[command(flatten)]
        publish: PublishArgs,

        /// Scratch directory for the download and build arenas
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// OpenSSL release to build (overrides config)
        #[arg(long)]
        openssl_version: Option<String>,
    },

    /// Build this host's platforms and save the harvest as a JSON bundle
    Harvest {
        /// Host selection: unix, windows or all
        #[arg(long)]
        os: String,

        /// Bundle file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Scratch directory for the download and build arenas
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// OpenSSL release to build (overrides config)
        #[arg(long)]
        openssl_version: Option<String>,
    },

    /// Merge harvest bundles from several hosts and publish the release
    Combine {
        /// Harvest bundles to merge
        #[arg(required = true)]
        bundles: Vec<PathBuf>,

        /// Host selection used for archive conventions
        #[arg(long, default_value = "all")]
        os: String,

        #[command(flatten)]
        publish: PublishArgs,
    },

    /// Replace files identical to a previous release tree with links
    Dedupe {
        /// Previous release tree (never modified)
        previous: PathBuf,

        /// Release tree to deduplicate
        current: PathBuf,
    },

    /// Print the subresource-integrity fingerprint of a file
    Integrity {
        file: PathBuf,

        /// Digest algorithm: sha256, sha384 or sha512
        #[arg(long, default_value = "sha256")]
        algorithm: String,
    },

    /// List the platforms built for a host selection
    Platforms {
        /// Host selection: unix, windows or all
        #[arg(long, default_value = "all")]
        os: String,
    },

    /// Print the tag released before the given one (nothing for the first)
    PreviousTag { tag: String },
}
