pub mod browse;
pub mod import;
pub mod init;
pub mod migrate;
pub mod read;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkshelf")]
#[command(version)]
#[command(about = "Catalog, library and chapter reader for serialized comics", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "inkshelf.toml", env = "INKSHELF_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config, create the database and seed the demo catalog
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
        /// Skip the bundled demo catalog
        #[arg(long)]
        empty: bool,
    },
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    Migrate {
        #[command(subcommand)]
        command: Option<MigrateCommand>,
    },
    /// Insert or replace catalog records from a JSON snapshot
    Import { file: PathBuf },
    /// Filter and sort the catalog and print it as a table
    Browse(BrowseArgs),
    /// Step through a chapter from the terminal
    Read {
        series: String,
        chapter: String,
        #[arg(long, default_value = "1")]
        page: usize,
        /// Record progress in this user's history (by email)
        #[arg(long)]
        user: Option<String>,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
}

#[derive(Subcommand)]
pub enum MigrateCommand {
    /// Show applied and pending migrations
    Status,
}

#[derive(clap::Args, Default)]
pub struct BrowseArgs {
    #[arg(short, long)]
    pub query: Option<String>,
    #[arg(long = "type")]
    pub series_type: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Comma separated; every genre must match
    #[arg(long)]
    pub genres: Option<String>,
    #[arg(long)]
    pub min_chapters: Option<String>,
    #[arg(long)]
    pub min_year: Option<String>,
    #[arg(short, long, default_value = "popular")]
    pub sort: String,
    #[arg(long, default_value = "1")]
    pub page: usize,
    #[arg(long)]
    pub per_page: Option<usize>,
}

#[derive(Subcommand)]
pub enum UserCommand {
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        admin: bool,
    },
    List,
    Remove {
        email: String,
    },
    /// Issue a session token for API access
    Token {
        email: String,
        /// Overrides session.lifetime, e.g. 12h or 2w
        #[arg(long)]
        lifetime: Option<String>,
    },
    /// Grant or revoke admin access
    Admin {
        email: String,
        #[arg(long)]
        revoke: bool,
    },
}
