use clap::Parser;
use inkshelf::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkshelf=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, name, empty }) => {
            inkshelf::cli::init::run(path, name, empty).await?;
        }
        Some(Commands::Serve { host, port }) => {
            inkshelf::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Migrate { command }) => {
            inkshelf::cli::migrate::run(&cli.config, command).await?;
        }
        Some(Commands::Import { file }) => {
            inkshelf::cli::import::run(&cli.config, &file).await?;
        }
        Some(Commands::Browse(args)) => {
            inkshelf::cli::browse::run(&cli.config, args).await?;
        }
        Some(Commands::Read {
            series,
            chapter,
            page,
            user,
        }) => {
            inkshelf::cli::read::run(&cli.config, &series, &chapter, page, user).await?;
        }
        Some(Commands::User { command }) => {
            inkshelf::cli::user::run(&cli.config, command).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
