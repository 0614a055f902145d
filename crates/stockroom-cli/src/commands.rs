use colored::Colorize;
use stockroom_server::StockroomServer;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    tracing::debug!(?config, "resolved configuration");
    let server = StockroomServer::open(config).await?;
    let config = server.config();
    println!(
        "{} Stockroom on {} (photos: {})",
        "✓".green().bold(),
        format!("http://{}:{}", config.host, config.port).bold(),
        config.cache_dir.display().to_string().cyan(),
    );
    server.serve().await?;
    Ok(())
}

fn cmd_check_config(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    println!("{} Configuration valid", "✓".green().bold());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
