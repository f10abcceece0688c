use clap::{Parser, Subcommand};
use datavault::config::AppConfig;
use datavault::{server, LinkPreviewer, PreviewRequest};
use log::error;

#[derive(Parser)]
#[command(name = "datavault", version, about = "Link preview extraction for DataVault")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a single URL and print the preview envelope as JSON
    Fetch {
        url: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Run the HTTP server
    Serve {
        /// Address to listen on, overrides the configured one
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    match cli.command {
        Command::Fetch { url, pretty } => {
            let previewer = LinkPreviewer::from_config(&config.preview)?;
            let request = PreviewRequest { url: Some(url) };
            let (status, response) = server::preview_response(&previewer, request).await;

            let output = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{}", output);

            if !status.is_success() {
                error!("Preview failed with status {}", status);
                std::process::exit(1);
            }
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            server::serve(&config).await?;
        }
    }

    Ok(())
}
