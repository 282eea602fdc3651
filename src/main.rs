use clap::{Parser, Subcommand};
use fleet::client::run_client;
use fleet::{
    init_logging, ClientConfig, Server, ServerConfig, DEFAULT_PORT, MAX_LINE_LENGTH, OUTBOX_CAPACITY,
};
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the matchmaking server.
    Server {
        #[arg(long, default_value_t = format!("0.0.0.0:{}", DEFAULT_PORT))]
        bind: String,
        #[arg(long, default_value_t = MAX_LINE_LENGTH, help = "Longest accepted command line in bytes")]
        max_line_length: usize,
        #[arg(long, default_value_t = OUTBOX_CAPACITY, help = "Replies queued per client before it is dropped")]
        outbox_capacity: usize,
    },
    /// Connect to a server and play.
    Client {
        #[arg(long, default_value_t = format!("127.0.0.1:{}", DEFAULT_PORT))]
        connect: String,
        #[arg(long, help = "Display name; prompted for when omitted")]
        name: Option<String>,
        #[arg(long, default_value_t = 3000, help = "How long each effect banner stays on screen")]
        effect_delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Server {
            bind,
            max_line_length,
            outbox_capacity,
        } => {
            let server = Server::bind(ServerConfig {
                bind,
                max_line_length,
                outbox_capacity,
            })
            .await?;
            println!("[SERVER] Fleet server listening on {}", server.local_addr()?);
            server.run().await?;
        }
        Commands::Client {
            connect,
            name,
            effect_delay_ms,
        } => {
            run_client(ClientConfig {
                connect,
                name,
                effect_delay: Duration::from_millis(effect_delay_ms),
            })
            .await?;
        }
    }
    Ok(())
}
