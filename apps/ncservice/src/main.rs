//! NC Service binary.

use auth::{FileSessionStorage, MemorySessionStorage, SessionStorage};
use market_store::{MemoryMarketStore, sample_marketplace};
use ncservice::config::AppConfig;
use ncservice::init_tracing;
use ncservice::shell::{Outcome, Shell};
use ncservice::state::AppState;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tokio::signal;
use tracing::info;

type Input = Lines<BufReader<Stdin>>;
type AppShell = Shell<Box<dyn SessionStorage>, MemoryMarketStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env)
    let config = AppConfig::load()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        in_memory_session = config.in_memory_session,
        session_dir = %config.session_dir.display(),
        "Starting NC Service"
    );

    let storage: Box<dyn SessionStorage> = if config.in_memory_session {
        Box::new(MemorySessionStorage::new())
    } else {
        Box::new(FileSessionStorage::new(config.session_dir.clone()))
    };
    let market = if config.seed_sample_data {
        MemoryMarketStore::with_marketplace(sample_marketplace())
    } else {
        MemoryMarketStore::new()
    };

    let mut shell = Shell::new(AppState::new(config, storage, market));
    let mut stdout = tokio::io::stdout();
    let first_screen = shell.start().await?;
    write_block(&mut stdout, &first_screen).await?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        // Ctrl+C drops the command in flight, simulated round trip included.
        let outcome = tokio::select! {
            outcome = next_outcome(&mut input, &mut shell) => outcome?,
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        };

        match outcome {
            None | Some(Outcome::Quit) => break,
            Some(Outcome::Continue(text)) if text.is_empty() => {}
            Some(Outcome::Continue(text)) => write_block(&mut stdout, &text).await?,
        }
    }

    info!("NC Service stopped");
    Ok(())
}

/// Reads and runs one line. `None` at end of input.
async fn next_outcome(input: &mut Input, shell: &mut AppShell) -> std::io::Result<Option<Outcome>> {
    match input.next_line().await? {
        Some(line) => Ok(Some(shell.execute(&line).await)),
        None => Ok(None),
    }
}

async fn write_block(out: &mut Stdout, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n\n").await?;
    out.flush().await
}
