use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use snake_tui::app::App;
use snake_tui::game::GameConfig;
use snake_tui::storage::JsonFileStore;

#[derive(Parser)]
#[command(name = "snake-tui")]
#[command(version, about = "Grid snake for the terminal, with a persistent high score")]
struct Cli {
    /// Side length of the square grid, in cells
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// File the high score is kept in between runs
    #[arg(long, default_value = "snake-scores.json")]
    scores: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_size: cli.grid_size,
        tick_ms: cli.tick_ms,
    };
    let store = JsonFileStore::open(cli.scores)?;

    let mut app = App::new(config, store);
    app.run().await
}
