use clap::Parser;
use connect_dots::config::GameConfig;
use connect_dots::session::GameSession;
use connect_dots::solver::{plan_connections, play_plan};
use connect_dots::utils::{board_from_str_array, board_to_str_array};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve a connect-dots level through the engine", long_about = None)]
struct Args {
    /// Level to generate
    #[clap(short, long, default_value_t = 1)]
    level: u32,

    /// Seed for board generation (random if omitted)
    #[clap(short, long)]
    seed: Option<u64>,

    /// Path to a TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Path to a board file (one row of color letters per line) to play instead of a generated board
    board_file: Option<PathBuf>,
}

fn read_board_lines(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    Ok(content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut session = GameSession::new(config)?;
    session.go_to_level(args.level);

    if let Some(path) = &args.board_file {
        let lines = read_board_lines(path)?;
        let rows: Vec<&str> = lines.iter().map(String::as_str).collect();
        let board = board_from_str_array(&rows, session.config().layout)
            .map_err(|e| format!("Invalid board format in {}: {}", path.display(), e))?;
        info!(path = %path.display(), rows = board.grid_size(), "loaded board");
        println!("Loaded board from {}:", path.display());
        for row in board_to_str_array(&board) {
            println!("  {}", row);
        }
        session.install_board(board);
    }

    println!("Level {} ({}x{}):", session.level(), session.grid_size(), session.grid_size());
    println!("{}\n", session.board());

    let plan = plan_connections(session.board());
    println!("Planned connections ({}):", plan.pairs.len());
    for (i, (start, end)) in plan.pairs.iter().enumerate() {
        println!("  Move {}: {} -> {}", i + 1, start, end);
    }
    if !plan.leftover.is_empty() {
        let leftover: Vec<String> = plan.leftover.iter().map(|id| id.to_string()).collect();
        println!("Unpairable markers: {}", leftover.join(", "));
    }

    let committed = play_plan(&mut session, &plan);
    let snapshot = session.snapshot();
    println!("\nConnections made: {}", committed);
    println!("Final score: {}", snapshot.score);
    println!(
        "Connected: {} / {}{}",
        snapshot.progress.connected,
        snapshot.progress.total,
        if snapshot.complete { " (level complete)" } else { "" }
    );
    println!("\nFinal board state:\n{}", session.board());

    Ok(())
}
