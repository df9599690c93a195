use clap::Parser;
use connect_dots::board::{MarkerId, Position};
use connect_dots::config::GameConfig;
use connect_dots::engine::PointerEvent;
use connect_dots::session::GameSession;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play connect-dots in the terminal", long_about = None)]
struct Args {
    /// Seed for board generation (random if omitted)
    #[clap(short, long)]
    seed: Option<u64>,

    /// Level to start at
    #[clap(short, long, default_value_t = 1)]
    level: u32,

    /// Path to a TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,
}

const HELP: &str = "\
Commands:
  d <row> <col>   press on a marker (start a drag)
  e <row> <col>   move onto a marker while dragging
  m <x> <y>       move the pointer to board coordinates
  u               release the pointer (cancel the drag)
  + / -           level up / level down
  r               reset the level
  h               show this help
  q               quit";

enum Command {
    Pointer(PointerEvent),
    LevelUp,
    LevelDown,
    Reset,
    Help,
    Quit,
}

fn parse_command(input: &str) -> Result<Command, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        ["d", row, col] => parse_marker(row, col).map(|id| Command::Pointer(PointerEvent::Down(id))),
        ["e", row, col] => parse_marker(row, col).map(|id| Command::Pointer(PointerEvent::Enter(id))),
        ["m", x, y] => match (x.parse::<f32>(), y.parse::<f32>()) {
            (Ok(x), Ok(y)) => Ok(Command::Pointer(PointerEvent::Move(Position::new(x, y)))),
            _ => Err("Invalid input: coordinates must be numbers (e.g. 'm 120 40').".into()),
        },
        ["u"] => Ok(Command::Pointer(PointerEvent::Up)),
        ["+"] => Ok(Command::LevelUp),
        ["-"] => Ok(Command::LevelDown),
        ["r"] => Ok(Command::Reset),
        ["h"] => Ok(Command::Help),
        ["q"] => Ok(Command::Quit),
        _ => Err("Invalid input format. Type 'h' for help.".into()),
    }
}

fn parse_marker(row: &str, col: &str) -> Result<MarkerId, String> {
    match (row.parse::<usize>(), col.parse::<usize>()) {
        (Ok(row), Ok(col)) => Ok(MarkerId::new(row, col)),
        _ => Err("Invalid input: row and column must be numbers (e.g. 'd 0 1').".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
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
    println!("Welcome to Connect Dots!");
    println!("{}", HELP);

    loop {
        let snapshot = session.snapshot();
        println!("---------------------");
        println!(
            "Level: {}, Grid: {}x{}, Score: {}, Connected: {} / {}",
            snapshot.level,
            snapshot.grid_size,
            snapshot.grid_size,
            snapshot.score,
            snapshot.progress.connected,
            snapshot.progress.total
        );
        println!("{}", session.board().to_string_with_highlight(snapshot.drag_start));
        if let Some(start) = snapshot.drag_start {
            println!("Dragging from {}", start);
        }
        if snapshot.complete {
            println!("🎉 Level Complete! 🎉 Type '+' for the next level or 'r' to play again.");
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match parse_command(input.trim()) {
            Ok(Command::Pointer(event)) => {
                if session.handle_pointer(event) {
                    println!("Connected! +{}", session.config().reward);
                }
            }
            Ok(Command::LevelUp) => session.level_up(),
            Ok(Command::LevelDown) => session.level_down(),
            Ok(Command::Reset) => session.reset_game(),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => {
                println!("Thanks for playing!");
                break;
            }
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
