use clap::Parser;
use connect_dots::config::GameConfig;
use connect_dots::fairness::sample_positional_frequencies;
use connect_dots::session::GridSizePolicy;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_BOARDS: usize = 10_000;
const START_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Report positional color bias of the board generator", long_about = None)]
struct Args {
    /// Number of boards to generate
    #[clap(short, long, default_value_t = DEFAULT_BOARDS)]
    boards: usize,

    /// Level whose grid size is sampled
    #[clap(short, long, default_value_t = 1)]
    level: u32,

    /// Seed for the sampling RNG
    #[clap(short, long, default_value_t = START_SEED)]
    seed: u64,

    /// Path to a TOML config file (palette and grid policy)
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let grid_size = config.grid.grid_size(args.level.max(1));

    info!(boards = args.boards, grid_size, seed = args.seed, "sampling boards");
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let table = sample_positional_frequencies(grid_size, &config.palette, args.boards, &mut rng);

    println!(
        "--- Positional color frequency ({} boards, {}x{}) ---",
        table.boards(),
        grid_size,
        grid_size
    );
    for color in table.colors() {
        println!(
            "\n{} (overall {:.3}):",
            color,
            table.overall_frequency(color)
        );
        for row in 0..grid_size {
            let cells: Vec<String> = (0..grid_size)
                .map(|col| format!("{:.3}", table.frequency(row, col, color)))
                .collect();
            println!("  {}", cells.join(" "));
        }
    }

    println!(
        "\nMax relative deviation from overall share: {:.4}",
        table.max_relative_deviation()
    );
    Ok(())
}
