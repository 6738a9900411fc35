use clap::{ArgAction, Parser};
use color_eyre::eyre::{eyre, Result};
use log::{info, LevelFilter};
use pocket_cube::{
    cube::parse_moves,
    render,
    solver::{Method, DEFAULT_MAX_DEPTH},
    Cube, Move,
};
use rand::{rngs::StdRng, thread_rng, SeedableRng};

/// Solves a scrambled 2x2 cube with quarter turns about the X, Y and Z axes
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The 24 facelet colors (W, Y, R, B, G, O), four per face. A random
    /// scramble is used when omitted
    state: Option<String>,
    /// Scramble the solved cube with these moves instead, e.g. "CW_X CCW_Y"
    #[arg(long, conflicts_with = "state")]
    moves: Option<String>,
    /// Longest random scramble
    #[arg(long, default_value_t = 20)]
    scramble_length: usize,
    /// Seed for a reproducible random scramble
    #[arg(long)]
    seed: Option<u64>,
    /// Search strategy
    #[arg(long, value_enum, default_value_t = Method::Iddfs)]
    method: Method,
    /// Longest solution to search for
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Print plain letters instead of colored stickers
    #[arg(long)]
    no_color: bool,
    /// Only print the move list, not the cube after every step
    #[arg(long)]
    no_steps: bool,
    /// Log verbosity. Can be given up to three times
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn initial_cube(&self) -> Result<Cube> {
        if let Some(state) = &self.state {
            return Ok(state.parse()?);
        }
        if let Some(moves) = &self.moves {
            let moves = parse_moves(moves)?;
            println!("Scrambling with: {}\n", join(&moves));
            return Ok(Cube::solved().apply_all(&moves));
        }

        let (cube, moves) = match self.seed {
            Some(seed) => {
                Cube::solved().scramble(&mut StdRng::seed_from_u64(seed), self.scramble_length)
            }
            None => Cube::solved().scramble(&mut thread_rng(), self.scramble_length),
        };
        println!("Scrambling with: {}\n", join(&moves));
        Ok(cube)
    }

    fn show(&self, cube: &Cube) {
        if self.no_color {
            println!("{}", cube);
        } else {
            println!("{}", render::colored_net(cube));
        }
    }
}

fn join(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::name)
        .collect::<Vec<_>>()
        .join(" --> ")
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let mut cube = cli.initial_cube()?;
    println!("Solving the following cube:\n");
    cli.show(&cube);

    info!("Searching with {} up to {} moves", cli.method, cli.max_depth);
    let moves = cli
        .method
        .solve(&cube, cli.max_depth)
        .ok_or_else(|| eyre!("No solution found within {} moves", cli.max_depth))?;

    if moves.is_empty() {
        println!("Already solved!");
        return Ok(());
    }

    println!("Found a {} move solution: {}\n", moves.len(), join(&moves));
    if cli.no_steps {
        return Ok(());
    }
    for (i, &m) in moves.iter().enumerate() {
        cube = cube.apply(m);
        println!("Step {}: {}", i + 1, m);
        cli.show(&cube);
    }

    Ok(())
}
