//! oxo CLI - play tic-tac-toe on the terminal or run AI-vs-AI batches

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use oxo::{Difficulty, Engine, GameOutcome, GameSnapshot, Mode, Player, ScoreBoard};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe with a selectable AI opponent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on the terminal
    Play(PlayArgs),

    /// Run AI-vs-AI games and report the score tally
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Game mode: pvp or ai
    #[arg(long, default_value = "ai")]
    mode: Mode,

    /// AI difficulty: easy, medium, or hard
    #[arg(long, short = 'd', default_value = "hard")]
    difficulty: Difficulty,

    /// Random seed for reproducible AI play
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1000)]
    games: usize,

    /// Difficulty playing X
    #[arg(long, default_value = "medium")]
    x: Difficulty,

    /// Difficulty playing O
    #[arg(long, default_value = "hard")]
    o: Difficulty,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the tally as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args),
        Commands::Simulate(args) => simulate(args),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(args.mode, args.difficulty, seed),
        None => Engine::new(args.mode, args.difficulty),
    };

    if args.mode == Mode::PlayerVsAi {
        println!("You are X against the {} AI. O is the machine.", args.difficulty);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", render_board(&engine.snapshot()));

        if engine.outcome().is_terminal() {
            match engine.outcome() {
                GameOutcome::Win(player) => println!("Player {player} wins!"),
                GameOutcome::Draw => println!("It's a draw!"),
                GameOutcome::InProgress => unreachable!(),
            }
            println!("Score - {}", engine.scores());

            if !prompt_yes_no(&mut lines, "Play again? (y/n): ")? {
                break;
            }
            engine.reset_board();
            continue;
        }

        print!("Player {} move (1-9, q to quit): ", engine.to_move());
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read input")?;
        let input = line.trim();

        if input.eq_ignore_ascii_case("q") {
            break;
        }

        let Ok(cell) = input.parse::<usize>() else {
            println!("Enter a number from 1 to 9.");
            continue;
        };
        if !(1..=9).contains(&cell) {
            println!("Enter a number from 1 to 9.");
            continue;
        }

        // Occupied or out-of-range cells are ignored, not fatal
        if let Err(e) = engine.apply_human_move(cell - 1) {
            println!("Ignored: {e}");
            continue;
        }

        if engine.ai_move_pending() {
            let pos = engine.play_ai_move()?;
            println!("AI plays {}", pos + 1);
        }
    }

    Ok(())
}

/// Render the board with position hints for empty cells
fn render_board(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    for row in 0..3 {
        for col in 0..3 {
            let pos = row * 3 + col;
            let c = match snapshot.board.get(pos).player() {
                Some(player) => player.to_string(),
                None => (pos + 1).to_string(),
            };
            out.push_str(&c);
            if col < 2 {
                out.push('|');
            }
        }
        if row < 2 {
            out.push_str("\n-+-+-\n");
        }
    }
    out
}

fn prompt_yes_no(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;

    match lines.next() {
        Some(line) => {
            let line = line.context("failed to read input")?;
            Ok(line.trim().eq_ignore_ascii_case("y"))
        }
        None => Ok(false),
    }
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    games: usize,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    scores: ScoreBoard,
}

fn simulate(args: SimulateArgs) -> Result<()> {
    if args.games == 0 {
        bail!("--games must be at least 1");
    }

    // Both sides are driven externally, so the engine runs in pvp mode and
    // the selectors share one seeded RNG
    let mut engine = Engine::new(Mode::PlayerVsPlayer, args.o);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let pb = progress_bar(args.games as u64);

    for _ in 0..args.games {
        while !engine.outcome().is_terminal() {
            let difficulty = match engine.to_move() {
                Player::X => args.x,
                Player::O => args.o,
            };
            let board = engine.board();
            let pos = difficulty.select_move(&board, engine.to_move(), &mut rng)?;
            engine.apply_human_move(pos)?;
        }
        engine.reset_board();
        pb.inc(1);
    }
    pb.finish_and_clear();

    let summary = SimulationSummary {
        games: args.games,
        x_difficulty: args.x,
        o_difficulty: args.o,
        scores: engine.scores(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} games, X={} vs O={}",
            summary.games, summary.x_difficulty, summary.o_difficulty
        );
        println!("Score - {}", summary.scores);
    }

    Ok(())
}

fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}
