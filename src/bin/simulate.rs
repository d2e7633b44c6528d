use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use rand::Rng;
use rayon::prelude::*;

use fasttrack::{
    audit, load_config_from_json, rng_for_game, Game, GameConfig, JsonLinesSink, Phase,
};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Play seeded FastTrack games with random legal moves")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Players per game (2..=6); overrides the config file
    #[arg(long)]
    players: Option<usize>,

    /// Base seed for deck shuffles and move choice; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a game after this many turns and count it as unfinished
    #[arg(long, default_value_t = 2000)]
    max_turns: u32,

    /// Match configuration JSON ({"player_count": 4, "seed": 12648430})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON-lines event log of game 0 to this path
    #[arg(long)]
    events: Option<PathBuf>,

    /// Run the consistency audit after every move and fail on any violation
    #[arg(long, default_value_t = false)]
    audit: bool,
}

#[derive(Debug, Clone, Copy)]
struct Outcome {
    winner: Option<usize>,
    turns: u32,
}

fn play_one(
    config: &GameConfig,
    game_id: u64,
    max_turns: u32,
    events: Option<&PathBuf>,
    check: bool,
) -> Result<Outcome, String> {
    let seeded = GameConfig::new(config.player_count, config.seed.wrapping_add(game_id));
    let mut game = Game::new(&seeded).map_err(|e| format!("game {game_id}: {e}"))?;
    if let Some(path) = events {
        let file = File::create(path)
            .map_err(|e| format!("failed to create {}: {e}", path.display()))?;
        game.subscribe(Box::new(JsonLinesSink::new(BufWriter::new(file))));
    }
    let mut rng = rng_for_game(config.seed, game_id);

    game.start().map_err(|e| format!("game {game_id}: {e}"))?;
    loop {
        match game.phase() {
            Phase::GameOver => break,
            Phase::Draw => {
                if game.state().turn_count >= max_turns {
                    debug!("game {game_id} stopped after {max_turns} turns");
                    break;
                }
                game.draw().map_err(|e| format!("game {game_id}: {e}"))?;
            }
            Phase::Play => {
                let n = game.legal_moves().len();
                if n == 0 {
                    game.skip().map_err(|e| format!("game {game_id}: {e}"))?;
                    continue;
                }
                let pick = rng.gen_range(0..n);
                game.choose_move_index(pick)
                    .map_err(|e| format!("game {game_id}: {e}"))?;
                if check {
                    let violations = audit(game.board(), game.state());
                    if let Some(v) = violations.first() {
                        return Err(format!(
                            "game {game_id} turn {}: {v} ({} violations)",
                            game.state().turn_count,
                            violations.len()
                        ));
                    }
                }
            }
            other => return Err(format!("game {game_id}: stuck in phase {other:?}")),
        }
    }
    Ok(Outcome {
        winner: game.winner(),
        turns: game.state().turn_count,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config_from_json(path)?,
        None => GameConfig::default(),
    };
    if let Some(p) = args.players {
        config.player_count = p;
    }
    if let Some(s) = args.seed {
        config.seed = s;
    }
    config.validate()?;

    println!(
        "[simulate] Playing {} games: players={} seed={:#x} max_turns={}",
        args.games, config.player_count, config.seed, args.max_turns
    );

    let pb = ProgressBar::new(args.games);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] games {bar:40.cyan/blue} {pos}/{len}")?
            .progress_chars("=>-"),
    );

    let results: Vec<Result<Outcome, String>> = (0..args.games)
        .into_par_iter()
        .map(|game_id| {
            let events = if game_id == 0 { args.events.as_ref() } else { None };
            let out = play_one(&config, game_id, args.max_turns, events, args.audit);
            pb.inc(1);
            out
        })
        .collect();
    pb.finish_and_clear();

    let mut wins = vec![0u64; config.player_count];
    let mut unfinished = 0u64;
    let mut total_turns = 0u64;
    let mut failures = Vec::new();
    for r in results {
        match r {
            Ok(o) => {
                total_turns += u64::from(o.turns);
                match o.winner {
                    Some(w) => wins[w] += 1,
                    None => unfinished += 1,
                }
            }
            Err(e) => failures.push(e),
        }
    }

    let played = args.games - failures.len() as u64;
    println!("[simulate] Played {played} games");
    for (seat, w) in wins.iter().enumerate() {
        println!("[simulate] player {seat}: {w} wins");
    }
    println!("[simulate] Unfinished: {unfinished}");
    if played > 0 {
        println!(
            "[simulate] Average turns: {:.1}",
            total_turns as f64 / played as f64
        );
    }
    if let Some(path) = &args.events {
        println!("[simulate] Event log of game 0 written to {}", path.display());
    }

    if !failures.is_empty() {
        for f in &failures {
            warn!("{f}");
            eprintln!("[simulate] {f}");
        }
        return Err(format!("{} games failed", failures.len()).into());
    }
    Ok(())
}
