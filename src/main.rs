//! Demo driver for the Quince Chess engine.
//!
//! Two subcommands:
//!   quince_chess perft <depth> [fen...]   - node counts with timing
//!   quince_chess selfplay [plies] [book]  - engine vs engine with a move log

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Local;

use quince_chess::engines::ai_player::AiPlayer;
use quince_chess::game_state::game_state::GameState;
use quince_chess::move_generation::legal_move_checks::is_king_in_check;
use quince_chess::move_generation::legal_move_generator::generate_legal_moves;
use quince_chess::move_generation::perft::perft;
use quince_chess::utils::render_game_state::render_game_state;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let rest = args.get(1..).unwrap_or(&[]);

    let outcome = match args.first().map(String::as_str) {
        Some("perft") => run_perft(rest),
        Some("selfplay") | None => run_selfplay(rest),
        Some(other) => Err(format!("unknown command '{other}'; use perft or selfplay")),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_perft(args: &[String]) -> Result<(), String> {
    let depth: u8 = args
        .first()
        .ok_or("perft requires a depth argument")?
        .parse()
        .map_err(|_| "depth must be a small integer".to_owned())?;

    let mut game = if args.len() > 1 {
        let fen = args[1..].join(" ");
        GameState::from_fen(&fen).map_err(|err| err.to_string())?
    } else {
        GameState::new_game()
    };

    println!("{}", render_game_state(&game));

    for d in 1..=depth {
        let started = Instant::now();
        let nodes = perft(&mut game, d).map_err(|err| err.to_string())?;
        let elapsed = started.elapsed();
        println!(
            "perft({d}) = {nodes} nodes in {:.3}s",
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}

fn run_selfplay(args: &[String]) -> Result<(), String> {
    let max_plies: u32 = match args.first() {
        Some(value) => value
            .parse()
            .map_err(|_| "plies must be a small integer".to_owned())?,
        None => 40,
    };

    let mut player = match args.get(1) {
        Some(book_path) => AiPlayer::with_book_file(book_path).map_err(|err| err.to_string())?,
        None => AiPlayer::new(),
    };

    let mut game = GameState::new_game();

    for ply in 1..=max_plies {
        let legal = generate_legal_moves(&game, false).map_err(|err| err.to_string())?;
        if legal.is_empty() {
            if is_king_in_check(&game, game.side_to_move) {
                println!("checkmate after {} plies", ply - 1);
            } else {
                println!("stalemate after {} plies", ply - 1);
            }
            break;
        }
        if game.is_drawing_material() {
            println!("drawn by insufficient material after {} plies", ply - 1);
            break;
        }

        let Some(chosen) = player.choose_move(&mut game).map_err(|err| err.to_string())? else {
            break;
        };

        let side = if game.is_white_turn() { "white" } else { "black" };
        println!(
            "[{}] ply {ply:>3} {side}: {chosen}",
            Local::now().format("%H:%M:%S%.3f")
        );

        game.make_move(chosen).map_err(|err| err.to_string())?;
    }

    println!("{}", render_game_state(&game));
    println!("final position: {}", game.get_fen());

    Ok(())
}
