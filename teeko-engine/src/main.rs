//! Teeko AI driver.
//!
//! Plays Teeko against a human on the terminal, or pits two searches
//! against each other with --self-play.

mod agent;
mod movegen;
mod search;
mod stats;

use std::env;
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use teeko_core::{Move, Phase, Piece, Pos};

use crate::agent::Agent;

struct Options {
    /// Color the AI plays; None picks at random.
    ai_piece: Option<Piece>,
    self_play: bool,
    max_plies: u32,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  teeko [--piece b|r] [--self-play [PLIES]]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --piece <b|r>       Color the AI plays (default: random)");
    eprintln!("  --self-play [N]     Two AIs play each other, stopping after N plies (default 200)");
    eprintln!("  -h, --help          Show this help");
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options {
        ai_piece: None,
        self_play: false,
        max_plies: 200,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--piece" => {
                i += 1;
                opts.ai_piece = match args.get(i).map(|s| s.as_str()) {
                    Some("b") => Some(Piece::Black),
                    Some("r") => Some(Piece::Red),
                    _ => {
                        eprintln!("--piece takes b or r");
                        print_usage();
                        process::exit(1);
                    }
                };
            }
            "--self-play" => {
                opts.self_play = true;
                // Optional ply cap
                if let Some(n) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    opts.max_plies = n;
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    opts
}

/// Parse cell notation like "C2": column letter A-E, row digit 0-4.
fn parse_cell(s: &str) -> Option<Pos> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_ch = chars.next()?;
    let row_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let col = match col_ch.to_ascii_uppercase() {
        ch @ 'A'..='E' => ch as u8 - b'A',
        _ => return None,
    };
    let row = match row_ch {
        ch @ '0'..='4' => ch as u8 - b'0',
        _ => return None,
    };
    Some(Pos::from_row_col(row, col))
}

/// Parse a move in the input format for the current phase: a bare
/// cell while dropping, "FROM->TO" while moving.
fn parse_move(s: &str, phase: Phase) -> Option<Move> {
    let s = s.trim();
    match phase {
        Phase::Drop => Some(Move::Drop { to: parse_cell(s)? }),
        Phase::Move => {
            let parts: Vec<&str> = s.split("->").collect();
            if parts.len() != 2 {
                return None;
            }
            Some(Move::Slide {
                from: parse_cell(parts[0])?,
                to: parse_cell(parts[1])?,
            })
        }
    }
}

fn run_interactive(ai_piece: Option<Piece>, running: Arc<AtomicBool>) {
    let mut agent = match ai_piece {
        Some(piece) => Agent::with_piece(piece),
        None => Agent::new(),
    };

    println!(
        "AI plays '{}', you play '{}'. Black moves first.",
        agent.my_piece().as_char(),
        agent.opponent_piece().as_char()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    let mut to_move = Piece::Black;

    loop {
        if !running.load(Ordering::SeqCst) {
            println!("\nGame abandoned.");
            return;
        }

        println!("\n{}", agent.board());
        if let Some(winner) = agent.winner() {
            if winner == agent.my_piece() {
                println!("AI wins!");
            } else {
                println!("Player wins!");
            }
            return;
        }

        if to_move == agent.my_piece() {
            let start = Instant::now();
            let Some(decision) = agent.decide_move() else {
                println!("AI has no legal move.");
                return;
            };
            println!(
                "AI plays {} in {:.2}s ({})",
                decision.mov,
                start.elapsed().as_secs_f64(),
                decision.stats.summary()
            );
        } else {
            // Re-prompt until a legal move is applied.
            loop {
                if !running.load(Ordering::SeqCst) {
                    println!("\nGame abandoned.");
                    return;
                }

                let prompt = match agent.phase() {
                    Phase::Drop => "Drop (e.g. C2): ",
                    Phase::Move => "Move (e.g. C2->B1): ",
                };
                print!("{}", prompt);
                let _ = io::stdout().flush();

                line.clear();
                match stdin.read_line(&mut line) {
                    Ok(0) => {
                        println!("\nGame abandoned.");
                        return;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        eprintln!("Input error: {}", e);
                        return;
                    }
                }

                let Some(mov) = parse_move(&line, agent.phase()) else {
                    println!("Could not read that, use the format shown in the prompt.");
                    continue;
                };
                match agent.apply_opponent_move(mov) {
                    Ok(()) => break,
                    Err(e) => println!("{}", e),
                }
            }
        }

        to_move = to_move.opponent();
    }
}

fn run_self_play(max_plies: u32, running: Arc<AtomicBool>) {
    let mut black = Agent::with_piece(Piece::Black);
    let mut red = Agent::with_piece(Piece::Red);
    let mut to_move = Piece::Black;
    let mut plies = 0u32;
    let mut total_nodes = 0u64;
    let start = Instant::now();

    while plies < max_plies {
        if !running.load(Ordering::SeqCst) {
            println!("\nInterrupted.");
            break;
        }
        if black.winner().is_some() {
            break;
        }

        let decision = match to_move {
            Piece::Black => black.decide_move(),
            Piece::Red => red.decide_move(),
        };
        let Some(decision) = decision else {
            println!("'{}' has no legal move.", to_move.as_char());
            break;
        };
        match to_move {
            Piece::Black => red.apply_opponent_move(decision.mov),
            Piece::Red => black.apply_opponent_move(decision.mov),
        }
        .expect("agents out of sync");

        plies += 1;
        total_nodes += decision.stats.total_nodes();
        println!(
            "[{:3}] '{}' plays {} (value {})",
            plies,
            to_move.as_char(),
            decision.mov,
            decision.value
        );
        println!("{}\n", black.board());

        to_move = to_move.opponent();
    }

    println!("==================");
    println!("Self-play complete");
    println!("==================");
    match black.winner() {
        Some(winner) => println!("Result: '{}' wins", winner.as_char()),
        None => println!("Result: undecided"),
    }
    println!("Plies: {}", plies);
    println!("Pieces placed: {}", black.piece_count());
    println!("Total nodes: {}", total_nodes);
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    println!("Teeko AI");
    println!("========");

    // SIGINT flips the flag; the game loops check it at each turn.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\nInterrupt received.");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    if opts.self_play {
        run_self_play(opts.max_plies, running);
    } else {
        run_interactive(opts.ai_piece, running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("A0"), Some(Pos::from_row_col(0, 0)));
        assert_eq!(parse_cell("C2"), Some(Pos::from_row_col(2, 2)));
        assert_eq!(parse_cell("E4"), Some(Pos::from_row_col(4, 4)));
        assert_eq!(parse_cell("b3"), Some(Pos::from_row_col(3, 1)));
        assert_eq!(parse_cell(" d1 "), Some(Pos::from_row_col(1, 3)));
    }

    #[test]
    fn test_parse_cell_rejects_bad_input() {
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("C"), None);
        assert_eq!(parse_cell("C5"), None);
        assert_eq!(parse_cell("F2"), None);
        assert_eq!(parse_cell("C22"), None);
        assert_eq!(parse_cell("22"), None);
    }

    #[test]
    fn test_parse_move_by_phase() {
        assert_eq!(
            parse_move("C2", Phase::Drop),
            Some(Move::Drop {
                to: Pos::from_row_col(2, 2)
            })
        );
        assert_eq!(
            parse_move("C2->B1", Phase::Move),
            Some(Move::Slide {
                from: Pos::from_row_col(2, 2),
                to: Pos::from_row_col(1, 1)
            })
        );
        assert_eq!(
            parse_move("c2 -> b1", Phase::Move),
            Some(Move::Slide {
                from: Pos::from_row_col(2, 2),
                to: Pos::from_row_col(1, 1)
            })
        );

        // Wrong shape for the phase.
        assert_eq!(parse_move("C2->B1", Phase::Drop), None);
        assert_eq!(parse_move("C2", Phase::Move), None);
    }
}
