//! Entente -- a line-based host loop for the adjudication engine.
//!
//! This binary reads JSON lines from stdin and writes responses to stdout.
//! Each line is either `{"sender": "...", "input": {...}}` or the literal
//! `inspect`, which dumps the state snapshot. It exists to drive the
//! engine by hand; a real host supplies its own transport.

use std::io::{self, BufRead, Write};

use serde::Deserialize;

use entente::Game;

/// One submission line: who is speaking and what they submit.
#[derive(Deserialize)]
struct Line {
    sender: String,
    input: entente::Input,
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    // Seven fixed identities for manual play.
    let game = Game::standard([
        "austria", "england", "france", "germany", "italy", "russia", "turkey",
    ]);
    run(game, io::stdin().lock(), io::stdout().lock());
}

fn run<R: BufRead, W: Write>(mut game: Game, input: R, mut out: W) {
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "inspect" {
            let _ = writeln!(out, "{}", game.inspect());
            continue;
        }
        match serde_json::from_str::<Line>(trimmed) {
            Ok(parsed) => match game.advance_input(&parsed.sender, &parsed.input) {
                Ok(()) => {
                    let _ = writeln!(out, "ok");
                }
                Err(e) => {
                    let _ = writeln!(out, "error: {e}");
                }
            },
            Err(e) => {
                let _ = writeln!(out, "error: invalid input: {e}");
            }
        }
        let _ = out.flush();
    }
}
