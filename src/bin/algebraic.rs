// This file is part of the algebraic library.
// Copyright (C) 2024 The algebraic developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Terminal front end: play a game move by move, or convert a transcript.

use std::{
    error::Error,
    fs,
    io::{self, BufRead, Read, Write},
    path::PathBuf,
};

use algebraic::{transcript::Transcript, Game, Glyphs};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Play chess in algebraic notation")]
struct Opt {
    /// Draw pieces with letters instead of chess figures
    #[arg(long)]
    ascii: bool,
    /// Do not list the possible moves after a rejected move
    #[arg(long)]
    quiet_errors: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a game from short to long notation
    Convert {
        /// Whitespace separated moves, or a JSON transcript with --json.
        /// Reads stdin if missing.
        file: Option<PathBuf>,
        /// Read {"game_id": ..., "moves": [...]} and write the normalized
        /// game as JSON
        #[arg(long)]
        json: bool,
    },
}

const HELP: &str = "\
Enter moves in short algebraic notation, like e4, Nf3, exd5, O-O or e8=Q.

Commands:
  moves [--short]  print the moves so far
  list_moves       print the moves possible now
  new_game         start over
  help             print this help
  quit             leave";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    match opt.command {
        Some(Command::Convert { file, json }) => convert(file, json),
        None => repl(if opt.ascii { Glyphs::Ascii } else { Glyphs::Unicode }, opt.quiet_errors),
    }
}

fn convert(file: Option<PathBuf>, json: bool) -> Result<(), Box<dyn Error>> {
    let input = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    let transcript = if json {
        serde_json::from_str(&input)?
    } else {
        Transcript::from_moves_text(None, &input)
    };

    let normalized = transcript.normalize()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer(&mut out, &normalized)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", normalized.moves.join(" "))?;
    }
    Ok(())
}

fn print_board(game: &Game, glyphs: Glyphs, out: &mut impl Write) -> io::Result<()> {
    for (row, rank) in game.render(glyphs).zip((1..=8).rev()) {
        writeln!(out, "{rank} {row}")?;
    }
    writeln!(out, "  abcdefgh")
}

fn print_legal_moves(game: &Game, out: &mut impl Write) -> io::Result<()> {
    let sans: Vec<String> = game.legal_sans().iter().map(ToString::to_string).collect();
    writeln!(out, "possible moves: {}", sans.join(" "))
}

fn repl(glyphs: Glyphs, quiet_errors: bool) -> Result<(), Box<dyn Error>> {
    let mut game = Game::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    print_board(&game, glyphs, &mut out)?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "{} to move: ", game.turn())?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(());
        };

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "quit" => return Ok(()),
            "help" => writeln!(out, "{HELP}")?,
            "moves" => {
                let log = if words.next() == Some("--short") {
                    game.short_notation()
                } else {
                    game.long_notation()
                };
                writeln!(out, "{}", log.join(" "))?;
            }
            "list_moves" => print_legal_moves(&game, &mut out)?,
            "new_game" => {
                game.new_game();
                print_board(&game, glyphs, &mut out)?;
            }
            text => match game.attempt_move(text) {
                Ok(entry) => {
                    writeln!(out, "{entry}")?;
                    print_board(&game, glyphs, &mut out)?;
                }
                Err(err) => {
                    writeln!(out, "{text}: {err}")?;
                    if !quiet_errors {
                        print_legal_moves(&game, &mut out)?;
                    }
                }
            },
        }
    }
}
