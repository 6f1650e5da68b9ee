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

//! Chess rules and algebraic notation.
//!
//! Keeps the board of a game, generates candidate moves per piece, resolves
//! short algebraic notation to the unique move it stands for and logs
//! moves in long algebraic notation.
//!
//! # Examples
//!
//! Play moves in short notation:
//!
//! ```
//! use algebraic::{Color, Game};
//!
//! let mut game = Game::new();
//! game.attempt_move("e4")?;
//! game.attempt_move("e5")?;
//! let entry = game.attempt_move("Nf3")?;
//! assert_eq!(entry.to_string(), "Ng1f3");
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<_, algebraic::PlayError>(())
//! ```
//!
//! Rejected moves leave the game unchanged:
//!
//! ```
//! use algebraic::{Game, IllegalMove, PlayError};
//!
//! let mut game = Game::new();
//! assert_eq!(
//!     game.attempt_move("Ke2"),
//!     Err(PlayError::Illegal(IllegalMove::NoMatch))
//! );
//! assert!(game.log().is_empty());
//! ```
//!
//! Convert a whole game at once:
//!
//! ```
//! let log = algebraic::convert_notation(["d4", "d5", "Nc3", "Nc6"])?;
//! assert_eq!(log, ["d2d4", "d7d5", "Nb1c3", "Nb8c6"]);
//! # Ok::<_, algebraic::ConvertError>(())
//! ```
//!
//! Also supports [short](san), [long](lan) and [UCI](uci) notation for
//! moves.
//!
//! Check and checkmate are not detected. Kings may move into check and the
//! suffixes `+` and `#` are logged as given.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations, and enables the
//!   [`transcript`] module.
//! * `arbitrary`: Implements `arbitrary::Arbitrary` for squares and short
//!   notation, for fuzzing.
//! * `cli`: Builds the `algebraic` terminal binary.

#![doc(html_root_url = "https://docs.rs/algebraic/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod util;
mod castling_side;
mod color;
mod game;
mod m;
mod piece;
mod role;
mod square;

pub mod board;
pub mod lan;
pub mod movegen;
pub mod san;
pub mod uci;

#[cfg(feature = "serde")]
pub mod transcript;

pub use board::{Board, BoardFenError, Rows};
pub use castling_side::{CastlingRights, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use game::{convert_notation, ConvertError, Game, IllegalMove, LoggedMove, PlayError};
pub use m::{Move, MoveList};
pub use piece::{Glyphs, Piece, PieceId};
pub use role::Role;
pub use square::{File, ParseSquareError, Rank, Square};
