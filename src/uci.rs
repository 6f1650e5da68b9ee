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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! Castles are written as king moves, `e1g1` or `e8c8`.
//!
//! # Examples
//!
//! ```
//! use algebraic::{uci::Uci, Game, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//! assert_eq!(uci, Uci {
//!     from: Square::G1,
//!     to: Square::F3,
//!     promotion: None,
//! });
//!
//! let moves = Game::new().legal_moves();
//! let m = uci.find_move(&moves).expect("legal");
//! assert_eq!(Uci::from(*m), uci);
//! # Ok::<_, algebraic::uci::ParseUciError>(())
//! ```

use core::{error, fmt, str::FromStr};

use crate::{util::AppendAscii, Move, Role, Square};

/// Error when parsing an invalid UCI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl error::Error for ParseUciError {}

/// A move as represented in the UCI protocol.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    /// Parses a move in UCI notation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if `uci` is not syntactically valid.
    pub fn from_ascii(uci: &[u8]) -> Result<Uci, ParseUciError> {
        let promotion = match uci.len() {
            4 => None,
            5 => Some(uci[4]),
            _ => return Err(ParseUciError),
        };

        Ok(Uci {
            from: Square::from_ascii(&uci[..2]).map_err(|_| ParseUciError)?,
            to: Square::from_ascii(&uci[2..4]).map_err(|_| ParseUciError)?,
            promotion: match promotion {
                Some(ch) => Some(
                    Role::from_char(char::from(ch))
                        .filter(|role| ch.is_ascii_lowercase() && role.is_promotion_target())
                        .ok_or(ParseUciError)?,
                ),
                None => None,
            },
        })
    }

    /// Finds the candidate move this UCI refers to.
    pub fn find_move<'a>(&self, moves: &'a [Move]) -> Option<&'a Move> {
        moves.iter().find(|m| Uci::from(**m) == *self)
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        f.reserve(5);
        self.from.append_to(f)?;
        self.to.append_to(f)?;
        if let Some(promotion) = self.promotion {
            f.append_ascii(promotion.char())?;
        }
        Ok(())
    }
}

impl From<Move> for Uci {
    fn from(m: Move) -> Uci {
        Uci {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        for uci in ["e2e4", "g1f3", "e7e8q", "a2a1n", "e1g1", "h8h1"] {
            assert_eq!(uci.parse::<Uci>().expect("valid uci").to_string(), uci);
        }
    }

    #[test]
    fn test_invalid() {
        for uci in ["", "e2", "e2e", "e2e9", "e7e8k", "e7e8Q", "e7e8p", "e2e4e5", "0000"] {
            assert_eq!(uci.parse::<Uci>(), Err(ParseUciError), "{uci:?}");
        }
    }

    #[test]
    fn test_from_move() {
        let castle = Move::Castle {
            king: Square::E8,
            rook: Square::A8,
        };
        assert_eq!(Uci::from(castle).to_string(), "e8c8");

        let promotion = Move::Normal {
            role: Role::Pawn,
            from: Square::H7,
            capture: None,
            to: Square::H8,
            promotion: Some(Role::Queen),
        };
        assert_eq!(Uci::from(promotion).to_string(), "h7h8q");
    }
}
