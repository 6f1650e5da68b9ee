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

//! Write long algebraic notation.
//!
//! Long notation always names the origin square: `Ng1f3`, `e5xf4`,
//! `Bb4xc3+`, `h7h8=Q`. Castles are written like in short notation.
//! Any long notation is also valid short notation, so a logged game can be
//! replayed from it.
//!
//! # Examples
//!
//! ```
//! use algebraic::{lan::Lan, san::Suffix, Move, Role, Square};
//!
//! let m = Move::Normal {
//!     role: Role::Bishop,
//!     from: Square::B4,
//!     capture: Some(Role::Knight),
//!     to: Square::C3,
//!     promotion: None,
//! };
//!
//! let lan = Lan::new(m, Some(Suffix::Check));
//! assert_eq!(lan.to_string(), "Bb4xc3+");
//! ```

use core::fmt;

use crate::{san::Suffix, util::AppendAscii, CastlingSide, Move};

/// A [`Move`] in long algebraic notation, with the suffix it was entered
/// with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Lan {
    pub m: Move,
    pub suffix: Option<Suffix>,
}

impl Lan {
    pub const fn new(m: Move, suffix: Option<Suffix>) -> Lan {
        Lan { m, suffix }
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        f.reserve(9);
        match self.m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                for ch in role.letter().chars() {
                    f.append_ascii(ch)?;
                }
                from.append_to(f)?;
                if capture.is_some() {
                    f.append_ascii('x')?;
                }
                to.append_to(f)?;
                if let Some(promotion) = promotion {
                    f.append_ascii('=')?;
                    f.append_ascii(promotion.upper_char())?;
                }
            }
            Move::EnPassant { from, to } => {
                from.append_to(f)?;
                f.append_ascii('x')?;
                to.append_to(f)?;
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king < rook);
                for ch in side.notation().chars() {
                    f.append_ascii(ch)?;
                }
            }
        }
        if let Some(suffix) = self.suffix {
            f.append_ascii(suffix.char())?;
        }
        Ok(())
    }

    /// Appends the notation to `s`.
    pub fn append_to_string(&self, s: &mut String) {
        let _ = self.append_to(s);
    }
}

impl From<Move> for Lan {
    fn from(m: Move) -> Lan {
        Lan::new(m, None)
    }
}

impl fmt::Display for Lan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Lan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = arrayvec::ArrayString::<16>::new();
        self.append_to(&mut s).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, Square};

    #[test]
    fn test_render() {
        let cases = [
            (
                Move::Normal {
                    role: Role::Pawn,
                    from: Square::E2,
                    capture: None,
                    to: Square::E4,
                    promotion: None,
                },
                None,
                "e2e4",
            ),
            (
                Move::Normal {
                    role: Role::Knight,
                    from: Square::G1,
                    capture: None,
                    to: Square::F3,
                    promotion: None,
                },
                None,
                "Ng1f3",
            ),
            (
                Move::Normal {
                    role: Role::Pawn,
                    from: Square::G2,
                    capture: Some(Role::Rook),
                    to: Square::H1,
                    promotion: Some(Role::Knight),
                },
                None,
                "g2xh1=N",
            ),
            (
                Move::Normal {
                    role: Role::Queen,
                    from: Square::F2,
                    capture: None,
                    to: Square::F1,
                    promotion: None,
                },
                Some(Suffix::Checkmate),
                "Qf2f1#",
            ),
            (
                Move::EnPassant {
                    from: Square::E5,
                    to: Square::D6,
                },
                None,
                "e5xd6",
            ),
            (
                Move::Castle {
                    king: Square::E8,
                    rook: Square::A8,
                },
                Some(Suffix::Check),
                "O-O-O+",
            ),
        ];

        for (m, suffix, expected) in cases {
            let lan = Lan::new(m, suffix);
            assert_eq!(lan.to_string(), expected);

            let mut s = String::new();
            lan.append_to_string(&mut s);
            assert_eq!(s, expected);
        }
    }

    #[test]
    fn test_lan_reads_back_as_san() {
        let m = Move::Normal {
            role: Role::Rook,
            from: Square::F3,
            capture: Some(Role::Rook),
            to: Square::F8,
            promotion: None,
        };
        let text = Lan::new(m, Some(Suffix::Check)).to_string();
        let san: crate::san::SanPlus = text.parse().expect("long notation is short notation");
        assert!(san.san.matches(&m));
        assert_eq!(san.suffix, Some(Suffix::Check));
    }
}
