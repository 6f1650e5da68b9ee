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

use core::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{CastlingSide, Role, Square};

/// A candidate or applied move, independent of any notation.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using long algebraic
/// notation without a check suffix, e.g. `Ng1f3`, `e5xd6`, `b7xa8=Q`,
/// `O-O`. Short notation needs the other candidates for context, see
/// [`San::disambiguate()`](crate::san::San::disambiguate).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A normal move, e.g., `Bd3xh7`.
    Normal {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: Option<Role>,
    },
    /// An en passant capture, e.g., `e5xd6`.
    EnPassant { from: Square, to: Square },
    /// A castling move, `O-O` or `O-O-O`, given by the home squares of the
    /// king and the rook.
    Castle { king: Square, rook: Square },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(self) -> Role {
        match self {
            Move::Normal { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle { .. } => Role::King,
        }
    }

    /// Gets the origin square. For castling moves this is the king square.
    pub const fn from(self) -> Square {
        match self {
            Move::Normal { from, .. } | Move::EnPassant { from, .. } => from,
            Move::Castle { king, .. } => king,
        }
    }

    /// Gets the target square. For castling moves this is the square the
    /// king lands on.
    pub fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::EnPassant { to, .. } => to,
            Move::Castle { king, rook } => Square::from_coords(
                CastlingSide::from_king_side(king < rook).king_to_file(),
                king.rank(),
            ),
        }
    }

    /// Gets the role of the captured piece or `None`.
    pub const fn capture(self) -> Option<Role> {
        match self {
            Move::Normal { capture, .. } => capture,
            Move::EnPassant { .. } => Some(Role::Pawn),
            Move::Castle { .. } => None,
        }
    }

    /// Checks if the move is a capture.
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Checks if the move is en passant.
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Gets the castling side.
    pub fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle { king, rook } => Some(CastlingSide::from_king_side(king < rook)),
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// Gets the promotion role.
    pub const fn promotion(self) -> Option<Role> {
        match self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }

    /// Checks if the move is a promotion.
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            Move::Normal {
                promotion: Some(_),
                ..
            }
        )
    }

    /// Checks if the move is a pawn advance by two ranks.
    pub const fn is_double_step(self) -> bool {
        match self {
            Move::Normal {
                role: Role::Pawn,
                from,
                to,
                capture: None,
                ..
            } => {
                from.file() as u8 == to.file() as u8
                    && from.rank().to_u32().abs_diff(to.rank().to_u32()) == 2
            }
            _ => false,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                f.write_str(role.letter())?;
                write!(f, "{from}")?;
                if capture.is_some() {
                    f.write_char('x')?;
                }
                write!(f, "{to}")?;
                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }
                Ok(())
            }
            Move::EnPassant { from, to } => write!(f, "{from}x{to}"),
            Move::Castle { .. } => {
                f.write_str(self.castling_side().map_or("O-O", CastlingSide::notation))
            }
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough for the candidates of any board with at most 16
/// pieces per side, which [`Board::from_board_fen()`](crate::Board::from_board_fen)
/// enforces.
///
/// # Example
///
/// ```
/// use algebraic::{Game, Role};
///
/// let game = Game::new();
/// let mut moves = game.legal_moves();
/// moves.retain(|m| m.role() == Role::Pawn);
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<Move, 512>;

#[cfg(test)]
mod tests {
    use core::mem;

    use super::*;

    #[test]
    fn test_move_size() {
        assert!(mem::size_of::<Move>() <= 8);
    }

    #[test]
    fn test_display() {
        let m = Move::Normal {
            role: Role::Knight,
            from: Square::G1,
            capture: None,
            to: Square::F3,
            promotion: None,
        };
        assert_eq!(m.to_string(), "Ng1f3");

        let m = Move::Normal {
            role: Role::Pawn,
            from: Square::B7,
            capture: Some(Role::Rook),
            to: Square::A8,
            promotion: Some(Role::Queen),
        };
        assert_eq!(m.to_string(), "b7xa8=Q");

        let m = Move::EnPassant {
            from: Square::E5,
            to: Square::D6,
        };
        assert_eq!(m.to_string(), "e5xd6");
        assert_eq!(m.capture(), Some(Role::Pawn));
    }

    #[test]
    fn test_castle() {
        let short = Move::Castle {
            king: Square::E1,
            rook: Square::H1,
        };
        assert_eq!(short.castling_side(), Some(CastlingSide::KingSide));
        assert_eq!(short.to(), Square::G1);
        assert_eq!(short.to_string(), "O-O");

        let long = Move::Castle {
            king: Square::E8,
            rook: Square::A8,
        };
        assert_eq!(long.castling_side(), Some(CastlingSide::QueenSide));
        assert_eq!(long.to(), Square::C8);
        assert_eq!(long.to_string(), "O-O-O");
    }

    #[test]
    fn test_double_step() {
        let m = Move::Normal {
            role: Role::Pawn,
            from: Square::E7,
            capture: None,
            to: Square::E5,
            promotion: None,
        };
        assert!(m.is_double_step());

        let m = Move::Normal {
            role: Role::Pawn,
            from: Square::E2,
            capture: None,
            to: Square::E3,
            promotion: None,
        };
        assert!(!m.is_double_step());
    }
}
