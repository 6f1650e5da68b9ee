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

use core::fmt;

use crate::{Color, Role, Square};

/// Handle of a piece in the registry of a [`Board`](crate::Board).
///
/// Handles stay valid for the lifetime of the board: pieces are never
/// removed from the registry, captured pieces are only deactivated.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How pieces are drawn by [`Board::render()`](crate::Board::render).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Glyphs {
    /// Chess figures. White pieces use the filled figures, which read as
    /// the lighter side on a dark terminal.
    #[default]
    Unicode,
    /// FEN letters, uppercase for white.
    Ascii,
}

/// A piece in the registry.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub(crate) square: Option<Square>,
    pub(crate) active: bool,
}

impl Piece {
    pub(crate) const fn new(role: Role, color: Color) -> Piece {
        Piece {
            color,
            role,
            square: None,
            active: true,
        }
    }

    /// The square the piece stands on. `None` once captured.
    #[inline]
    pub const fn square(&self) -> Option<Square> {
        self.square
    }

    /// `false` once captured (or replaced by promotion).
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// The FEN letter of the piece.
    pub fn char(&self) -> char {
        self.color.fold(self.role.upper_char(), self.role.char())
    }

    /// The letter code of the piece kind in algebraic notation.
    pub const fn letter(&self) -> &'static str {
        self.role.letter()
    }

    pub fn glyph(&self, glyphs: Glyphs) -> char {
        match glyphs {
            Glyphs::Ascii => self.char(),
            Glyphs::Unicode => match (self.color, self.role) {
                (Color::White, Role::Pawn) => '♟',
                (Color::White, Role::Knight) => '♞',
                (Color::White, Role::Bishop) => '♝',
                (Color::White, Role::Rook) => '♜',
                (Color::White, Role::Queen) => '♛',
                (Color::White, Role::King) => '♚',
                (Color::Black, Role::Pawn) => '♙',
                (Color::Black, Role::Knight) => '♘',
                (Color::Black, Role::Bishop) => '♗',
                (Color::Black, Role::Rook) => '♖',
                (Color::Black, Role::Queen) => '♕',
                (Color::Black, Role::King) => '♔',
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_is_active_and_unplaced() {
        let piece = Piece::new(Role::Knight, Color::Black);
        assert!(piece.is_active());
        assert_eq!(piece.square(), None);
        assert_eq!(piece.char(), 'n');
        assert_eq!(piece.letter(), "N");
        assert_eq!(piece.glyph(Glyphs::Unicode), '♘');
        assert_eq!(piece.glyph(Glyphs::Ascii), 'n');
    }
}
