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

//! The 8×8 grid and the registry of every piece created in a game.
//!
//! Both are flat arenas: a cell holds an optional [`PieceId`], a [`Piece`]
//! holds an optional [`Square`]. The board keeps the two directions
//! consistent as long as callers capture a piece before overwriting its cell.

use core::{array, error, fmt, iter::FusedIterator};

use crate::{
    color::ByColor,
    piece::{Glyphs, Piece, PieceId},
    square::{File, Rank},
    Color, Role, Square,
};

/// Square occupancy and the piece registry.
///
/// # Examples
///
/// ```
/// use algebraic::{Board, Role, Square};
///
/// let board = Board::standard();
/// let id = board.piece_at(Square::G1).expect("knight on g1");
/// assert_eq!(board.piece(id).role, Role::Knight);
/// assert_eq!(board.piece(id).square(), Some(Square::G1));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    cells: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
}

impl Board {
    /// A board without any pieces.
    pub fn empty() -> Board {
        Board {
            cells: [None; 64],
            pieces: Vec::with_capacity(32),
        }
    }

    /// The initial position.
    pub fn standard() -> Board {
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(BACKRANK) {
                board.put(Square::from_coords(file, color.backrank()), role, color);
            }
            for file in File::ALL {
                board.put(Square::from_coords(file, color.pawn_rank()), Role::Pawn, color);
            }
        }
        board
    }

    /// Looks up a square by its file letter and rank number, e.g.
    /// `get_square('e', 4)`. Returns `None` outside `a..=h` / `1..=8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algebraic::{Board, Square};
    ///
    /// let board = Board::empty();
    /// assert_eq!(board.get_square('e', 4), Some(Square::E4));
    /// assert_eq!(board.get_square('i', 4), None);
    /// assert_eq!(board.get_square('a', 0), None);
    /// ```
    pub fn get_square(&self, file: char, rank: u8) -> Option<Square> {
        let file = File::from_char(file)?;
        let rank = Rank::try_from(rank.checked_sub(1)?).ok()?;
        Some(Square::from_coords(file, rank))
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PieceId> {
        self.cells[sq.to_usize()]
    }

    /// The piece on `sq`, if any.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<&Piece> {
        self.piece_at(sq).map(|id| self.piece(id))
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.occupant(sq).map(|piece| piece.color)
    }

    /// # Panics
    ///
    /// Panics if `id` was not handed out by this board.
    #[track_caller]
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.to_usize()]
    }

    /// Adds a new active piece to the registry without placing it.
    pub fn spawn(&mut self, role: Role, color: Color) -> PieceId {
        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(Piece::new(role, color));
        id
    }

    /// Spawns a piece and places it on `sq`.
    pub fn put(&mut self, sq: Square, role: Role, color: Color) -> PieceId {
        let id = self.spawn(role, color);
        self.place(sq, id);
        id
    }

    /// Places a piece on `sq`, setting both the occupancy and the piece's
    /// back-reference.
    ///
    /// A previous occupant is not captured: its cell reference is simply
    /// overwritten, so callers must [`capture()`](Board::capture) it first.
    pub fn place(&mut self, sq: Square, id: PieceId) {
        debug_assert!(self.piece(id).active, "placing captured piece {id}");
        self.cells[sq.to_usize()] = Some(id);
        self.pieces[id.to_usize()].square = Some(sq);
    }

    /// Empties `sq` and returns the former occupant. The occupant itself is
    /// left untouched.
    pub fn clear(&mut self, sq: Square) -> Option<PieceId> {
        self.cells[sq.to_usize()].take()
    }

    /// Marks a piece as captured: it loses its square and is excluded from
    /// move generation from now on, but stays in the registry.
    pub fn capture(&mut self, id: PieceId) {
        let piece = &mut self.pieces[id.to_usize()];
        piece.active = false;
        if let Some(sq) = piece.square.take() {
            if self.cells[sq.to_usize()] == Some(id) {
                self.cells[sq.to_usize()] = None;
            }
        }
    }

    /// Every piece ever created, captured ones included, in creation order.
    pub fn pieces(&self) -> impl DoubleEndedIterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| (PieceId(i as u16), piece))
    }

    /// Active pieces of `color`, in creation order.
    pub fn active(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.active && piece.color == color)
    }

    /// Number of pieces in the registry, captured ones included.
    pub fn registry_len(&self) -> usize {
        self.pieces.len()
    }

    /// The rows of the board as printable strings, rank 8 first.
    ///
    /// The iterator is lazy and can be restarted by cloning it.
    ///
    /// # Examples
    ///
    /// ```
    /// use algebraic::{Board, Glyphs};
    ///
    /// let board = Board::standard();
    /// let rows: Vec<String> = board.render(Glyphs::Ascii).collect();
    /// assert_eq!(rows[0], "rnbqkbnr");
    /// assert_eq!(rows[4], "        ");
    /// assert_eq!(rows[7], "RNBQKBNR");
    /// ```
    pub fn render(&self, glyphs: Glyphs) -> Rows<'_> {
        Rows {
            board: self,
            glyphs,
            ranks: Rank::ALL.into_iter().rev(),
        }
    }

    /// Parses the piece placement part of a FEN, e.g.
    /// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR`.
    ///
    /// Pieces are registered in square order, `a1` first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardFenError`] if the text is malformed, a color has more
    /// than 16 pieces, or a pawn stands on the first or last rank.
    pub fn from_board_fen(fen: &str) -> Result<Board, BoardFenError> {
        let rows: Vec<&str> = fen.split('/').collect();
        if rows.len() != 8 {
            return Err(BoardFenError::InvalidBoard);
        }

        let mut placed = Vec::with_capacity(32);
        for (rank, row) in Rank::ALL.into_iter().rev().zip(rows) {
            let mut file = 0u32;
            for ch in row.chars() {
                if let Some(empty) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += empty;
                } else {
                    let role = Role::from_char(ch).ok_or(BoardFenError::InvalidBoard)?;
                    let color = Color::from_white(ch.is_ascii_uppercase());
                    let sq_file = File::try_from(file).map_err(|_| BoardFenError::InvalidBoard)?;
                    placed.push((Square::from_coords(sq_file, rank), role, color));
                    file += 1;
                }
                if file > 8 {
                    return Err(BoardFenError::InvalidBoard);
                }
            }
            if file != 8 {
                return Err(BoardFenError::InvalidBoard);
            }
        }

        let mut counts = ByColor::<usize>::default();
        for &(_, _, color) in &placed {
            counts[color] += 1;
        }
        for color in Color::ALL {
            if counts[color] > 16 {
                return Err(BoardFenError::TooManyPieces(color));
            }
        }
        if placed.iter().any(|&(sq, role, _)| {
            role == Role::Pawn && matches!(sq.rank(), Rank::First | Rank::Eighth)
        }) {
            return Err(BoardFenError::PawnsOnBackrank);
        }

        placed.sort_by_key(|&(sq, _, _)| sq);
        let mut board = Board::empty();
        for (sq, role, color) in placed {
            board.put(sq, role, color);
        }
        Ok(board)
    }

    /// Renders the piece placement part of a FEN.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(64);

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0u8;

            for file in File::ALL {
                match self.occupant(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > Rank::First {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render(Glyphs::Ascii) {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Iterator over the printable rows of a [`Board`], see
/// [`Board::render()`].
#[derive(Clone, Debug)]
pub struct Rows<'a> {
    board: &'a Board,
    glyphs: Glyphs,
    ranks: core::iter::Rev<array::IntoIter<Rank, 8>>,
}

impl Iterator for Rows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rank = self.ranks.next()?;
        Some(
            File::ALL
                .into_iter()
                .map(|file| {
                    self.board
                        .occupant(Square::from_coords(file, rank))
                        .map_or(' ', |piece| piece.glyph(self.glyphs))
                })
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ranks.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}

/// Error when parsing an invalid or unsupported piece placement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardFenError {
    /// The placement is not syntactically valid.
    InvalidBoard,
    /// More than 16 pieces of one color.
    TooManyPieces(Color),
    /// A pawn on the first or last rank.
    PawnsOnBackrank,
}

impl fmt::Display for BoardFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoardFenError::InvalidBoard => f.write_str("invalid board part in fen"),
            BoardFenError::TooManyPieces(color) => write!(f, "too many {color} pieces"),
            BoardFenError::PawnsOnBackrank => f.write_str("pawns on backrank"),
        }
    }
}

impl error::Error for BoardFenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_roundtrips_on_every_square() {
        let mut board = Board::empty();
        let id = board.spawn(Role::Queen, Color::White);
        for file in "abcdefgh".chars() {
            for rank in 1..=8 {
                let sq = board.get_square(file, rank).expect("square on board");
                board.place(sq, id);
                assert_eq!(board.piece_at(sq), Some(id));
                assert_eq!(board.piece(id).square(), Some(sq));
                assert_eq!(board.clear(sq), Some(id));
                assert_eq!(board.piece_at(sq), None);
            }
        }
    }

    #[test]
    fn test_get_square_out_of_bounds() {
        let board = Board::empty();
        assert_eq!(board.get_square('a', 1), Some(Square::A1));
        assert_eq!(board.get_square('h', 8), Some(Square::H8));
        assert_eq!(board.get_square('`', 1), None);
        assert_eq!(board.get_square('i', 1), None);
        assert_eq!(board.get_square('a', 0), None);
        assert_eq!(board.get_square('a', 9), None);
        assert_eq!(board.get_square('A', 1), None);
    }

    #[test]
    fn test_capture_keeps_registry_entry() {
        let mut board = Board::standard();
        let before = board.registry_len();
        let pawn = board.piece_at(Square::E2).expect("pawn on e2");
        board.capture(pawn);
        assert_eq!(board.registry_len(), before);
        assert_eq!(board.piece_at(Square::E2), None);
        assert!(!board.piece(pawn).is_active());
        assert_eq!(board.piece(pawn).square(), None);
        assert_eq!(board.active(Color::White).count(), 15);
    }

    #[test]
    fn test_clear_leaves_occupant_state() {
        let mut board = Board::standard();
        let knight = board.clear(Square::B1).expect("knight on b1");
        assert!(board.piece(knight).is_active());
        assert_eq!(board.piece(knight).square(), Some(Square::B1));
    }

    #[test]
    fn test_standard_board() {
        let board = Board::standard();
        assert_eq!(board.registry_len(), 32);
        assert_eq!(board.active(Color::White).count(), 16);
        assert_eq!(board.active(Color::Black).count(), 16);
        assert_eq!(
            board.board_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        for (id, piece) in board.pieces() {
            let sq = piece.square().expect("placed");
            assert_eq!(board.piece_at(sq), Some(id));
        }
    }

    #[test]
    fn test_render_is_restartable() {
        let board = Board::standard();
        let rows = board.render(Glyphs::Unicode);
        assert_eq!(rows.len(), 8);
        let first: Vec<String> = rows.clone().collect();
        let second: Vec<String> = rows.collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "♖♘♗♕♔♗♘♖");
        assert_eq!(first[1], "♙♙♙♙♙♙♙♙");
        assert_eq!(first[6], "♟♟♟♟♟♟♟♟");
        assert_eq!(first[7], "♜♞♝♛♚♝♞♜");
    }

    #[test]
    fn test_board_fen_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "4k3/8/8/3pP3/8/8/8/4K3",
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "8/8/8/8/8/8/8/8",
        ] {
            let board = Board::from_board_fen(fen).expect("valid board fen");
            assert_eq!(board.board_fen(), fen);
        }
    }

    #[test]
    fn test_invalid_board_fen() {
        for fen in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/9",
            "8/8/8/8/8/8/8/7",
            "8/8/8/8/8/8/8/44k",
            "8/8/8/8/8/8/8/7x",
        ] {
            assert_eq!(
                Board::from_board_fen(fen),
                Err(BoardFenError::InvalidBoard),
                "{fen}"
            );
        }
        assert_eq!(
            Board::from_board_fen("4k3/8/8/8/8/8/8/P3K3"),
            Err(BoardFenError::PawnsOnBackrank)
        );
        assert_eq!(
            Board::from_board_fen("QQQQQQQQ/QQQQQQQQ/Q7/8/8/8/8/4k3"),
            Err(BoardFenError::TooManyPieces(Color::White))
        );
    }
}
