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

//! Turn order, castling rights and the move log.
//!
//! # Examples
//!
//! ```
//! use algebraic::{Color, Game};
//!
//! let mut game = Game::new();
//! for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"] {
//!     game.attempt_move(san)?;
//! }
//!
//! assert_eq!(game.turn(), Color::Black);
//! assert_eq!(
//!     game.long_notation(),
//!     ["e2e4", "e7e5", "Ng1f3", "Nb8c6", "Bf1c4", "Bf8c5", "O-O"]
//! );
//! # Ok::<_, algebraic::PlayError>(())
//! ```

use core::{error, fmt};

use tracing::debug;

use crate::{
    board::{BoardFenError, Rows},
    lan::Lan,
    movegen,
    piece::Glyphs,
    san::{ParseSanError, San, SanPlus, Suffix},
    uci::Uci,
    Board, CastlingRights, CastlingSide, Color, Move, MoveList, Role, Square,
};

/// Reason a well-formed move was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IllegalMove {
    /// No candidate of the side to move matches.
    NoMatch,
    /// More than one candidate matches. The move needs an origin file or
    /// rank.
    Ambiguous,
    /// The king or the rook has already moved, or the rook was captured.
    CastlingRevoked,
    /// King or rook is not on its home square.
    CastlingPiecesMissing,
    /// A square between king and rook is occupied.
    CastlingBlocked,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            IllegalMove::NoMatch => "no piece can make this move",
            IllegalMove::Ambiguous => "ambiguous move",
            IllegalMove::CastlingRevoked => "castling rights revoked",
            IllegalMove::CastlingPiecesMissing => "king or rook not on home square",
            IllegalMove::CastlingBlocked => "castling path blocked",
        })
    }
}

impl error::Error for IllegalMove {}

/// Error when attempting a move given as text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    Parse(ParseSanError),
    Illegal(IllegalMove),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Parse(err) => fmt::Display::fmt(err, f),
            PlayError::Illegal(err) => write!(f, "illegal move: {err}"),
        }
    }
}

impl error::Error for PlayError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            PlayError::Parse(err) => Some(err),
            PlayError::Illegal(err) => Some(err),
        }
    }
}

impl From<ParseSanError> for PlayError {
    fn from(err: ParseSanError) -> PlayError {
        PlayError::Parse(err)
    }
}

impl From<IllegalMove> for PlayError {
    fn from(err: IllegalMove) -> PlayError {
        PlayError::Illegal(err)
    }
}

/// An entry of the move log.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LoggedMove {
    color: Color,
    m: Move,
    san: SanPlus,
}

impl LoggedMove {
    /// The side that made the move.
    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn m(&self) -> Move {
        self.m
    }

    /// Short notation, disambiguated against the other candidates at the
    /// time the move was made.
    pub const fn san(&self) -> SanPlus {
        self.san
    }

    pub const fn suffix(&self) -> Option<Suffix> {
        self.san.suffix
    }

    /// Long notation, with the suffix the move was entered with.
    pub const fn lan(&self) -> Lan {
        Lan::new(self.m, self.san.suffix)
    }

    pub fn uci(&self) -> Uci {
        Uci::from(self.m)
    }
}

impl fmt::Display for LoggedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lan(), f)
    }
}

/// A game in progress.
///
/// Moves are not checked for leaving the king in check, and check or
/// checkmate suffixes are logged as given.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    board: Board,
    turn: Color,
    castling_rights: CastlingRights,
    log: Vec<LoggedMove>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// The initial position, white to move.
    pub fn new() -> Game {
        Game {
            board: Board::standard(),
            turn: Color::White,
            castling_rights: CastlingRights::all(),
            log: Vec::new(),
        }
    }

    /// Sets up a game from the piece placement part of a FEN.
    ///
    /// A side may castle wherever its king and rook stand on their home
    /// squares.
    ///
    /// # Errors
    ///
    /// Returns [`BoardFenError`] if the placement is invalid.
    pub fn from_board_fen(fen: &str, turn: Color) -> Result<Game, BoardFenError> {
        let board = Board::from_board_fen(fen)?;
        let mut castling_rights = CastlingRights::empty();
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if has_home_piece(&board, CastlingSide::king_from(color), Role::King, color)
                    && has_home_piece(&board, side.rook_from(color), Role::Rook, color)
                {
                    castling_rights.insert(CastlingRights::flag(color, side));
                }
            }
        }
        Ok(Game {
            board,
            turn,
            castling_rights,
            log: Vec::new(),
        })
    }

    /// Resets to the initial position and clears the log.
    pub fn new_game(&mut self) {
        *self = Game::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// All moves made so far, oldest first.
    pub fn log(&self) -> &[LoggedMove] {
        &self.log
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.log.last().map(|entry| &entry.m)
    }

    /// The log in long notation.
    pub fn long_notation(&self) -> Vec<String> {
        self.log.iter().map(|entry| entry.lan().to_string()).collect()
    }

    /// The log in short notation.
    pub fn short_notation(&self) -> Vec<String> {
        self.log.iter().map(|entry| entry.san.to_string()).collect()
    }

    /// The log in UCI notation.
    pub fn uci_notation(&self) -> Vec<String> {
        self.log.iter().map(|entry| entry.uci().to_string()).collect()
    }

    pub fn render(&self, glyphs: Glyphs) -> Rows<'_> {
        self.board.render(glyphs)
    }

    /// Checks that `color` may castle to `side`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::CastlingRevoked`] if the right is gone,
    /// [`IllegalMove::CastlingPiecesMissing`] if king or rook is not on its
    /// home square and [`IllegalMove::CastlingBlocked`] if a square between
    /// them is occupied.
    pub fn validate_castle(&self, color: Color, side: CastlingSide) -> Result<(), IllegalMove> {
        if !self.castling_rights.has(color, side) {
            return Err(IllegalMove::CastlingRevoked);
        }

        if !has_home_piece(&self.board, CastlingSide::king_from(color), Role::King, color)
            || !has_home_piece(&self.board, side.rook_from(color), Role::Rook, color)
        {
            return Err(IllegalMove::CastlingPiecesMissing);
        }

        let blocked = side
            .between_files()
            .iter()
            .any(|&file| self.board.piece_at(Square::from_coords(file, color.backrank())).is_some());
        if blocked {
            return Err(IllegalMove::CastlingBlocked);
        }

        Ok(())
    }

    /// The candidate moves of the side to move, castles included.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        movegen::color_moves(&self.board, self.turn, self.last_move(), &mut moves);
        for side in CastlingSide::ALL {
            if self.validate_castle(self.turn, side).is_ok() {
                moves.push(castle(self.turn, side));
            }
        }
        moves
    }

    /// [`legal_moves()`](Game::legal_moves) in short notation, each
    /// disambiguated against the others.
    pub fn legal_sans(&self) -> Vec<SanPlus> {
        let moves = self.legal_moves();
        moves
            .iter()
            .map(|m| SanPlus::from(San::disambiguate(m, &moves)))
            .collect()
    }

    /// Parses a move in short notation and plays it for the side to move.
    ///
    /// On success the new log entry is returned and the turn passes to the
    /// other side. On failure the game is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Parse`] if the text is not short notation and
    /// [`PlayError::Illegal`] if it does not stand for exactly one candidate.
    pub fn attempt_move(&mut self, text: &str) -> Result<&LoggedMove, PlayError> {
        let san = SanPlus::from_ascii(text.as_bytes()).inspect_err(|_| {
            debug!(text, "rejected unparsable move");
        })?;
        self.play(&san).map_err(PlayError::from)
    }

    /// Plays a parsed move for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] if the move does not stand for exactly one
    /// candidate. The game is unchanged in that case.
    pub fn play(&mut self, san: &SanPlus) -> Result<&LoggedMove, IllegalMove> {
        let m = match self.find_move(&san.san) {
            Ok(m) => m,
            Err(err) => {
                debug!(color = %self.turn, san = %san, %err, "rejected move");
                return Err(err);
            }
        };
        Ok(self.apply(m, san.suffix))
    }

    fn find_move(&self, san: &San) -> Result<Move, IllegalMove> {
        match *san {
            San::Castle(side) => {
                self.validate_castle(self.turn, side)?;
                Ok(castle(self.turn, side))
            }
            San::Normal { role, .. } => {
                let moves = self.role_moves(role);
                san.find_move(&moves).copied()
            }
        }
    }

    fn role_moves(&self, role: Role) -> MoveList {
        let last = self.last_move();
        let mut moves = MoveList::new();
        for (id, piece) in self.board.active(self.turn) {
            if piece.role == role {
                movegen::piece_moves(&self.board, id, last, &mut moves);
            }
        }
        moves
    }

    fn apply(&mut self, m: Move, suffix: Option<Suffix>) -> &LoggedMove {
        let color = self.turn;
        let san = match m {
            Move::Normal { role, .. } if role != Role::Pawn => {
                San::disambiguate(&m, &self.role_moves(role))
            }
            _ => San::disambiguate(&m, &[]),
        };

        match m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if capture.is_some() {
                    if let Some(victim) = self.board.piece_at(to) {
                        self.board.capture(victim);
                    }
                    if let Some(side) = corner_side(to, !color) {
                        self.revoke(CastlingRights::flag(!color, side));
                    }
                }

                if let Some(mover) = self.board.clear(from) {
                    match promotion {
                        Some(promotion) => {
                            self.board.capture(mover);
                            self.board.put(to, promotion, color);
                        }
                        None => self.board.place(to, mover),
                    }
                }

                match role {
                    Role::King => self.revoke(CastlingRights::of(color)),
                    Role::Rook => {
                        if let Some(side) = corner_side(from, color) {
                            self.revoke(CastlingRights::flag(color, side));
                        }
                    }
                    _ => (),
                }
            }
            Move::EnPassant { from, to } => {
                let pushed = Square::from_coords(to.file(), from.rank());
                if let Some(victim) = self.board.piece_at(pushed) {
                    self.board.capture(victim);
                }
                if let Some(mover) = self.board.clear(from) {
                    self.board.place(to, mover);
                }
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king < rook);
                let king_id = self.board.clear(king);
                let rook_id = self.board.clear(rook);
                if let (Some(king_id), Some(rook_id)) = (king_id, rook_id) {
                    self.board.place(side.king_to(color), king_id);
                    self.board.place(side.rook_to(color), rook_id);
                }
                self.revoke(CastlingRights::of(color));
            }
        }

        let entry = LoggedMove {
            color,
            m,
            san: SanPlus { san, suffix },
        };
        debug!(ply = self.log.len() + 1, %color, lan = %entry, "applied move");

        self.turn = !color;
        self.log.push(entry);
        &self.log[self.log.len() - 1]
    }

    fn revoke(&mut self, rights: CastlingRights) {
        if self.castling_rights.revoke(rights) {
            debug!(?rights, remaining = ?self.castling_rights, "castling rights revoked");
        }
    }
}

fn castle(color: Color, side: CastlingSide) -> Move {
    Move::Castle {
        king: CastlingSide::king_from(color),
        rook: side.rook_from(color),
    }
}

/// The castling side whose rook starts on `sq`, if `sq` is a corner of
/// `color`.
fn corner_side(sq: Square, color: Color) -> Option<CastlingSide> {
    if sq.rank() == color.backrank() {
        CastlingSide::from_rook_file(sq.file())
    } else {
        None
    }
}

fn has_home_piece(board: &Board, sq: Square, role: Role, color: Color) -> bool {
    board
        .occupant(sq)
        .is_some_and(|piece| piece.role == role && piece.color == color)
}

/// Error when a move of a batch conversion is rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConvertError {
    /// Position of the move in the input, starting at 0.
    pub index: usize,
    pub text: String,
    pub error: PlayError,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move {} ({:?}): {}", self.index + 1, self.text, self.error)
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Plays a sequence of moves in short notation from the initial position
/// and returns the log in long notation.
///
/// # Errors
///
/// Returns [`ConvertError`] for the first move that is rejected.
///
/// # Examples
///
/// ```
/// use algebraic::convert_notation;
///
/// let log = convert_notation(["e4", "e5", "Nf3"])?;
/// assert_eq!(log, ["e2e4", "e7e5", "Ng1f3"]);
/// # Ok::<_, algebraic::ConvertError>(())
/// ```
pub fn convert_notation<I, S>(moves: I) -> Result<Vec<String>, ConvertError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut game = Game::new();
    for (index, text) in moves.into_iter().enumerate() {
        let text = text.as_ref();
        if let Err(error) = game.attempt_move(text) {
            return Err(ConvertError {
                index,
                text: text.to_owned(),
                error,
            });
        }
    }
    Ok(game.long_notation())
}
