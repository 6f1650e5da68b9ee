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

//! Candidate move generation.
//!
//! Candidates are pseudo-legal: a king may step into check and nothing
//! verifies that the mover's own king is safe afterwards.
//!
//! # Examples
//!
//! ```
//! use algebraic::{movegen, Board, MoveList, Square};
//!
//! let board = Board::standard();
//! let knight = board.piece_at(Square::G1).expect("knight on g1");
//!
//! let mut moves = MoveList::new();
//! movegen::piece_moves(&board, knight, None, &mut moves);
//!
//! let targets: Vec<Square> = moves.iter().map(|m| m.to()).collect();
//! assert_eq!(targets, [Square::H3, Square::F3]);
//! ```

use tracing::trace;

use crate::{piece::PieceId, Board, Color, Move, MoveList, Role, Square};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_OFFSETS: [(i32, i32); 8] = QUEEN_DIRECTIONS;

/// Appends the candidate moves of the piece `id` to `moves`.
///
/// `last` is the move that was played immediately before, which decides
/// whether a pawn may capture en passant. A captured piece has no moves.
pub fn piece_moves(board: &Board, id: PieceId, last: Option<&Move>, moves: &mut MoveList) {
    let piece = board.piece(id);
    let Some(from) = piece.square() else {
        return;
    };
    if !piece.is_active() {
        return;
    }

    let before = moves.len();
    let color = piece.color;
    match piece.role {
        Role::Pawn => pawn_moves(board, color, from, last, moves),
        Role::Knight => step_moves(board, Role::Knight, color, from, &KNIGHT_OFFSETS, moves),
        Role::Bishop => ray_moves(board, Role::Bishop, color, from, &BISHOP_DIRECTIONS, moves),
        Role::Rook => ray_moves(board, Role::Rook, color, from, &ROOK_DIRECTIONS, moves),
        Role::Queen => ray_moves(board, Role::Queen, color, from, &QUEEN_DIRECTIONS, moves),
        Role::King => step_moves(board, Role::King, color, from, &KING_OFFSETS, moves),
    }

    trace!(piece = %id, role = ?piece.role, %from, count = moves.len() - before, "generated candidates");
}

/// Appends the candidates of all active pieces of `color`, in registry
/// order.
pub fn color_moves(board: &Board, color: Color, last: Option<&Move>, moves: &mut MoveList) {
    for (id, _) in board.active(color) {
        piece_moves(board, id, last, moves);
    }
}

fn push_normal(moves: &mut MoveList, role: Role, from: Square, capture: Option<Role>, to: Square) {
    moves.push(Move::Normal {
        role,
        from,
        capture,
        to,
        promotion: None,
    });
}

fn step_moves(
    board: &Board,
    role: Role,
    color: Color,
    from: Square,
    offsets: &[(i32, i32)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match board.occupant(to) {
            None => push_normal(moves, role, from, None, to),
            Some(other) if other.color != color => {
                push_normal(moves, role, from, Some(other.role), to)
            }
            Some(_) => (),
        }
    }
}

fn ray_moves(
    board: &Board,
    role: Role,
    color: Color,
    from: Square,
    directions: &[(i32, i32)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut sq = from;
        while let Some(to) = sq.offset(df, dr) {
            match board.occupant(to) {
                None => push_normal(moves, role, from, None, to),
                Some(other) => {
                    if other.color != color {
                        push_normal(moves, role, from, Some(other.role), to);
                    }
                    break;
                }
            }
            sq = to;
        }
    }
}

fn pawn_moves(
    board: &Board,
    color: Color,
    from: Square,
    last: Option<&Move>,
    moves: &mut MoveList,
) {
    let forward = color.forward();

    if let Some(single) = from.offset(0, forward) {
        if board.piece_at(single).is_none() {
            push_pawn(moves, color, from, None, single);

            if from.rank() == color.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if board.piece_at(double).is_none() {
                        push_pawn(moves, color, from, None, double);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, forward) else {
            continue;
        };
        if let Some(other) = board.occupant(to) {
            if other.color != color {
                push_pawn(moves, color, from, Some(other.role), to);
            }
        }
    }

    if let Some(to) = en_passant_target(board, color, from, last) {
        moves.push(Move::EnPassant { from, to });
    }
}

fn push_pawn(moves: &mut MoveList, color: Color, from: Square, capture: Option<Role>, to: Square) {
    if to.rank() == color.other().backrank() {
        for promotion in Role::PROMOTIONS {
            moves.push(Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion: Some(promotion),
            });
        }
    } else {
        push_normal(moves, Role::Pawn, from, capture, to);
    }
}

/// The square a pawn of `color` on `from` may capture to en passant,
/// reconstructed from the previous move.
fn en_passant_target(board: &Board, color: Color, from: Square, last: Option<&Move>) -> Option<Square> {
    if from.rank() != color.en_passant_rank() {
        return None;
    }

    let last = last.filter(|m| m.role() == Role::Pawn && m.is_double_step())?;
    let pushed = last.to();
    if pushed.rank() != from.rank() || pushed.file().to_u32().abs_diff(from.file().to_u32()) != 1 {
        return None;
    }

    let victim = board.occupant(pushed)?;
    if victim.color == color || victim.role != Role::Pawn {
        return None;
    }

    let to = pushed.offset(0, color.forward())?;
    board.piece_at(to).is_none().then_some(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_of(board: &Board, sq: Square, last: Option<&Move>) -> MoveList {
        let id = board.piece_at(sq).expect("piece on square");
        let mut moves = MoveList::new();
        piece_moves(board, id, last, &mut moves);
        moves
    }

    fn targets(moves: &MoveList) -> Vec<Square> {
        let mut targets: Vec<Square> = moves.iter().map(|m| m.to()).collect();
        targets.sort();
        targets
    }

    #[test]
    fn test_pawn_single_and_double_step() {
        let board = Board::standard();
        let moves = moves_of(&board, Square::E2, None);
        assert_eq!(targets(&moves), [Square::E3, Square::E4]);
        assert!(moves.iter().all(|m| !m.is_capture()));

        let moves = moves_of(&board, Square::D7, None);
        assert_eq!(targets(&moves), [Square::D5, Square::D6]);
    }

    #[test]
    fn test_blocked_pawn() {
        let board = Board::from_board_fen("4k3/8/8/8/8/4n3/4P3/4K3").expect("valid fen");
        assert!(moves_of(&board, Square::E2, None).is_empty());

        let board = Board::from_board_fen("4k3/8/8/8/4n3/8/4P3/4K3").expect("valid fen");
        assert_eq!(targets(&moves_of(&board, Square::E2, None)), [Square::E3]);
    }

    #[test]
    fn test_pawn_captures_only_enemies() {
        let board = Board::from_board_fen("4k3/8/8/8/8/3p1N2/4P3/4K3").expect("valid fen");
        let moves = moves_of(&board, Square::E2, None);
        assert_eq!(targets(&moves), [Square::D3, Square::E3, Square::E4]);
        assert!(moves.contains(&Move::Normal {
            role: Role::Pawn,
            from: Square::E2,
            capture: Some(Role::Pawn),
            to: Square::D3,
            promotion: None,
        }));
    }

    #[test]
    fn test_promotions() {
        let board = Board::from_board_fen("1r2k3/P7/8/8/8/8/8/4K3").expect("valid fen");
        let moves = moves_of(&board, Square::A7, None);
        assert_eq!(moves.len(), 8);
        for role in Role::PROMOTIONS {
            assert!(moves.contains(&Move::Normal {
                role: Role::Pawn,
                from: Square::A7,
                capture: None,
                to: Square::A8,
                promotion: Some(role),
            }));
            assert!(moves.contains(&Move::Normal {
                role: Role::Pawn,
                from: Square::A7,
                capture: Some(Role::Rook),
                to: Square::B8,
                promotion: Some(role),
            }));
        }
    }

    #[test]
    fn test_en_passant() {
        let board = Board::from_board_fen("4k3/8/8/3pP3/8/8/8/4K3").expect("valid fen");
        let double = Move::Normal {
            role: Role::Pawn,
            from: Square::D7,
            capture: None,
            to: Square::D5,
            promotion: None,
        };
        let moves = moves_of(&board, Square::E5, Some(&double));
        assert!(moves.contains(&Move::EnPassant {
            from: Square::E5,
            to: Square::D6,
        }));

        let single = Move::Normal {
            role: Role::Pawn,
            from: Square::D6,
            capture: None,
            to: Square::D5,
            promotion: None,
        };
        let moves = moves_of(&board, Square::E5, Some(&single));
        assert!(moves.iter().all(|m| !m.is_en_passant()));

        let moves = moves_of(&board, Square::E5, None);
        assert!(moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn test_en_passant_for_black() {
        let board = Board::from_board_fen("4k3/8/8/8/5Pp1/8/8/4K3").expect("valid fen");
        let double = Move::Normal {
            role: Role::Pawn,
            from: Square::F2,
            capture: None,
            to: Square::F4,
            promotion: None,
        };
        let moves = moves_of(&board, Square::G4, Some(&double));
        assert!(moves.contains(&Move::EnPassant {
            from: Square::G4,
            to: Square::F3,
        }));
    }

    #[test]
    fn test_knight() {
        let board = Board::from_board_fen("4k3/8/8/8/8/8/8/N3K3").expect("valid fen");
        assert_eq!(
            targets(&moves_of(&board, Square::A1, None)),
            [Square::C2, Square::B3]
        );

        let board = Board::from_board_fen("4k3/8/8/3N4/8/8/8/4K3").expect("valid fen");
        assert_eq!(moves_of(&board, Square::D5, None).len(), 8);
    }

    #[test]
    fn test_rook_rays_stop_at_pieces() {
        let board = Board::from_board_fen("4k3/8/8/8/1p1R2P1/8/8/4K3").expect("valid fen");
        let moves = moves_of(&board, Square::D4, None);
        assert_eq!(
            targets(&moves),
            [
                Square::D1,
                Square::D2,
                Square::D3,
                Square::B4,
                Square::C4,
                Square::E4,
                Square::F4,
                Square::D5,
                Square::D6,
                Square::D7,
                Square::D8,
            ]
        );
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 1);
    }

    #[test]
    fn test_bishop_and_queen() {
        let board = Board::from_board_fen("4k3/8/8/8/3B4/8/8/4K3").expect("valid fen");
        assert_eq!(moves_of(&board, Square::D4, None).len(), 13);

        let board = Board::from_board_fen("4k3/8/8/8/3Q4/8/8/4K3").expect("valid fen");
        assert_eq!(moves_of(&board, Square::D4, None).len(), 27);
    }

    #[test]
    fn test_king_ignores_check() {
        let board = Board::from_board_fen("8/8/8/8/8/8/r7/4K2k").expect("valid fen");
        let moves = moves_of(&board, Square::E1, None);
        assert_eq!(
            targets(&moves),
            [Square::D1, Square::F1, Square::D2, Square::E2, Square::F2]
        );
    }

    #[test]
    fn test_captured_piece_has_no_moves() {
        let mut board = Board::standard();
        let knight = board.piece_at(Square::B1).expect("knight on b1");
        board.capture(knight);
        let mut moves = MoveList::new();
        piece_moves(&board, knight, None, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_initial_position() {
        let board = Board::standard();
        for color in Color::ALL {
            let mut moves = MoveList::new();
            color_moves(&board, color, None, &mut moves);
            assert_eq!(moves.len(), 20);
        }
    }
}
