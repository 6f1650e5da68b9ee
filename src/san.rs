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

//! Read and write short algebraic notation.
//!
//! # Examples
//!
//! Parse and write short notation:
//!
//! ```
//! use algebraic::san::San;
//!
//! let san: San = "Nf3".parse()?;
//! assert_eq!(san.to_string(), "Nf3");
//! # Ok::<_, algebraic::san::ParseSanError>(())
//! ```
//!
//! Find the move it stands for among candidates:
//!
//! ```
//! use algebraic::{san::San, Game, Move, Role, Square};
//!
//! let game = Game::new();
//! let moves = game.legal_moves();
//!
//! let san: San = "Nf3".parse()?;
//! let m = san.find_move(&moves)?;
//! assert_eq!(*m, Move::Normal {
//!     role: Role::Knight,
//!     from: Square::G1,
//!     capture: None,
//!     to: Square::F3,
//!     promotion: None,
//! });
//!
//! // Back to a (possibly disambiguated) short notation.
//! assert_eq!(San::disambiguate(m, &moves).to_string(), "Nf3");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{error, fmt, str::FromStr};

use crate::{game::IllegalMove, util::AppendAscii, CastlingSide, File, Move, Rank, Role, Square};

/// Error when parsing a syntactically invalid short notation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl error::Error for ParseSanError {}

/// A move in short algebraic notation.
///
/// Origin `file` and `rank` are hints. A move written with both of them,
/// like `Ng1f3` or `e2e4`, is valid short notation as well.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

const fn piece_role(ch: u8) -> Option<Role> {
    match ch {
        b'N' => Some(Role::Knight),
        b'B' => Some(Role::Bishop),
        b'R' => Some(Role::Rook),
        b'Q' => Some(Role::Queen),
        b'K' => Some(Role::King),
        _ => None,
    }
}

const fn file_from_ascii(ch: u8) -> Option<File> {
    File::from_char(ch as char)
}

const fn rank_from_ascii(ch: u8) -> Option<Rank> {
    Rank::from_char(ch as char)
}

impl San {
    /// Parses short notation. Ignores a possible check or checkmate suffix.
    ///
    /// Castles may be written with letters or digits (`O-O`, `0-0-0`).
    /// Promotions must name a queen, rook, bishop or knight.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(mut san: &[u8]) -> Result<San, ParseSanError> {
        if let [rest @ .., b'+' | b'#'] = san {
            san = rest;
        }

        match san {
            b"O-O" | b"0-0" => return Ok(San::Castle(CastlingSide::KingSide)),
            b"O-O-O" | b"0-0-0" => return Ok(San::Castle(CastlingSide::QueenSide)),
            _ => (),
        }

        let mut chars = san.iter().copied();

        let ch = chars.next().ok_or(ParseSanError)?;
        let (role, next) = if ch.is_ascii_uppercase() {
            (
                piece_role(ch).ok_or(ParseSanError)?,
                chars.next().ok_or(ParseSanError)?,
            )
        } else {
            (Role::Pawn, ch)
        };

        let (file, next) = if let Some(file) = file_from_ascii(next) {
            (Some(file), chars.next())
        } else {
            (None, Some(next))
        };

        let (rank, next) = match next.and_then(rank_from_ascii) {
            Some(rank) => (Some(rank), chars.next()),
            None => (None, next),
        };

        // Either the hints read so far already were the destination, or it
        // follows after an optional capture marker.
        let (capture, file, rank, to, next) = match next {
            Some(b'x') => {
                let to_file = chars.next().and_then(file_from_ascii).ok_or(ParseSanError)?;
                let to_rank = chars.next().and_then(rank_from_ascii).ok_or(ParseSanError)?;
                let to = Square::from_coords(to_file, to_rank);
                (true, file, rank, to, chars.next())
            }
            None | Some(b'=') => {
                let to = Square::from_coords(file.ok_or(ParseSanError)?, rank.ok_or(ParseSanError)?);
                (false, None, None, to, next)
            }
            Some(ch) => {
                let to_file = file_from_ascii(ch).ok_or(ParseSanError)?;
                let to_rank = chars.next().and_then(rank_from_ascii).ok_or(ParseSanError)?;
                let to = Square::from_coords(to_file, to_rank);
                (false, file, rank, to, chars.next())
            }
        };

        let promotion = match next {
            Some(b'=') => Some(
                chars
                    .next()
                    .and_then(piece_role)
                    .filter(|role| role.is_promotion_target())
                    .ok_or(ParseSanError)?,
            ),
            Some(_) => return Err(ParseSanError),
            None => None,
        };

        if chars.next().is_some() {
            return Err(ParseSanError);
        }

        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// The role of the moving piece. Castles are king moves.
    pub const fn role(&self) -> Role {
        match *self {
            San::Normal { role, .. } => role,
            San::Castle(_) => Role::King,
        }
    }

    /// Converts a move to short notation in the context of all other
    /// candidates.
    ///
    /// Pawn captures always name the origin file. Pieces name the origin
    /// file if another candidate of the same role reaches the same square
    /// from a different file, otherwise the origin rank. Both are given if
    /// neither suffices on its own.
    pub fn disambiguate(m: &Move, moves: &[Move]) -> San {
        match *m {
            Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion,
            } => San::Normal {
                role: Role::Pawn,
                file: capture.map(|_| from.file()),
                rank: None,
                capture: capture.is_some(),
                to,
                promotion,
            },
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                let (rank, file) = moves
                    .iter()
                    .filter(|c| match *c {
                        Move::Normal {
                            role: r,
                            to: t,
                            promotion: p,
                            ..
                        } => role == *r && to == *t && promotion == *p,
                        _ => false,
                    })
                    .fold((false, false), |(rank, file), c| {
                        let candidate = c.from();
                        if from == candidate {
                            (rank, file)
                        } else if from.rank() == candidate.rank()
                            || from.file() != candidate.file()
                        {
                            (rank, true)
                        } else {
                            (true, file)
                        }
                    });

                San::Normal {
                    role,
                    file: file.then(|| from.file()),
                    rank: rank.then(|| from.rank()),
                    capture: capture.is_some(),
                    to,
                    promotion,
                }
            }
            Move::EnPassant { from, to } => San::Normal {
                role: Role::Pawn,
                file: Some(from.file()),
                rank: None,
                capture: true,
                to,
                promotion: None,
            },
            Move::Castle { king, rook } => San::Castle(CastlingSide::from_king_side(king < rook)),
        }
    }

    /// Searches candidates for the unique move matching this notation.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::NoMatch`] if no candidate matches and
    /// [`IllegalMove::Ambiguous`] if more than one does.
    pub fn find_move<'a>(&self, moves: &'a [Move]) -> Result<&'a Move, IllegalMove> {
        let mut filtered = moves.iter().filter(|m| self.matches(m));

        let m = filtered.next().ok_or(IllegalMove::NoMatch)?;

        if filtered.next().is_some() {
            Err(IllegalMove::Ambiguous)
        } else {
            Ok(m)
        }
    }

    /// Test if the `San` can match the `Move` (in any position).
    ///
    /// # Examples
    ///
    /// ```
    /// use algebraic::{san::San, Move, Role, Square};
    ///
    /// let m = Move::Normal {
    ///     role: Role::Knight,
    ///     from: Square::G1,
    ///     to: Square::F3,
    ///     capture: None,
    ///     promotion: None,
    /// };
    ///
    /// let nf3 = San::from_ascii(b"Nf3")?;
    /// assert!(nf3.matches(&m));
    ///
    /// let ng1f3 = San::from_ascii(b"Ng1f3")?;
    /// assert!(ng1f3.matches(&m));
    ///
    /// // capture does not match
    /// let nxf3 = San::from_ascii(b"Nxf3")?;
    /// assert!(!nxf3.matches(&m));
    ///
    /// // other file does not match
    /// let nef3 = San::from_ascii(b"Nef3")?;
    /// assert!(!nef3.matches(&m));
    ///
    /// # Ok::<_, algebraic::san::ParseSanError>(())
    /// ```
    pub fn matches(&self, m: &Move) -> bool {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => match *m {
                Move::Normal {
                    role: r,
                    from,
                    capture: c,
                    to: t,
                    promotion: pr,
                } => {
                    role == r
                        && file.map_or(true, |f| f == from.file())
                        && rank.map_or(true, |r| r == from.rank())
                        && capture == c.is_some()
                        && to == t
                        && promotion == pr
                }
                Move::EnPassant { from, to: t } => {
                    role == Role::Pawn
                        && file.map_or(true, |f| f == from.file())
                        && rank.map_or(true, |r| r == from.rank())
                        && capture
                        && to == t
                        && promotion.is_none()
                }
                Move::Castle { .. } => false,
            },
            San::Castle(side) => m.castling_side() == Some(side),
        }
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.append_ascii(role.upper_char())?;
                }
                if let Some(file) = file {
                    f.append_ascii(file.char())?;
                }
                if let Some(rank) = rank {
                    f.append_ascii(rank.char())?;
                }
                if capture {
                    f.append_ascii('x')?;
                }
                to.append_to(f)?;
                if let Some(promotion) = promotion {
                    f.append_ascii('=')?;
                    f.append_ascii(promotion.upper_char())?;
                }
            }
            San::Castle(side) => {
                for ch in side.notation().chars() {
                    f.append_ascii(ch)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<San, ParseSanError> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
///
/// Suffixes are carried through as written. Nothing verifies them.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Parses short notation and a possible check or checkmate suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(san: &[u8]) -> Result<SanPlus, ParseSanError> {
        San::from_ascii(san).map(|result| SanPlus {
            san: result,
            suffix: san
                .last()
                .copied()
                .and_then(|ch| Suffix::from_char(char::from(ch))),
        })
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        self.san.append_to(f)?;
        if let Some(suffix) = self.suffix {
            f.append_ascii(suffix.char())?;
        }
        Ok(())
    }
}

impl From<San> for SanPlus {
    fn from(san: San) -> SanPlus {
        SanPlus { san, suffix: None }
    }
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SanPlus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = arrayvec::ArrayString::<16>::new();
        self.append_to(&mut s).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SanPlus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SanPlusVisitor;

        impl serde::de::Visitor<'_> for SanPlusVisitor {
            type Value = SanPlus;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("move in short algebraic notation")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                SanPlus::from_ascii(value.as_bytes()).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SanPlusVisitor)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for San {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<San> {
        if u.ratio(1, 16)? {
            return Ok(San::Castle(u.choose(&CastlingSide::ALL).copied()?));
        }
        let role = u.choose(&Role::ALL).copied()?;
        Ok(San::Normal {
            role,
            file: u.arbitrary::<bool>()?.then(|| u.choose(&File::ALL).copied()).transpose()?,
            rank: u.arbitrary::<bool>()?.then(|| u.choose(&Rank::ALL).copied()).transpose()?,
            capture: u.arbitrary()?,
            to: u.arbitrary()?,
            promotion: if role == Role::Pawn && u.arbitrary()? {
                Some(u.choose(&Role::PROMOTIONS).copied()?)
            } else {
                None
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use core::mem;

    use super::*;

    #[test]
    fn test_size() {
        assert!(mem::size_of::<San>() <= 8);
        assert!(mem::size_of::<SanPlus>() <= 8);
    }

    #[test]
    fn test_read_write() {
        for san in [
            "a1", "a8", "h1", "h8", "e4", "b6", "e8=Q", "f1=N#", "hxg7", "bxc1", "axe4", "bxc1+",
            "bxa8=R+", "Nf3", "Ba5", "Qh8", "Kh1", "Bba5", "N2c4", "Red3", "d1=N", "Ra1a8",
            "Ng1f3", "e2e4", "Bb4xc3+", "h7h8=Q", "Qf2f1#", "O-O", "O-O-O+",
        ] {
            let result = san.parse::<SanPlus>().expect("valid san").to_string();
            assert_eq!(san, result, "read {san} write {result}");
        }
    }

    #[test]
    fn test_digit_castles() {
        assert_eq!(
            "0-0".parse::<San>(),
            Ok(San::Castle(CastlingSide::KingSide))
        );
        let long = "0-0-0#".parse::<SanPlus>().expect("valid san");
        assert_eq!(long.san, San::Castle(CastlingSide::QueenSide));
        assert_eq!(long.suffix, Some(Suffix::Checkmate));
        assert_eq!(long.to_string(), "O-O-O#");
    }

    #[test]
    fn test_invalid() {
        for san in [
            "", "x", "e", "N", "Nf", "Ki9", "Lf3", "Pe4", "e8=K", "e8=P", "e8=q", "e8=", "Nf3x",
            "O-O-O-O", "o-o", "0-0-", "e4++", "e8=QQ", "e44", "Nxe", "nf3", "e4 ",
        ] {
            assert_eq!(san.parse::<SanPlus>(), Err(ParseSanError), "{san:?}");
        }
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(
            "Rexd3".parse::<San>(),
            Ok(San::Normal {
                role: Role::Rook,
                file: Some(File::E),
                rank: None,
                capture: true,
                to: Square::D3,
                promotion: None,
            })
        );
        assert_eq!(
            "b7xa8=Q".parse::<San>(),
            Ok(San::Normal {
                role: Role::Pawn,
                file: Some(File::B),
                rank: Some(Rank::Seventh),
                capture: true,
                to: Square::A8,
                promotion: Some(Role::Queen),
            })
        );
    }

    #[test]
    fn test_lax_pawn_move_san_roundtrip() {
        let san = "6h8".parse::<San>().expect("kinda valid san");
        assert_eq!(
            san,
            San::Normal {
                role: Role::Pawn,
                file: None,
                rank: Some(Rank::Sixth),
                capture: false,
                to: Square::H8,
                promotion: None,
            }
        );
        assert_eq!(san.to_string(), "6h8");
    }

    fn rook_move(from: Square, to: Square) -> Move {
        Move::Normal {
            role: Role::Rook,
            from,
            capture: None,
            to,
            promotion: None,
        }
    }

    #[test]
    fn test_disambiguate() {
        let by_file = [rook_move(Square::A1, Square::D1), rook_move(Square::H1, Square::D1)];
        assert_eq!(San::disambiguate(&by_file[0], &by_file).to_string(), "Rad1");
        assert_eq!(San::disambiguate(&by_file[1], &by_file).to_string(), "Rhd1");

        let by_rank = [rook_move(Square::A1, Square::A4), rook_move(Square::A8, Square::A4)];
        assert_eq!(San::disambiguate(&by_rank[0], &by_rank).to_string(), "R1a4");
        assert_eq!(San::disambiguate(&by_rank[1], &by_rank).to_string(), "R8a4");

        let both = [
            Move::Normal {
                role: Role::Queen,
                from: Square::H4,
                capture: None,
                to: Square::E1,
                promotion: None,
            },
            Move::Normal {
                role: Role::Queen,
                from: Square::E4,
                capture: None,
                to: Square::E1,
                promotion: None,
            },
            Move::Normal {
                role: Role::Queen,
                from: Square::H1,
                capture: None,
                to: Square::E1,
                promotion: None,
            },
        ];
        assert_eq!(San::disambiguate(&both[0], &both).to_string(), "Qh4e1");

        let alone = [rook_move(Square::A1, Square::D1)];
        assert_eq!(San::disambiguate(&alone[0], &alone).to_string(), "Rd1");
    }

    #[test]
    fn test_disambiguate_pawns() {
        let capture = Move::Normal {
            role: Role::Pawn,
            from: Square::E4,
            capture: Some(Role::Pawn),
            to: Square::D5,
            promotion: None,
        };
        assert_eq!(San::disambiguate(&capture, &[capture]).to_string(), "exd5");

        let en_passant = Move::EnPassant {
            from: Square::E5,
            to: Square::D6,
        };
        assert_eq!(San::disambiguate(&en_passant, &[]).to_string(), "exd6");
    }

    #[test]
    fn test_find_move() {
        let moves = [rook_move(Square::A1, Square::D1), rook_move(Square::H1, Square::D1)];
        let rd1: San = "Rd1".parse().expect("valid san");
        assert_eq!(rd1.find_move(&moves), Err(IllegalMove::Ambiguous));
        let rad1: San = "Rad1".parse().expect("valid san");
        assert_eq!(rad1.find_move(&moves), Ok(&moves[0]));
        let ra1d1: San = "Ra1d1".parse().expect("valid san");
        assert_eq!(ra1d1.find_move(&moves), Ok(&moves[0]));
        let rd2: San = "Rd2".parse().expect("valid san");
        assert_eq!(rd2.find_move(&moves), Err(IllegalMove::NoMatch));
    }
}
