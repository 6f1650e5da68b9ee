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

//! Move transcripts as exchanged with collaborators that store games.
//!
//! A [`Transcript`] holds moves in short notation as a client reported
//! them. [`Transcript::normalize()`] replays them and produces a
//! [`NormalizedGame`] in long notation, ready to be persisted.
//!
//! ```
//! use algebraic::transcript::Transcript;
//!
//! let transcript: Transcript = serde_json::from_str(r#"{
//!     "game_id": "abc123",
//!     "moves": ["e4", "e5", "Nf3"]
//! }"#)?;
//!
//! let normalized = transcript.normalize()?;
//! assert_eq!(normalized.moves, ["e2e4", "e7e5", "Ng1f3"]);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::game::{convert_notation, ConvertError};

/// Moves of one game in short notation.
///
/// Deserializing fails if `moves` is missing. `game_id` is optional.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub moves: Vec<String>,
}

impl Transcript {
    /// Splits a whitespace separated list of moves, like `e4 e5 Nf3`.
    pub fn from_moves_text(game_id: Option<String>, text: &str) -> Transcript {
        Transcript {
            game_id,
            moves: text.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Replays the moves from the initial position.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] for the first rejected move.
    pub fn normalize(&self) -> Result<NormalizedGame, ConvertError> {
        Ok(NormalizedGame {
            game_id: self.game_id.clone(),
            moves: convert_notation(&self.moves)?,
        })
    }
}

/// Moves of one game in long notation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub moves: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_moves_text() {
        let transcript = Transcript::from_moves_text(None, "  e4 e5\n Nf3\tNc6 ");
        assert_eq!(transcript.moves, ["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(transcript.game_id, None);
    }

    #[test]
    fn test_normalize_keeps_game_id() {
        let transcript = Transcript::from_moves_text(Some("42".to_owned()), "d4 d5 Nc3");
        let normalized = transcript.normalize().expect("legal moves");
        assert_eq!(normalized.game_id.as_deref(), Some("42"));
        assert_eq!(normalized.moves, ["d2d4", "d7d5", "Nb1c3"]);
    }

    #[test]
    fn test_normalize_rejects() {
        let transcript = Transcript::from_moves_text(None, "e4 e4");
        let err = transcript.normalize().expect_err("black cannot play e4");
        assert_eq!(err.index, 1);
    }
}
