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

use core::{fmt, num::TryFromIntError};

use arrayvec::ArrayString;

pub(crate) fn overflow_error() -> TryFromIntError {
    // TryFromIntError has a private constructor, so produce one from a
    // conversion that is known to overflow.
    u32::try_from(u64::MAX).unwrap_err()
}

/// A sink for ASCII characters. Lets notation types write themselves into a
/// formatter, a `String` or a stack allocated `ArrayString` alike.
pub(crate) trait AppendAscii {
    type Error;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error>;

    fn reserve(&mut self, _additional: usize) {}
}

impl AppendAscii for fmt::Formatter<'_> {
    type Error = fmt::Error;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        fmt::Write::write_char(self, ascii_char)
    }
}

impl AppendAscii for String {
    type Error = core::convert::Infallible;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.push(ascii_char);
        Ok(())
    }

    fn reserve(&mut self, additional: usize) {
        String::reserve(self, additional);
    }
}

impl<const CAP: usize> AppendAscii for ArrayString<CAP> {
    type Error = arrayvec::CapacityError<char>;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.try_push(ascii_char)
    }
}
