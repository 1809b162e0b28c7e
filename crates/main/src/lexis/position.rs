////////////////////////////////////////////////////////////////////////////////
// This file is part of "Lady Deirdre", a compiler front-end foundation       //
// technology.                                                                //
//                                                                            //
// This work is proprietary software with source-available code.              //
//                                                                            //
// To copy, use, distribute, or contribute to this work, you must agree to    //
// the terms of the General License Agreement:                                //
//                                                                            //
// https://github.com/Eliah-Lakhin/lady-deirdre/blob/master/EULA.md           //
//                                                                            //
// The agreement grants a Basic Commercial License, allowing you to use       //
// this work in non-commercial and limited commercial products with a total   //
// gross revenue cap. To remove this commercial limit for one of your         //
// products, you must acquire a Full Commercial License.                      //
//                                                                            //
// If you contribute to the source code, documentation, or related materials, //
// you must grant me an exclusive license to these contributions.             //
// Contributions are governed by the "Contributions" section of the General   //
// License Agreement.                                                         //
//                                                                            //
// Copying the work in parts is strictly forbidden, except as permitted       //
// under the General License Agreement.                                       //
//                                                                            //
// If you do not or cannot agree to the terms of this Agreement,              //
// do not use this work.                                                      //
//                                                                            //
// This work is provided "as is", without any warranties, express or implied, //
// except where such disclaimers are legally invalid.                         //
//                                                                            //
// Copyright (c) 2024 Ilya Lakhin (Илья Александрович Лахин).                 //
// All rights reserved.                                                       //
////////////////////////////////////////////////////////////////////////////////

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

/// An index of the line in the source code text.
///
/// Line numeration starts from 1, such that 1 denotes the first line,
/// 2 denotes the second line, and so on.
pub type Line = usize;

/// An index of the character of the line in the source code text.
///
/// Column numeration starts from 1 and counts Unicode characters rather than
/// bytes.
///
/// Note that the line delimiter (`\n` char) is a part of the line tail.
pub type Column = usize;

/// A byte offset of the Unicode character within the source code text.
pub type ByteIndex = usize;

/// An immutable index of a character within the parsed text.
///
/// The Position object keeps the byte offset together with the
/// line-column pair of the same character. Two positions are compared, ordered
/// and hashed by their offsets only: the line and the column are derived
/// from the offset and the text.
///
/// The parser produces positions by scanning the text forward from an already
/// known Position, see [Position::advance].
#[derive(Clone, Copy, Debug)]
pub struct Position {
    offset: ByteIndex,
    line: Line,
    column: Column,
}

impl PartialEq for Position {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Position {}

impl Hash for Position {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state)
    }
}

impl Ord for Position {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl PartialOrd for Position {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        Self::START
    }
}

impl Display for Position {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_fmt(format_args!("{}:{}", self.line, self.column))
    }
}

impl Position {
    /// The position of the first character of any text.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Computes the position of the `offset` byte of the `text` by scanning
    /// it from the beginning.
    ///
    /// **Panic**
    ///
    /// Panics if `offset` exceeds the text length or falls inside a multi-byte
    /// character.
    #[inline(always)]
    pub fn of(text: &str, offset: ByteIndex) -> Self {
        Self::START.advance(text, offset)
    }

    /// A byte offset of this position. This value is 0-based.
    #[inline(always)]
    pub fn offset(&self) -> ByteIndex {
        self.offset
    }

    /// A line number of this position. This value is 1-based.
    #[inline(always)]
    pub fn line(&self) -> Line {
        self.line
    }

    /// A number of the character in the line. This value is 1-based.
    #[inline(always)]
    pub fn column(&self) -> Column {
        self.column
    }

    /// Returns the position of the `to` byte offset of the `text` by scanning
    /// the characters between this position and `to`, and counting the
    /// `\n` line breaks.
    ///
    /// The `text` must be the same text this position was computed for.
    ///
    /// **Panic**
    ///
    /// Panics if `to` is less than this position's offset, exceeds the text
    /// length, or does not fall on a character boundary.
    pub fn advance(&self, text: &str, to: ByteIndex) -> Self {
        if to < self.offset {
            panic!(
                "Position offset {to} is behind the scanning start offset {}.",
                self.offset,
            );
        }

        let Some(slice) = text.get(self.offset..to) else {
            panic!(
                "Position offset {to} is out of the text bounds 0..{} or is \
                not a char boundary.",
                text.len(),
            );
        };

        let mut result = *self;

        for ch in slice.chars() {
            match ch {
                '\n' => {
                    result.line += 1;
                    result.column = 1;
                }

                _ => {
                    result.column += 1;
                }
            }
        }

        result.offset = to;

        result
    }
}
