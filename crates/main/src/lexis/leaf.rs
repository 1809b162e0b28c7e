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
    fmt::{Debug, Formatter},
    ops::Range,
};

use crate::{
    grammar::{Symbol, Value},
    lexis::{ByteIndex, Position},
};

/// A matched span of the source text tagged with a terminal symbol.
///
/// Leaves are produced by the [lexical contexts](crate::lexis::LexisContext)
/// and are immutable. The `text` and the `whitespace` are slices of the
/// parsed text.
///
/// The leaves produced by the literal text lookups are tagged with
/// [Symbol::UNKNOWN] and carry no value.
#[derive(Clone)]
pub struct Leaf<'code, V: Value> {
    pub(crate) symbol: Symbol,
    pub(crate) whitespace: &'code str,
    pub(crate) text: &'code str,
    pub(crate) start: Position,
    pub(crate) end: Position,
    pub(crate) value: Option<V>,
}

impl<'code, V: Value> Debug for Leaf<'code, V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_fmt(format_args!(
            "{:?}({}..{} {:?})",
            self.symbol,
            self.start.offset(),
            self.end.offset(),
            self.text,
        ))
    }
}

impl<'code, V: Value> Leaf<'code, V> {
    #[inline(always)]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// The matched text.
    #[inline(always)]
    pub fn text(&self) -> &'code str {
        self.text
    }

    /// The whitespace skipped right before the matched text.
    #[inline(always)]
    pub fn whitespace(&self) -> &'code str {
        self.whitespace
    }

    /// The position of the first matched character.
    #[inline(always)]
    pub fn start(&self) -> Position {
        self.start
    }

    /// The position right after the last matched character.
    #[inline(always)]
    pub fn end(&self) -> Position {
        self.end
    }

    #[inline(always)]
    pub fn span(&self) -> Range<ByteIndex> {
        self.start.offset()..self.end.offset()
    }

    /// The value produced by the terminal's text transform, if any.
    #[inline(always)]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    #[inline(always)]
    pub(crate) fn retag(&self, symbol: Symbol) -> Self {
        Self {
            symbol,
            ..self.clone()
        }
    }
}
