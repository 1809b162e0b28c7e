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
    borrow::Cow,
    fmt::{Debug, Formatter},
};

use crate::grammar::Symbol;

/// A building block of the syntax rule alternative.
///
/// The alternative is a sequence of elements matched left to right, each
/// element starting where the previous one ended. Any element failure fails
/// the whole alternative.
///
/// The [elements](crate::elements) macro converts a mixed list of string
/// literals, symbols and elements into a `Vec<Element>`.
#[derive(Clone, PartialEq, Eq)]
pub enum Element {
    /// A literal text that must appear at the current position, after the
    /// configured whitespace.
    Literal(Cow<'static, str>),

    /// A reference to a terminal, an alias, or a non-terminal.
    Symbol(Symbol),

    /// A reference that binds the matched token to the `label` name.
    Named {
        /// A binding name.
        label: Cow<'static, str>,

        /// A referred symbol.
        symbol: Symbol,
    },

    /// A sub-sequence that repeats from `min` to `max` times.
    ///
    /// The tokens of all iterations are flattened into the node's children.
    /// An iteration that does not advance the position stops the repetition
    /// and counts as satisfying the bounds.
    Repeat {
        /// A repeated sequence.
        elements: Vec<Element>,

        /// A minimum number of iterations.
        min: usize,

        /// A maximum number of iterations, or None if unbounded.
        max: Option<usize>,
    },
}

impl Debug for Element {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Literal(text) => formatter.write_fmt(format_args!("{text:?}")),
            Self::Symbol(symbol) => Debug::fmt(symbol, formatter),
            Self::Named { label, symbol } => {
                formatter.write_fmt(format_args!("{symbol:?} as {label}"))
            }
            Self::Repeat { elements, min, max } => {
                formatter.write_str("(")?;

                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(" ")?;
                    }

                    Debug::fmt(element, formatter)?;
                }

                match max {
                    Some(max) => formatter.write_fmt(format_args!("){{{min},{max}}}")),
                    None => formatter.write_fmt(format_args!("){{{min},}}")),
                }
            }
        }
    }
}

impl From<&'static str> for Element {
    #[inline(always)]
    fn from(text: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(text))
    }
}

impl From<String> for Element {
    #[inline(always)]
    fn from(text: String) -> Self {
        Self::Literal(Cow::Owned(text))
    }
}

impl From<Symbol> for Element {
    #[inline(always)]
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for Element {
    #[inline(always)]
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}

impl Element {
    /// A sub-sequence repeated from `min` to `max` times.
    #[inline(always)]
    pub fn repeat(elements: Vec<Element>, min: usize, max: Option<usize>) -> Self {
        Self::Repeat { elements, min, max }
    }

    /// A sub-sequence repeated zero or more times.
    #[inline(always)]
    pub fn many(elements: Vec<Element>) -> Self {
        Self::repeat(elements, 0, None)
    }

    /// A sub-sequence matched zero or one time.
    #[inline(always)]
    pub fn optional(elements: Vec<Element>) -> Self {
        Self::repeat(elements, 0, Some(1))
    }

    /// Returns the symbol this element refers to directly.
    ///
    /// Literals and repetitions do not refer to a single symbol.
    #[inline(always)]
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            Self::Named { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    #[inline(always)]
    pub(crate) fn label(&self) -> Option<&Cow<'static, str>> {
        match self {
            Self::Named { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// Builds a `Vec<Element>` from a list of values convertible into
/// [Element](crate::grammar::Element).
///
/// ```rust
/// use thicket::{elements, grammar::{Element, Symbol}};
///
/// const VALUE: Symbol = Symbol::named("VALUE");
///
/// let sequence = elements!["[", VALUE, Element::many(elements![",", VALUE]), "]"];
///
/// assert_eq!(sequence.len(), 4);
/// ```
#[macro_export]
macro_rules! elements {
    ($($element:expr),* $(,)?) => {
        ::std::vec![$($crate::grammar::Element::from($element)),*]
    };
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Element, Symbol};

    #[test]
    fn test_element_debug() {
        const ITEM: Symbol = Symbol::named("ITEM");

        let sequence = elements!["(", ITEM.bind("first"), Element::many(elements![",", ITEM]), ")"];

        assert_eq!(
            format!("{sequence:?}"),
            r#"["(", ITEM as first, ("," ITEM){0,}, ")"]"#,
        );
        assert_eq!(sequence[1].symbol(), Some(&ITEM));
        assert_eq!(sequence[0].symbol(), None);
    }
}
