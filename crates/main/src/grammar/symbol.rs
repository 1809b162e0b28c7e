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
    borrow::{Borrow, Cow},
    fmt::{Debug, Display, Formatter},
};

use crate::grammar::Element;

/// A name of the grammar vocabulary entity.
///
/// The same Symbol type denotes terminals (resolved by the lexical text
/// patterns), aliases, and non-terminals (resolved by the syntax rules).
/// Two symbols are equal when their names are equal.
///
/// Symbols are cheap to clone. The grammar authors usually declare them
/// as constants:
///
/// ```rust
/// use thicket::grammar::Symbol;
///
/// const NUMBER: Symbol = Symbol::named("NUMBER");
///
/// assert_eq!(NUMBER.name(), "NUMBER");
/// assert_eq!(NUMBER, Symbol::new(String::from("NUMBER")));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Symbol(Cow<'static, str>);

impl Debug for Symbol {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match self.is_unknown() {
            true => formatter.write_str("?"),
            false => formatter.write_str(&self.0),
        }
    }
}

impl Display for Symbol {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        Debug::fmt(self, formatter)
    }
}

impl Borrow<str> for Symbol {
    #[inline(always)]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Symbol {
    #[inline(always)]
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Symbol {
    #[inline(always)]
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl Symbol {
    /// A reserved sentinel that denotes unnamed literal text matches.
    ///
    /// Leaves produced by the literal text lookups are tagged with this
    /// symbol. The grammar cannot register it as a terminal or a rule.
    pub const UNKNOWN: Self = Self(Cow::Borrowed(""));

    /// Creates a Symbol from a static string.
    #[inline(always)]
    pub const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a Symbol from a dynamically built name.
    #[inline(always)]
    pub fn new(name: String) -> Self {
        Self(Cow::Owned(name))
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the [UNKNOWN](Self::UNKNOWN) sentinel.
    #[inline(always)]
    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    /// Creates a syntax rule element that refers to this symbol and binds
    /// the matched token to the `label` name.
    ///
    /// See [Arguments::named](crate::syntax::Arguments::named).
    #[inline(always)]
    pub fn bind(&self, label: &'static str) -> Element {
        Element::Named {
            label: Cow::Borrowed(label),
            symbol: self.clone(),
        }
    }
}
