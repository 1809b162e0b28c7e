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

use std::borrow::Cow;

/// A declarative text pattern of the terminal symbol.
///
/// The matcher describes the text the terminal may start with. When the
/// lexical context scans the text at some position, each matcher reports
/// the length of its longest prefix match, or nothing.
///
/// ```rust
/// use thicket::lexis::Matcher;
///
/// // An identifier: a letter followed by letters and digits.
/// let identifier = Matcher::join([
///     Matcher::regex("[a-zA-Z]"),
///     Matcher::regex("[a-zA-Z0-9]").repeat(0, None),
/// ]);
///
/// // An operator.
/// let operator = Matcher::words(["+", "++", "+="]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// A set of literal words. The longest word the text starts with wins.
    Words(Vec<Cow<'static, str>>),

    /// A set of regular expressions anchored at the scanning position.
    /// The longest match across the set wins.
    Regex(Vec<Cow<'static, str>>),

    /// Exactly this number of Unicode characters.
    Fixed(usize),

    /// A sequence of matchers, each starting where the previous one ended.
    Join(Vec<Matcher>),

    /// A matcher repeated from `min` to `max` times.
    ///
    /// A zero-length iteration stops the repetition and counts as satisfying
    /// the bounds.
    Repeat {
        /// A repeated matcher.
        matcher: Box<Matcher>,

        /// A minimum number of iterations.
        min: usize,

        /// A maximum number of iterations, or None if unbounded.
        max: Option<usize>,
    },

    /// The longest of several matchers. Among equal lengths the first wins.
    Any(Vec<Matcher>),
}

impl From<&'static str> for Matcher {
    #[inline(always)]
    fn from(word: &'static str) -> Self {
        Self::word(word)
    }
}

impl Matcher {
    #[inline(always)]
    pub fn word(word: &'static str) -> Self {
        Self::Words(vec![Cow::Borrowed(word)])
    }

    #[inline(always)]
    pub fn words(words: impl IntoIterator<Item = &'static str>) -> Self {
        Self::Words(words.into_iter().map(Cow::Borrowed).collect())
    }

    #[inline(always)]
    pub fn regex(pattern: &'static str) -> Self {
        Self::Regex(vec![Cow::Borrowed(pattern)])
    }

    #[inline(always)]
    pub fn regexes(patterns: impl IntoIterator<Item = &'static str>) -> Self {
        Self::Regex(patterns.into_iter().map(Cow::Borrowed).collect())
    }

    #[inline(always)]
    pub fn fixed(chars: usize) -> Self {
        Self::Fixed(chars)
    }

    #[inline(always)]
    pub fn join(matchers: impl IntoIterator<Item = Matcher>) -> Self {
        Self::Join(matchers.into_iter().collect())
    }

    #[inline(always)]
    pub fn any(matchers: impl IntoIterator<Item = Matcher>) -> Self {
        Self::Any(matchers.into_iter().collect())
    }

    /// Repeats this matcher from `min` to `max` times.
    #[inline(always)]
    pub fn repeat(self, min: usize, max: Option<usize>) -> Self {
        Self::Repeat {
            matcher: Box::new(self),
            min,
            max,
        }
    }
}
