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

use std::fmt::{Debug, Formatter};

use crate::{
    grammar::{GrammarBuilder, Symbol, Value},
    lexis::rule::LexisRules,
    syntax::rule::SyntaxRules,
    units::{Parse, Session},
};

/// A read-only set of the lexical and syntax rules.
///
/// The Grammar is created once by the [GrammarBuilder], and is never mutated
/// afterwards. It is [Send] and [Sync], so a single instance can be shared
/// between threads. Each parse run creates its own [Session].
///
/// ```rust
/// use thicket::{elements, grammar::{Grammar, Symbol}, lexis::Matcher};
///
/// const DIGIT: Symbol = Symbol::named("DIGIT");
/// const SUM: Symbol = Symbol::named("SUM");
///
/// let grammar = Grammar::<i64>::builder()
///     .root(SUM)
///     .terminal(DIGIT)
///     .pattern(Matcher::regex("[0-9]"))
///     .value(|text| text.parse().unwrap_or_default())
///     .rule(SUM)
///     .pattern(elements![DIGIT])
///     .value(|arguments| arguments.value(0).copied())
///     .pattern(elements![SUM, "+", DIGIT])
///     .value(|arguments| Some(arguments.value(0)? + arguments.value(2)?))
///     .build()
///     .unwrap();
///
/// assert_eq!(grammar.parse("1 + 2 + 3").value(), Some(&6));
/// ```
pub struct Grammar<V: Value> {
    pub(crate) whitespace: Box<[char]>,
    pub(crate) root: Symbol,
    pub(crate) lexis: LexisRules<V>,
    pub(crate) syntax: SyntaxRules<V>,
}

impl<V: Value> Debug for Grammar<V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("Grammar")
            .field("root", &self.root)
            .field("whitespace", &self.whitespace)
            .field(
                "terminals",
                &self
                    .lexis
                    .terminals()
                    .iter()
                    .map(|rule| &rule.symbol)
                    .collect::<Vec<_>>(),
            )
            .field(
                "aliases",
                &self
                    .lexis
                    .aliases()
                    .iter()
                    .map(|rule| &rule.symbol)
                    .collect::<Vec<_>>(),
            )
            .field(
                "rules",
                &self
                    .syntax
                    .rules()
                    .iter()
                    .map(|rule| &rule.symbol)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<V: Value> Grammar<V> {
    /// Starts a new grammar declaration.
    #[inline(always)]
    pub fn builder() -> GrammarBuilder<V> {
        GrammarBuilder::default()
    }

    /// The start symbol of the [parse](Self::parse) function.
    #[inline(always)]
    pub fn root(&self) -> &Symbol {
        &self.root
    }

    /// The characters skipped before each lexical match.
    #[inline(always)]
    pub fn whitespace(&self) -> &[char] {
        &self.whitespace
    }

    /// Returns true if the `symbol` is a registered terminal or alias.
    #[inline(always)]
    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.lexis.contains(symbol)
    }

    /// Returns true if the `symbol` is a registered syntax rule.
    #[inline(always)]
    pub fn is_rule(&self, symbol: &Symbol) -> bool {
        self.syntax.contains(symbol)
    }

    /// Starts a new parse run without resolving anything.
    #[inline(always)]
    pub fn session<'code>(&'code self, text: &'code str) -> Session<'code, V> {
        Session::new(self, text)
    }

    /// Resolves the [root](Self::root) symbol at the beginning of the `text`.
    #[inline(always)]
    pub fn parse<'code>(&'code self, text: &'code str) -> Parse<'code, V> {
        Parse::new(self, text)
    }
}
