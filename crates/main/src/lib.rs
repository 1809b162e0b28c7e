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

//! # Thicket API Documentation
//!
//! Thicket is a memoized two-layer parsing engine. A grammar author declares
//! a grammar as a set of named symbols with text patterns (the lexical
//! layer) and element sequence rules (the syntax layer), and then parses
//! texts into a lazily evaluated parse forest.
//!
//! The engine supports:
//!
//!  - Longest match disambiguation between the competing patterns and rule
//!    alternatives of the same symbol at the same position.
//!  - Direct left recursion: a rule may refer to itself as the first element
//!    of its alternatives. Such rules are resolved by a bounded fixed point
//!    iteration instead of the infinite descent.
//!  - Aliases: terminals that match whichever of the referred terminals
//!    matches longest.
//!  - Lazy value derivation: each node's value is computed from its children
//!    on first access through the positional, typed and named argument
//!    lookups.
//!
//! A failed match is not an error: every layer propagates it as an absent
//! result. The engine does not recover from syntax errors and does not
//! validate grammars for ambiguities statically.
//!
//! ## Getting Started
//!
//! ```rust
//! use thicket::{elements, grammar::{Grammar, Symbol}, lexis::Matcher};
//!
//! const NUMBER: Symbol = Symbol::named("NUMBER");
//! const LIST: Symbol = Symbol::named("LIST");
//!
//! let grammar = Grammar::<i64>::builder()
//!     .root(LIST)
//!     .terminal(NUMBER)
//!     .pattern(Matcher::regex("[0-9]+"))
//!     .value(|text| text.parse().unwrap_or_default())
//!     .rule(LIST)
//!     .pattern(elements![NUMBER])
//!     .value(|arguments| arguments.value(0).copied())
//!     .pattern(elements![LIST, ",", NUMBER])
//!     .value(|arguments| Some(arguments.value(0)? + arguments.value(2)?))
//!     .build()
//!     .unwrap();
//!
//! let parse = grammar.parse("1, 2, 3");
//!
//! assert!(parse.is_complete());
//! assert_eq!(parse.value(), Some(&6));
//!
//! // The left recursive rule builds the left-leaning tree.
//! assert_eq!(parse.root().unwrap().structure(), "(((1) , 2) , 3)");
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [log](https://docs.rs/log) facade: grammar
//! builds and parse runs on the debug level, context creation and left
//! recursion steps on the trace level.

/// Symbols, rule elements, values and the grammar builder.
///
/// The [GrammarBuilder](grammar::GrammarBuilder) is the only way to declare
/// a [Grammar](grammar::Grammar). The grammar is immutable once built and
/// can be shared between threads.
pub mod grammar;

/// Building blocks of the lexical layer.
///
/// - The [Matcher](lexis::Matcher) describes the text patterns of the
///   terminal symbols.
/// - The [Position](lexis::Position) is a byte offset together with
///   the line and the column of a character.
/// - The [LexisContext](lexis::LexisContext) is the memoized per-position
///   lookup surface of the terminals, aliases and literal texts.
/// - The [Leaf](lexis::Leaf) is a matched span of the text.
pub mod lexis;

mod report;

/// Building blocks of the syntax layer.
///
/// - The [SyntaxContext](syntax::SyntaxContext) resolves the non-terminal
///   symbols, including the left recursive ones, at a particular position.
/// - The [Node](syntax::Node) is a matched sequence of child tokens with
///   a lazily computed value.
/// - The [Arguments](syntax::Arguments) and the [Cases](syntax::Cases) feed
///   the node value resolvers.
pub mod syntax;

/// The parse run objects.
///
/// The [Session](units::Session) is the memoization arena of a single run.
/// The [Parse](units::Parse) is the result of the
/// [Grammar::parse](grammar::Grammar::parse) function.
pub mod units;
