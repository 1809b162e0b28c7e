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

use thiserror::Error;

use crate::grammar::Symbol;

/// A malformed grammar registration.
///
/// The [GrammarBuilder](crate::grammar::GrammarBuilder) detects these errors
/// eagerly and keeps the first one. The
/// [build](crate::grammar::GrammarBuilder::build) function returns it instead
/// of the Grammar.
///
/// Parse-time mismatches are not errors: they are ordinary absent results.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// A value transform or resolver declared with no pattern to attach to.
    #[error("No patterns registered for {symbol} before its value declaration.")]
    ValueWithoutPattern {
        /// A terminal or rule symbol.
        symbol: Symbol,
    },

    /// A terminal pattern has an invalid regular expression.
    #[error("Terminal {symbol} has invalid regular expression {pattern:?}.")]
    InvalidRegex {
        /// A terminal symbol.
        symbol: Symbol,

        /// The regular expression text.
        pattern: String,

        /// The compilation error.
        #[source]
        source: regex::Error,
    },

    /// A pattern with nothing to match: an empty word set, an empty matcher
    /// sequence, or a rule alternative with no elements.
    #[error("Symbol {symbol} has an empty pattern.")]
    EmptyPattern {
        /// A terminal or rule symbol.
        symbol: Symbol,
    },

    /// A repetition with the upper bound of zero, or less than the lower bound.
    #[error("Symbol {symbol} has invalid repetition bounds {min}..{max}.")]
    InvalidRepetition {
        /// A terminal or rule symbol.
        symbol: Symbol,

        /// The lower bound.
        min: usize,

        /// The upper bound.
        max: usize,
    },

    /// An attempt to register the [UNKNOWN](Symbol::UNKNOWN) symbol.
    #[error("The unknown symbol cannot be registered.")]
    ReservedSymbol,

    /// A symbol registered as a terminal or an alias and as a syntax rule.
    #[error("Symbol {symbol} is registered as both a terminal and a syntax rule.")]
    DualRole {
        /// The conflicting symbol.
        symbol: Symbol,
    },

    /// An alias refers to a symbol that is neither a terminal nor an alias.
    #[error("Alias {alias} refers to unknown terminal {target}.")]
    UnknownAliasTarget {
        /// The alias symbol.
        alias: Symbol,

        /// The referred symbol.
        target: Symbol,
    },

    /// An alias refers to itself directly or through other aliases.
    #[error("Alias {symbol} refers to itself through its targets.")]
    AliasCycle {
        /// An alias symbol on the cycle.
        symbol: Symbol,
    },

    /// A rule alternative that consists of its own symbol only.
    #[error("Rule {symbol} has an alternative that refers to itself only.")]
    UnproductiveRecursion {
        /// The rule symbol.
        symbol: Symbol,
    },

    /// The builder has no root symbol.
    #[error("Grammar root symbol is not specified.")]
    MissingRoot,

    /// The root symbol is neither a registered terminal, an alias, nor a rule.
    #[error("Grammar root symbol {symbol} is not registered.")]
    UnknownRoot {
        /// The root symbol.
        symbol: Symbol,
    },
}
