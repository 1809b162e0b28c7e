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

use std::sync::Arc;

use log::debug;

use crate::{
    grammar::{Element, Grammar, GrammarError, Symbol, Value},
    lexis::{
        rule::{Candidate, LexisRules, Transform},
        scanners::Scanner,
        Matcher,
    },
    syntax::{
        arguments::ValueResolver,
        rule::{Alternative, SyntaxRules},
        Arguments,
        Cases,
    },
};

const DEFAULT_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

/// A declarative builder of the [Grammar].
///
/// The builder registers terminals, aliases and syntax rules in any order.
/// No text is scanned until the grammar is built and a parse run starts.
///
/// Patterns and their values are declared in groups: each `pattern` call
/// adds a pattern to the open group, and the `value` call attaches the value
/// function to every pattern of the open group and closes it. The patterns
/// that remain without a value function produce no values.
///
/// The builder detects malformed registrations eagerly, and keeps the first
/// [error](GrammarError). The [build](Self::build) function returns it.
pub struct GrammarBuilder<V: Value> {
    whitespace: Vec<char>,
    root: Option<Symbol>,
    lexis: LexisRules<V>,
    syntax: SyntaxRules<V>,
    error: Option<GrammarError>,
}

impl<V: Value> Default for GrammarBuilder<V> {
    #[inline(always)]
    fn default() -> Self {
        Self {
            whitespace: DEFAULT_WHITESPACE.to_vec(),
            root: None,
            lexis: LexisRules::default(),
            syntax: SyntaxRules::default(),
            error: None,
        }
    }
}

impl<V: Value> GrammarBuilder<V> {
    /// Sets the characters the lexical layer skips before each match.
    ///
    /// The default set is space, tab, carriage return, and line feed.
    #[inline(always)]
    pub fn whitespace(mut self, chars: &str) -> Self {
        self.whitespace = chars.chars().collect();

        self
    }

    /// Sets the start symbol of the [Grammar::parse] function.
    #[inline(always)]
    pub fn root(mut self, symbol: Symbol) -> Self {
        self.root = Some(symbol);

        self
    }

    /// Starts or continues the declaration of the terminal `symbol`.
    pub fn terminal(mut self, symbol: Symbol) -> TerminalEntry<V> {
        if symbol.is_unknown() {
            self.fail(GrammarError::ReservedSymbol);
        }

        let group = self.lexis.terminal_mut(&symbol).candidates.len();

        TerminalEntry {
            builder: self,
            symbol,
            group,
        }
    }

    /// Declares the `symbol` as an alias of the `targets` terminals.
    ///
    /// The targets may be other aliases in any declaration order, but not
    /// the alias itself, directly or through other aliases.
    ///
    /// At each position, the alias matches the longest match among
    /// the targets, retagged with the alias symbol. Among equal lengths
    /// the first target wins. If the alias symbol is also a terminal with
    /// its own match at the position, the own match takes precedence.
    pub fn alias(mut self, symbol: Symbol, targets: impl IntoIterator<Item = Symbol>) -> Self {
        if symbol.is_unknown() {
            self.fail(GrammarError::ReservedSymbol);
        }

        let alias = self.lexis.alias_mut(&symbol);

        alias.targets.extend(targets);

        if alias.targets.is_empty() {
            self.fail(GrammarError::EmptyPattern { symbol });
        }

        self
    }

    /// Starts or continues the declaration of the syntax rule `symbol`.
    pub fn rule(mut self, symbol: Symbol) -> RuleEntry<V> {
        if symbol.is_unknown() {
            self.fail(GrammarError::ReservedSymbol);
        }

        let group = self.syntax.rule_mut(&symbol).alternatives.len();

        RuleEntry {
            builder: self,
            symbol,
            group,
        }
    }

    /// Validates the declarations and creates the Grammar.
    pub fn build(mut self) -> Result<Grammar<V>, GrammarError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        for rule in self.syntax.rules() {
            if self.lexis.contains(&rule.symbol) {
                return Err(GrammarError::DualRole {
                    symbol: rule.symbol.clone(),
                });
            }
        }

        for alias in self.lexis.aliases() {
            for target in &alias.targets {
                if !self.lexis.contains(target) {
                    return Err(GrammarError::UnknownAliasTarget {
                        alias: alias.symbol.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        if let Err(symbol) = self.lexis.order_aliases() {
            return Err(GrammarError::AliasCycle { symbol });
        }

        let Some(root) = self.root else {
            return Err(GrammarError::MissingRoot);
        };

        if !self.lexis.contains(&root) && !self.syntax.contains(&root) {
            return Err(GrammarError::UnknownRoot { symbol: root });
        }

        debug!(
            "Grammar built: {} terminals, {} aliases, {} rules, {root} root.",
            self.lexis.terminals().len(),
            self.lexis.aliases().len(),
            self.syntax.rules().len(),
        );

        Ok(Grammar {
            whitespace: self.whitespace.into(),
            root,
            lexis: self.lexis,
            syntax: self.syntax,
        })
    }

    #[inline(always)]
    fn fail(&mut self, error: GrammarError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// A declaration of the terminal symbol's patterns.
///
/// Created by the [GrammarBuilder::terminal] function.
pub struct TerminalEntry<V: Value> {
    builder: GrammarBuilder<V>,
    symbol: Symbol,
    group: usize,
}

impl<V: Value> TerminalEntry<V> {
    /// Adds a text pattern to the open group.
    pub fn pattern(mut self, matcher: impl Into<Matcher>) -> Self {
        match Scanner::compile(&self.symbol, &matcher.into()) {
            Ok(scanner) => self
                .builder
                .lexis
                .terminal_mut(&self.symbol)
                .candidates
                .push(Candidate {
                    scanner,
                    transform: None,
                }),

            Err(error) => self.builder.fail(error),
        }

        self
    }

    /// Attaches the text to value `transform` to the open group patterns,
    /// and closes the group.
    pub fn value(mut self, transform: impl Fn(&str) -> V + Send + Sync + 'static) -> Self {
        let transform: Transform<V> = Arc::new(transform);
        let rule = self.builder.lexis.terminal_mut(&self.symbol);
        let end = rule.candidates.len();

        if end == self.group {
            self.builder.fail(GrammarError::ValueWithoutPattern {
                symbol: self.symbol.clone(),
            });

            return self;
        }

        for candidate in &mut rule.candidates[self.group..] {
            candidate.transform = Some(transform.clone());
        }

        self.group = end;

        self
    }

    /// Finishes this declaration.
    #[inline(always)]
    pub fn finish(self) -> GrammarBuilder<V> {
        self.builder
    }

    /// Finishes this declaration, and starts the next terminal.
    #[inline(always)]
    pub fn terminal(self, symbol: Symbol) -> TerminalEntry<V> {
        self.builder.terminal(symbol)
    }

    /// Finishes this declaration, and declares an alias.
    #[inline(always)]
    pub fn alias(
        self,
        symbol: Symbol,
        targets: impl IntoIterator<Item = Symbol>,
    ) -> GrammarBuilder<V> {
        self.builder.alias(symbol, targets)
    }

    /// Finishes this declaration, and starts a syntax rule.
    #[inline(always)]
    pub fn rule(self, symbol: Symbol) -> RuleEntry<V> {
        self.builder.rule(symbol)
    }

    /// Finishes this declaration, and builds the Grammar.
    #[inline(always)]
    pub fn build(self) -> Result<Grammar<V>, GrammarError> {
        self.builder.build()
    }
}

/// A declaration of the syntax rule's alternatives.
///
/// Created by the [GrammarBuilder::rule] function.
pub struct RuleEntry<V: Value> {
    builder: GrammarBuilder<V>,
    symbol: Symbol,
    group: usize,
}

impl<V: Value> RuleEntry<V> {
    /// Adds an alternative element sequence to the open group.
    ///
    /// The rule's own symbol may appear as the first element, in which case
    /// the alternative extends the rule's previous matches at the same
    /// position. Such an alternative must have at least one more element.
    pub fn pattern(mut self, elements: Vec<Element>) -> Self {
        if let Err(error) = validate(&self.symbol, &elements) {
            self.builder.fail(error);

            return self;
        }

        let recursive = elements[0].symbol() == Some(&self.symbol);

        if recursive && elements.len() == 1 {
            self.builder.fail(GrammarError::UnproductiveRecursion {
                symbol: self.symbol.clone(),
            });

            return self;
        }

        self.builder
            .syntax
            .rule_mut(&self.symbol)
            .alternatives
            .push(Alternative {
                elements,
                resolver: None,
                recursive,
            });

        self
    }

    /// Attaches the value `resolver` to the open group alternatives, and
    /// closes the group.
    ///
    /// The resolver is called lazily, when the matched node's value is
    /// requested for the first time.
    #[inline(always)]
    pub fn value(
        self,
        resolver: impl Fn(&mut Arguments<'_, '_, V>) -> Option<V> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_group(ValueResolver::Function(Arc::new(resolver)))
    }

    /// Attaches the typed [Cases] to the open group alternatives, and closes
    /// the group.
    #[inline(always)]
    pub fn cases(self, cases: Cases<V>) -> Self {
        self.resolve_group(ValueResolver::Cases(Arc::new(cases)))
    }

    fn resolve_group(mut self, resolver: ValueResolver<V>) -> Self {
        let rule = self.builder.syntax.rule_mut(&self.symbol);
        let end = rule.alternatives.len();

        if end == self.group {
            self.builder.fail(GrammarError::ValueWithoutPattern {
                symbol: self.symbol.clone(),
            });

            return self;
        }

        for alternative in &mut rule.alternatives[self.group..] {
            alternative.resolver = Some(resolver.clone());
        }

        self.group = end;

        self
    }

    /// Finishes this declaration.
    #[inline(always)]
    pub fn finish(self) -> GrammarBuilder<V> {
        self.builder
    }

    /// Finishes this declaration, and starts a terminal.
    #[inline(always)]
    pub fn terminal(self, symbol: Symbol) -> TerminalEntry<V> {
        self.builder.terminal(symbol)
    }

    /// Finishes this declaration, and declares an alias.
    #[inline(always)]
    pub fn alias(
        self,
        symbol: Symbol,
        targets: impl IntoIterator<Item = Symbol>,
    ) -> GrammarBuilder<V> {
        self.builder.alias(symbol, targets)
    }

    /// Finishes this declaration, and starts the next syntax rule.
    #[inline(always)]
    pub fn rule(self, symbol: Symbol) -> RuleEntry<V> {
        self.builder.rule(symbol)
    }

    /// Finishes this declaration, and builds the Grammar.
    #[inline(always)]
    pub fn build(self) -> Result<Grammar<V>, GrammarError> {
        self.builder.build()
    }
}

fn validate(symbol: &Symbol, elements: &[Element]) -> Result<(), GrammarError> {
    if elements.is_empty() {
        return Err(GrammarError::EmptyPattern {
            symbol: symbol.clone(),
        });
    }

    for element in elements {
        let Element::Repeat { elements, min, max } = element else {
            continue;
        };

        if let Some(max) = max {
            if *max == 0 || max < min {
                return Err(GrammarError::InvalidRepetition {
                    symbol: symbol.clone(),
                    min: *min,
                    max: *max,
                });
            }
        }

        validate(symbol, elements)?;
    }

    Ok(())
}
