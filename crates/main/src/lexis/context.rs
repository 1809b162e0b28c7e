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
    cell::RefCell,
    collections::HashMap,
    fmt::{Debug, Formatter},
    rc::Rc,
};

use log::trace;

use crate::{
    grammar::{Symbol, Value},
    lexis::{
        rule::{Candidate, LexisRules},
        Leaf,
        Position,
    },
    syntax::Token,
    units::Session,
};

// Lexical matches at one effective offset of the parsed text.
pub(crate) struct LexisState<'code, V: Value> {
    pub(crate) source: &'code str,
    pub(crate) origin: Position,
    pub(crate) position: Position,
    leaves: Vec<Rc<Leaf<'code, V>>>,
    index: HashMap<Symbol, usize>,
    literals: RefCell<HashMap<Box<str>, Option<Rc<Leaf<'code, V>>>>>,
}

impl<'code, V: Value> LexisState<'code, V> {
    // Scans every terminal at `position`, then resolves the aliases.
    //
    // The `origin` is the position the whitespace skip started from.
    pub(crate) fn scan(
        rules: &LexisRules<V>,
        source: &'code str,
        origin: Position,
        position: Position,
    ) -> Self {
        let whitespace = &source[origin.offset()..position.offset()];
        let rest = &source[position.offset()..];

        let mut leaves = Vec::new();
        let mut index = HashMap::new();

        for rule in rules.terminals() {
            let mut best: Option<(usize, &Candidate<V>)> = None;

            for candidate in &rule.candidates {
                let Some(length) = candidate.scanner.scan(rest) else {
                    continue;
                };

                if best.map_or(true, |(best_length, _)| length > best_length) {
                    best = Some((length, candidate));
                }
            }

            let Some((length, candidate)) = best else {
                continue;
            };

            let text = &rest[..length];

            let leaf = Leaf {
                symbol: rule.symbol.clone(),
                whitespace,
                text,
                start: position,
                end: position.advance(source, position.offset() + length),
                value: candidate.transform.as_ref().map(|transform| transform(text)),
            };

            let _ = index.insert(rule.symbol.clone(), leaves.len());
            leaves.push(Rc::new(leaf));
        }

        for alias in rules.aliases() {
            if index.contains_key(&alias.symbol) {
                continue;
            }

            let mut best: Option<&Rc<Leaf<'code, V>>> = None;

            for target in &alias.targets {
                let Some(leaf) = index.get(target).map(|target| &leaves[*target]) else {
                    continue;
                };

                if best.map_or(true, |best| leaf.end > best.end) {
                    best = Some(leaf);
                }
            }

            let Some(leaf) = best.map(|best| best.retag(alias.symbol.clone())) else {
                continue;
            };

            let _ = index.insert(alias.symbol.clone(), leaves.len());
            leaves.push(Rc::new(leaf));
        }

        trace!(
            "Lexis context at {position} ({} offset): {} matches.",
            position.offset(),
            leaves.len(),
        );

        Self {
            source,
            origin,
            position,
            leaves,
            index,
            literals: RefCell::new(HashMap::new()),
        }
    }

    #[inline(always)]
    pub(crate) fn whitespace(&self) -> &'code str {
        &self.source[self.origin.offset()..self.position.offset()]
    }

    #[inline(always)]
    pub(crate) fn leaf(&self, symbol: &Symbol) -> Option<&Rc<Leaf<'code, V>>> {
        Some(&self.leaves[*self.index.get(symbol)?])
    }

    pub(crate) fn literal(&self, literal: &str) -> Option<Rc<Leaf<'code, V>>> {
        if let Some(cached) = self.literals.borrow().get(literal) {
            return cached.clone();
        }

        let rest = &self.source[self.position.offset()..];

        let leaf = match rest.starts_with(literal) {
            false => None,

            true => Some(Rc::new(Leaf {
                symbol: Symbol::UNKNOWN,
                whitespace: self.whitespace(),
                text: &rest[..literal.len()],
                start: self.position,
                end: self
                    .position
                    .advance(self.source, self.position.offset() + literal.len()),
                value: None,
            })),
        };

        let _ = self
            .literals
            .borrow_mut()
            .insert(Box::from(literal), leaf.clone());

        leaf
    }
}

/// A lexical layer lookup surface at a particular position of the parsed
/// text.
///
/// The context is created by the [Session](crate::units::Session) on first
/// request for a position, and then reused for all further requests that
/// lead to the same position after the whitespace skip. Creation scans
/// every registered terminal and resolves the aliases. The literal text
/// lookups are performed and cached on demand.
///
/// A missing match is an absent result, not an error.
pub struct LexisContext<'session, 'code, V: Value> {
    pub(crate) session: &'session Session<'code, V>,
    pub(crate) state: Rc<LexisState<'code, V>>,
}

impl<'session, 'code, V: Value> Clone for LexisContext<'session, 'code, V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            state: self.state.clone(),
        }
    }
}

impl<'session, 'code, V: Value> Debug for LexisContext<'session, 'code, V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("LexisContext")
            .field("position", &self.state.position)
            .field("leaves", &self.state.leaves)
            .finish()
    }
}

impl<'session, 'code, V: Value> LexisContext<'session, 'code, V> {
    /// The position of the context after the whitespace skip.
    #[inline(always)]
    pub fn position(&self) -> Position {
        self.state.position
    }

    /// The position the whitespace skip started from, when this context was
    /// created.
    #[inline(always)]
    pub fn origin(&self) -> Position {
        self.state.origin
    }

    /// The whitespace skipped between the [origin](Self::origin) and the
    /// [position](Self::position).
    #[inline(always)]
    pub fn whitespace(&self) -> &'code str {
        self.state.whitespace()
    }

    /// Returns true if there is no text left after the whitespace skip.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.state.position.offset() >= self.state.source.len()
    }

    /// Returns the longest match of the terminal or alias `symbol` here.
    #[inline(always)]
    pub fn leaf(&self, symbol: &Symbol) -> Option<Rc<Leaf<'code, V>>> {
        self.state.leaf(symbol).cloned()
    }

    /// Same as [leaf](Self::leaf), but wraps the result into a Token.
    #[inline(always)]
    pub fn token(&self, symbol: &Symbol) -> Option<Token<'code, V>> {
        self.leaf(symbol).map(Token::Leaf)
    }

    /// Checks if the text here starts with the `literal`.
    ///
    /// Both positive and negative results are cached, and the same Leaf
    /// instance is returned for the repeated requests.
    #[inline(always)]
    pub fn literal(&self, literal: &str) -> Option<Rc<Leaf<'code, V>>> {
        self.state.literal(literal)
    }

    #[inline(always)]
    pub fn has_symbol(&self, symbol: &Symbol) -> bool {
        self.state.index.contains_key(symbol)
    }

    #[inline(always)]
    pub fn has_literal(&self, literal: &str) -> bool {
        self.literal(literal).is_some()
    }

    /// Iterates through all terminal and alias matches here.
    ///
    /// The terminals come first in the registration order, followed by
    /// the aliases.
    #[inline(always)]
    pub fn leaves(&self) -> impl Iterator<Item = &Rc<Leaf<'code, V>>> + '_ {
        self.state.leaves.iter()
    }

    /// Returns the match that reaches furthest. Among equal lengths the
    /// first registered terminal wins.
    pub fn longest(&self) -> Option<Rc<Leaf<'code, V>>> {
        let mut result: Option<&Rc<Leaf<'code, V>>> = None;

        for leaf in &self.state.leaves {
            if result.map_or(true, |best| leaf.end > best.end) {
                result = Some(leaf);
            }
        }

        result.cloned()
    }

    /// Returns the context at the end of the `token`.
    #[inline(always)]
    pub fn next(&self, token: &Token<'code, V>) -> LexisContext<'session, 'code, V> {
        self.session.lexis_at(token.end())
    }

    /// Returns true if both objects refer to the same cached context.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}
