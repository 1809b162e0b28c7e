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
    grammar::{Element, Symbol, Value},
    lexis::{context::LexisState, LexisContext, Position},
    syntax::{rule::Alternative, Child, Node, Token},
    units::Session,
};

// Resolved symbols at one effective offset of the parsed text.
//
// A None entry is either a negative result, or the sentinel of a resolution
// in progress.
pub(crate) struct SyntaxState<'code, V: Value> {
    pub(crate) lexis: Rc<LexisState<'code, V>>,
    nodes: RefCell<HashMap<Symbol, Option<Token<'code, V>>>>,
}

impl<'code, V: Value> SyntaxState<'code, V> {
    #[inline(always)]
    pub(crate) fn new(lexis: Rc<LexisState<'code, V>>) -> Self {
        Self {
            lexis,
            nodes: RefCell::new(HashMap::new()),
        }
    }

    #[inline(always)]
    pub(crate) fn position(&self) -> Position {
        self.lexis.position
    }

    #[inline(always)]
    fn cached(&self, symbol: &Symbol) -> Option<Option<Token<'code, V>>> {
        self.nodes.borrow().get(symbol).cloned()
    }

    #[inline(always)]
    fn store(&self, symbol: &Symbol, token: Option<Token<'code, V>>) {
        let _ = self.nodes.borrow_mut().insert(symbol.clone(), token);
    }
}

/// A syntax layer lookup surface at a particular position of the parsed
/// text.
///
/// The context resolves terminal symbols through the underlying
/// [lexical context](LexisContext), and non-terminal symbols through
/// the grammar rules. Each symbol is resolved at most once per position:
/// the repeated requests return the same cached token.
///
/// A non-terminal S is resolved in three steps:
///
///  1. Before evaluation, a negative sentinel is stored for S at this
///     position. A reference to S at the same position met during
///     the evaluation sees the sentinel and fails.
///  2. The seed: every alternative that does not start with S is matched
///     element by element. The node that reaches strictly furthest is kept
///     as the current best. Among equal ends the first alternative wins.
///  3. The fixed point: every alternative that starts with S is matched
///     with the current best node substituted for its first element. When
///     an alternative reaches strictly further, its node replaces the best.
///     The passes repeat until a whole pass yields no improvement.
///
/// The final best node, or the negative result, stays in the cache.
pub struct SyntaxContext<'session, 'code, V: Value> {
    pub(crate) session: &'session Session<'code, V>,
    pub(crate) state: Rc<SyntaxState<'code, V>>,
}

impl<'session, 'code, V: Value> Clone for SyntaxContext<'session, 'code, V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            state: self.state.clone(),
        }
    }
}

impl<'session, 'code, V: Value> Debug for SyntaxContext<'session, 'code, V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("SyntaxContext")
            .field("position", &self.state.position())
            .field("resolved", &self.state.nodes.borrow().len())
            .finish()
    }
}

impl<'session, 'code, V: Value> SyntaxContext<'session, 'code, V> {
    #[inline(always)]
    pub fn position(&self) -> Position {
        self.state.position()
    }

    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.lexis().is_eof()
    }

    /// Resolves a terminal, an alias or a non-terminal `symbol` here.
    ///
    /// Returns None if the symbol does not match, or if the symbol is
    /// unknown to the grammar.
    #[inline(always)]
    pub fn token(&self, symbol: &Symbol) -> Option<Token<'code, V>> {
        self.session.resolve_in(&self.state, symbol)
    }

    #[inline(always)]
    pub fn has_symbol(&self, symbol: &Symbol) -> bool {
        self.token(symbol).is_some()
    }

    /// Checks if the text here starts with the `literal`.
    #[inline(always)]
    pub fn literal(&self, literal: &str) -> Option<Token<'code, V>> {
        self.state.lexis.literal(literal).map(Token::Leaf)
    }

    /// The underlying lexical context of the same position.
    #[inline(always)]
    pub fn lexis(&self) -> LexisContext<'session, 'code, V> {
        LexisContext {
            session: self.session,
            state: self.state.lexis.clone(),
        }
    }

    /// Returns the context at the end of the `token`.
    #[inline(always)]
    pub fn next(&self, token: &Token<'code, V>) -> SyntaxContext<'session, 'code, V> {
        self.session.syntax_at(token.end())
    }

    /// Returns true if both objects refer to the same cached context.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<'code, V: Value> Session<'code, V> {
    pub(crate) fn resolve_in(
        &self,
        state: &Rc<SyntaxState<'code, V>>,
        symbol: &Symbol,
    ) -> Option<Token<'code, V>> {
        if let Some(cached) = state.cached(symbol) {
            return cached;
        }

        let grammar = self.grammar();

        let Some(rule) = grammar.syntax.rule(symbol) else {
            return state.lexis.leaf(symbol).cloned().map(Token::Leaf);
        };

        state.store(symbol, None);

        let position = state.position();
        let mut best: Option<Rc<Node<'code, V>>> = None;

        for alternative in rule.seeds() {
            let mut children = Vec::with_capacity(alternative.elements.len());

            if self
                .match_sequence(position, &alternative.elements, &mut children)
                .is_none()
            {
                continue;
            }

            let Some(node) = self.make_node(symbol, children, alternative) else {
                continue;
            };

            if best.as_ref().map_or(true, |best| node.end() > best.end()) {
                best = Some(Rc::new(node));
            }
        }

        let Some(mut best) = best else {
            return None;
        };

        state.store(symbol, Some(Token::Node(best.clone())));

        loop {
            let mut improved = false;

            for alternative in rule.extensions() {
                let mut children = Vec::with_capacity(alternative.elements.len());

                children.push(Child::new(
                    Token::Node(best.clone()),
                    alternative.elements[0].label().cloned(),
                ));

                if self
                    .match_sequence(best.end(), &alternative.elements[1..], &mut children)
                    .is_none()
                {
                    continue;
                }

                let Some(node) = self.make_node(symbol, children, alternative) else {
                    continue;
                };

                if node.end() <= best.end() {
                    continue;
                }

                trace!(
                    "{symbol} at {position} extended from {} to {}.",
                    best.end(),
                    node.end(),
                );

                best = Rc::new(node);
                improved = true;

                state.store(symbol, Some(Token::Node(best.clone())));
            }

            if !improved {
                break;
            }
        }

        Some(Token::Node(best))
    }

    #[inline(always)]
    fn make_node(
        &self,
        symbol: &Symbol,
        children: Vec<Child<'code, V>>,
        alternative: &Alternative<V>,
    ) -> Option<Node<'code, V>> {
        Node::new(
            symbol.clone(),
            children,
            self.text(),
            alternative.resolver.clone(),
        )
    }

    // Matches the elements one by one starting from the `cursor`, and pushes
    // the matched tokens into `children`.
    //
    // Returns the position right after the last match.
    fn match_sequence(
        &self,
        mut cursor: Position,
        elements: &[Element],
        children: &mut Vec<Child<'code, V>>,
    ) -> Option<Position> {
        for element in elements {
            cursor = self.match_element(cursor, element, children)?;
        }

        Some(cursor)
    }

    fn match_element(
        &self,
        cursor: Position,
        element: &Element,
        children: &mut Vec<Child<'code, V>>,
    ) -> Option<Position> {
        match element {
            Element::Literal(literal) => {
                let leaf = self.lexis_state(cursor).literal(literal)?;
                let end = leaf.end();

                children.push(Child::new(Token::Leaf(leaf), None));

                Some(end)
            }

            Element::Symbol(symbol) | Element::Named { symbol, .. } => {
                let token = self.resolve_in(&self.syntax_state(cursor), symbol)?;
                let end = token.end();

                children.push(Child::new(token, element.label().cloned()));

                Some(end)
            }

            Element::Repeat { elements, min, max } => {
                let mut cursor = cursor;
                let mut count = 0;

                loop {
                    if let Some(max) = max {
                        if count >= *max {
                            break;
                        }
                    }

                    let mark = children.len();

                    let Some(next) = self.match_sequence(cursor, elements, children) else {
                        children.truncate(mark);
                        break;
                    };

                    if next.offset() == cursor.offset() {
                        count = count.max(*min);
                        break;
                    }

                    cursor = next;
                    count += 1;
                }

                match count >= *min {
                    true => Some(cursor),
                    false => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        elements,
        grammar::{Element, Grammar, Symbol},
        lexis::Matcher,
    };

    const DIGIT: Symbol = Symbol::named("DIGIT");
    const SUM: Symbol = Symbol::named("SUM");
    const PAIR: Symbol = Symbol::named("PAIR");
    const LIST: Symbol = Symbol::named("LIST");
    const MISSING: Symbol = Symbol::named("MISSING");

    fn grammar() -> Grammar<i64> {
        Grammar::builder()
            .root(SUM)
            .terminal(DIGIT)
            .pattern(Matcher::regex("[0-9]"))
            .value(|text| text.parse().unwrap_or_default())
            .rule(SUM)
            .pattern(elements![DIGIT])
            .value(|arguments| arguments.value(0).copied())
            .pattern(elements![SUM, "+", DIGIT])
            .value(|arguments| Some(arguments.value(0)? + arguments.value(2)?))
            .rule(PAIR)
            .pattern(elements![DIGIT, DIGIT])
            .value(|_| Some(1))
            .pattern(elements![DIGIT, DIGIT])
            .value(|_| Some(2))
            .rule(LIST)
            .pattern(elements!["[", Element::many(elements![DIGIT]), "]"])
            .value(|arguments| Some(arguments.len() as i64))
            .rule(MISSING)
            .pattern(elements![DIGIT, "?"])
            .build()
            .expect("Valid grammar.")
    }

    #[test]
    fn test_left_recursion() {
        let grammar = grammar();
        let parse = grammar.parse("1+2+3");
        let root = parse.root().unwrap();

        assert_eq!(root.span(), 0..5);
        assert_eq!(root.structure(), "(((1) + 2) + 3)");
        assert_eq!(parse.value(), Some(&6));
        assert!(parse.is_complete());
    }

    #[test]
    fn test_partial_match() {
        let grammar = grammar();
        let parse = grammar.parse("1+2+");

        assert_eq!(parse.end().offset(), 3);
        assert!(!parse.is_complete());
        assert_eq!(parse.value(), Some(&3));
    }

    #[test]
    fn test_cache_identity() {
        let grammar = grammar();
        let session = grammar.session("1+2");

        let first = session.resolve(&SUM).unwrap();
        let second = session.start().token(&SUM).unwrap();

        assert!(first.ptr_eq(&second));

        let contexts = session.syntax_contexts();

        let _ = session.resolve(&SUM);

        assert_eq!(session.syntax_contexts(), contexts);
    }

    #[test]
    fn test_first_alternative_wins_ties() {
        let grammar = grammar();
        let session = grammar.session("12");

        assert_eq!(session.resolve(&PAIR).unwrap().value(), Some(&1));
    }

    #[test]
    fn test_no_match() {
        let grammar = grammar();
        let session = grammar.session("1!");

        assert!(session.resolve(&MISSING).is_none());
        assert!(!session.start().has_symbol(&MISSING));
        assert!(session.resolve(&Symbol::named("UNDECLARED")).is_none());
        assert!(grammar.parse("").root().is_none());
    }

    #[test]
    fn test_repetition() {
        let grammar = grammar();
        let session = grammar.session("[1 2 3]");
        let list = session.resolve(&LIST).unwrap();

        assert_eq!(list.value(), Some(&5));
        assert_eq!(list.span(), 0..7);

        let session = grammar.session("[]");

        assert_eq!(session.resolve(&LIST).unwrap().value(), Some(&2));
    }
}
