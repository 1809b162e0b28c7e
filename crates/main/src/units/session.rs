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

use crate::{
    grammar::{Grammar, Symbol, Value},
    lexis::{context::LexisState, ByteIndex, LexisContext, Position},
    syntax::{context::SyntaxState, SyntaxContext, Token},
};

/// A memoization arena of a single parse run.
///
/// The Session owns all lexical and syntax contexts created during the run,
/// indexed by their effective byte offsets (the offsets after the whitespace
/// skip). There is at most one context per layer and offset. The contexts
/// are created on demand and freed together with the Session.
///
/// The tokens produced by the Session are reference counted, and may outlive
/// it.
///
/// The Session is a single-threaded object. Independent runs over the same
/// [Grammar] may be performed concurrently in separate threads, each with its
/// own Session.
pub struct Session<'code, V: Value> {
    grammar: &'code Grammar<V>,
    text: &'code str,
    lexis: RefCell<HashMap<ByteIndex, Rc<LexisState<'code, V>>>>,
    syntax: RefCell<HashMap<ByteIndex, Rc<SyntaxState<'code, V>>>>,
}

impl<'code, V: Value> Debug for Session<'code, V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("Session")
            .field("length", &self.text.len())
            .field("lexis_contexts", &self.lexis_contexts())
            .field("syntax_contexts", &self.syntax_contexts())
            .finish()
    }
}

impl<'code, V: Value> Session<'code, V> {
    #[inline(always)]
    pub(crate) fn new(grammar: &'code Grammar<V>, text: &'code str) -> Self {
        Self {
            grammar,
            text,
            lexis: RefCell::new(HashMap::new()),
            syntax: RefCell::new(HashMap::new()),
        }
    }

    #[inline(always)]
    pub fn grammar(&self) -> &'code Grammar<V> {
        self.grammar
    }

    /// The parsed text.
    #[inline(always)]
    pub fn text(&self) -> &'code str {
        self.text
    }

    /// The syntax context at the beginning of the text.
    #[inline(always)]
    pub fn start(&self) -> SyntaxContext<'_, 'code, V> {
        self.syntax_at(Position::START)
    }

    /// Resolves the `symbol` at the beginning of the text.
    #[inline(always)]
    pub fn resolve(&self, symbol: &Symbol) -> Option<Token<'code, V>> {
        self.start().token(symbol)
    }

    /// Returns the lexical context at the `position` after the whitespace
    /// skip.
    ///
    /// **Panic**
    ///
    /// Panics if the position is out of the text bounds.
    #[inline(always)]
    pub fn lexis_at(&self, position: Position) -> LexisContext<'_, 'code, V> {
        LexisContext {
            session: self,
            state: self.lexis_state(position),
        }
    }

    /// Returns the syntax context at the `position` after the whitespace
    /// skip.
    ///
    /// **Panic**
    ///
    /// Panics if the position is out of the text bounds.
    #[inline(always)]
    pub fn syntax_at(&self, position: Position) -> SyntaxContext<'_, 'code, V> {
        SyntaxContext {
            session: self,
            state: self.syntax_state(position),
        }
    }

    /// The number of lexical contexts created so far.
    #[inline(always)]
    pub fn lexis_contexts(&self) -> usize {
        self.lexis.borrow().len()
    }

    /// The number of syntax contexts created so far.
    #[inline(always)]
    pub fn syntax_contexts(&self) -> usize {
        self.syntax.borrow().len()
    }

    pub(crate) fn lexis_state(&self, origin: Position) -> Rc<LexisState<'code, V>> {
        let position = self.skip_whitespace(origin);

        if let Some(state) = self.lexis.borrow().get(&position.offset()) {
            return state.clone();
        }

        let state = Rc::new(LexisState::scan(
            &self.grammar.lexis,
            self.text,
            origin,
            position,
        ));

        let _ = self
            .lexis
            .borrow_mut()
            .insert(position.offset(), state.clone());

        state
    }

    pub(crate) fn syntax_state(&self, origin: Position) -> Rc<SyntaxState<'code, V>> {
        let lexis = self.lexis_state(origin);
        let offset = lexis.position.offset();

        if let Some(state) = self.syntax.borrow().get(&offset) {
            return state.clone();
        }

        let state = Rc::new(SyntaxState::new(lexis));

        let _ = self.syntax.borrow_mut().insert(offset, state.clone());

        state
    }

    fn skip_whitespace(&self, origin: Position) -> Position {
        let Some(rest) = self.text.get(origin.offset()..) else {
            panic!(
                "Position offset {} is out of the text bounds 0..{}.",
                origin.offset(),
                self.text.len(),
            );
        };

        let whitespace = self.grammar.whitespace();
        let skipped = rest.len()
            - rest
                .trim_start_matches(|ch: char| whitespace.contains(&ch))
                .len();

        origin.advance(self.text, origin.offset() + skipped)
    }
}
