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

use log::debug;

use crate::{
    grammar::{Grammar, Value},
    lexis::Position,
    syntax::Token,
    units::Session,
};

/// A result of the [Grammar::parse] function.
///
/// Holds the root token resolved at the beginning of the text, together
/// with the [Session] that produced it. The session stays available for
/// further lookups at arbitrary positions, such as re-entry after the root's
/// end.
///
/// The parser does not require the root to cover the entire text:
/// the trailing unconsumed text is not an error. Use
/// [is_complete](Self::is_complete) to check for the full coverage.
pub struct Parse<'code, V: Value> {
    session: Session<'code, V>,
    root: Option<Token<'code, V>>,
}

impl<'code, V: Value> Parse<'code, V> {
    pub(crate) fn new(grammar: &'code Grammar<V>, text: &'code str) -> Self {
        debug!(
            "Parsing {} bytes from {} root symbol.",
            text.len(),
            grammar.root()
        );

        let session = Session::new(grammar, text);
        let root = session.resolve(grammar.root());

        match &root {
            Some(root) => debug!(
                "Parsing finished: {} matched {}..{}, {} lexis and {} syntax contexts.",
                root.symbol(),
                root.start().offset(),
                root.end().offset(),
                session.lexis_contexts(),
                session.syntax_contexts(),
            ),

            None => debug!(
                "Parsing finished: no match, {} lexis and {} syntax contexts.",
                session.lexis_contexts(),
                session.syntax_contexts(),
            ),
        }

        Self { session, root }
    }

    #[inline(always)]
    pub fn session(&self) -> &Session<'code, V> {
        &self.session
    }

    /// The root token, or None if the root symbol does not match at the
    /// beginning of the text.
    #[inline(always)]
    pub fn root(&self) -> Option<&Token<'code, V>> {
        self.root.as_ref()
    }

    #[inline(always)]
    pub fn into_root(self) -> Option<Token<'code, V>> {
        self.root
    }

    /// The root token's value.
    #[inline(always)]
    pub fn value(&self) -> Option<&V> {
        self.root.as_ref()?.value()
    }

    /// The position right after the root token, or the text start if there
    /// is no root.
    #[inline(always)]
    pub fn end(&self) -> Position {
        match &self.root {
            Some(root) => root.end(),
            None => Position::START,
        }
    }

    /// Returns true if the root matched and only the configured whitespace
    /// follows it.
    pub fn is_complete(&self) -> bool {
        let Some(root) = &self.root else {
            return false;
        };

        let whitespace = self.session.grammar().whitespace();

        self.session.text()[root.end().offset()..]
            .chars()
            .all(|ch| whitespace.contains(&ch))
    }
}
