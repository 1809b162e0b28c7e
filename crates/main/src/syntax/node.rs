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
    borrow::Cow,
    cell::OnceCell,
    fmt::{Debug, Formatter},
    mem::replace,
    ops::Range,
    rc::Rc,
};

use crate::{
    grammar::{Symbol, Value},
    lexis::{ByteIndex, Position},
    report::th_assert,
    syntax::{arguments::ValueResolver, Arguments, Token},
};

/// A matched sequence of child tokens tagged with a non-terminal symbol.
///
/// The children are shared: the same token may appear in several competing
/// nodes during the disambiguation. The node's span starts at the first
/// child's start and ends at the last child's end.
///
/// The node's value is derived from the children by the rule alternative's
/// resolver lazily on the first [value](Self::value) access, and is memoized
/// afterwards. A node without a resolver has no value.
pub struct Node<'code, V: Value> {
    symbol: Symbol,
    children: Rc<[Child<'code, V>]>,
    text: &'code str,
    start: Position,
    end: Position,
    resolver: Option<ValueResolver<V>>,
    value: OnceCell<Option<V>>,
}

impl<'code, V: Value> Debug for Node<'code, V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        let mut debug_tuple = formatter.debug_tuple(&format!(
            "{:?}({}..{})",
            self.symbol,
            self.start.offset(),
            self.end.offset(),
        ));

        for child in self.children.iter() {
            let _ = debug_tuple.field(child);
        }

        debug_tuple.finish()
    }
}

impl<'code, V: Value> Node<'code, V> {
    // Returns None if `children` is empty.
    pub(crate) fn new(
        symbol: Symbol,
        children: Vec<Child<'code, V>>,
        source: &'code str,
        resolver: Option<ValueResolver<V>>,
    ) -> Option<Self> {
        let start = children.first()?.token.start();
        let end = children.last()?.token.end();

        th_assert!(start <= end, "Node {} children are out of order.", symbol);

        Some(Self {
            symbol,
            children: Rc::from(children),
            text: &source[start.offset()..end.offset()],
            start,
            end,
            resolver,
            value: OnceCell::new(),
        })
    }

    #[inline(always)]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[inline(always)]
    pub fn children(&self) -> &[Child<'code, V>] {
        &self.children
    }

    /// The text covered by this node, including the whitespace between
    /// the children.
    #[inline(always)]
    pub fn text(&self) -> &'code str {
        self.text
    }

    #[inline(always)]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> Position {
        self.end
    }

    #[inline(always)]
    pub fn span(&self) -> Range<ByteIndex> {
        self.start.offset()..self.end.offset()
    }

    /// Computes the value on the first call, and returns the memoized result
    /// on the subsequent calls.
    ///
    /// Before the node's own resolver runs, the not yet evaluated nodes of
    /// the leftmost descent (the first child, its first child, and so on)
    /// are evaluated bottom-up. The resolvers of long left recursive chains
    /// therefore never nest.
    pub fn value(&self) -> Option<&V> {
        if let Some(value) = self.value.get() {
            return value.as_ref();
        }

        self.evaluate_left_descent();

        self.value.get_or_init(|| self.resolve()).as_ref()
    }

    /// Returns true if the value has been computed already.
    #[inline(always)]
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    fn evaluate_left_descent(&self) {
        let mut descent = Vec::new();
        let mut next = self.children.first();

        while let Some(Child {
            token: Token::Node(node),
            ..
        }) = next
        {
            if node.is_evaluated() {
                break;
            }

            descent.push(node);
            next = node.children.first();
        }

        for node in descent.into_iter().rev() {
            let _ = node.value.get_or_init(|| node.resolve());
        }
    }

    #[inline(always)]
    fn resolve(&self) -> Option<V> {
        let resolver = self.resolver.as_ref()?;

        resolver.resolve(&mut Arguments::new(self))
    }
}

// Left recursive chains nest as deep as the number of their iterations.
// The nested nodes are detached into a heap worklist, so the drop never
// recurses.
impl<'code, V: Value> Drop for Node<'code, V> {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }

        let _ = self.value.take();

        let mut worklist = vec![replace(&mut self.children, Rc::from(Vec::new()))];

        while let Some(mut children) = worklist.pop() {
            let Some(children) = Rc::get_mut(&mut children) else {
                continue;
            };

            for child in children.iter_mut() {
                let Token::Node(node) = &mut child.token else {
                    continue;
                };

                let Some(node) = Rc::get_mut(node) else {
                    continue;
                };

                let _ = node.value.take();

                worklist.push(replace(&mut node.children, Rc::from(Vec::new())));
            }
        }
    }
}

/// A child token of the [Node] together with its binding label.
///
/// The label is set when the child was matched by a
/// [named](crate::grammar::Element::Named) element.
pub struct Child<'code, V: Value> {
    pub(crate) token: Token<'code, V>,
    pub(crate) label: Option<Cow<'static, str>>,
}

impl<'code, V: Value> Clone for Child<'code, V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            label: self.label.clone(),
        }
    }
}

impl<'code, V: Value> Debug for Child<'code, V> {
    #[inline]
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match &self.label {
            Some(label) => formatter.write_fmt(format_args!("{label}: {:?}", self.token)),
            None => Debug::fmt(&self.token, formatter),
        }
    }
}

impl<'code, V: Value> Child<'code, V> {
    #[inline(always)]
    pub(crate) fn new(token: Token<'code, V>, label: Option<Cow<'static, str>>) -> Self {
        Self { token, label }
    }

    #[inline(always)]
    pub fn token(&self) -> &Token<'code, V> {
        &self.token
    }

    #[inline(always)]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
