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
    fmt::{Debug, Formatter},
    sync::Arc,
};

use crate::{
    grammar::{Symbol, Value},
    syntax::{Child, Node, Token},
};

pub(crate) type Resolver<V> = Arc<dyn Fn(&mut Arguments<'_, '_, V>) -> Option<V> + Send + Sync>;

pub(crate) enum ValueResolver<V: Value> {
    Function(Resolver<V>),
    Cases(Arc<Cases<V>>),
}

impl<V: Value> Clone for ValueResolver<V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        match self {
            Self::Function(function) => Self::Function(function.clone()),
            Self::Cases(cases) => Self::Cases(cases.clone()),
        }
    }
}

impl<V: Value> ValueResolver<V> {
    #[inline(always)]
    pub(crate) fn resolve(&self, arguments: &mut Arguments<'_, '_, V>) -> Option<V> {
        match self {
            Self::Function(function) => function(arguments),
            Self::Cases(cases) => cases.apply(arguments),
        }
    }
}

/// A cursor over the [Node]'s children that feeds the value resolvers.
///
/// The Arguments object provides three kinds of child lookup:
///
///  1. Positional: [token](Self::token), [value](Self::value) and
///     [text](Self::text) fetch a child by its index regardless of the cursor.
///     [values_of_kind](Self::values_of_kind) collects the values of
///     a particular kind.
///  2. Forward cursor: [next_of_kind](Self::next_of_kind),
///     [next_of](Self::next_of) and [next_value_of](Self::next_value_of) look
///     for the next unconsumed child that satisfies the condition, and move
///     the cursor right after the found child. The cursor never moves back
///     unless [reset](Self::reset) is called, so the repeated calls walk
///     through the children in order. When nothing is found the cursor stays
///     in place.
///  3. Named: [named](Self::named), [named_value](Self::named_value) and
///     [named_all](Self::named_all) look for the children bound by
///     [named](crate::grammar::Element::Named) elements. These functions
///     ignore the cursor.
///
/// The child values are computed lazily when the lookup function inspects
/// them.
pub struct Arguments<'node, 'code, V: Value> {
    node: &'node Node<'code, V>,
    cursor: usize,
}

impl<'node, 'code, V: Value> Debug for Arguments<'node, 'code, V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("Arguments")
            .field("node", self.node)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<'node, 'code, V: Value> Arguments<'node, 'code, V> {
    #[inline(always)]
    pub(crate) fn new(node: &'node Node<'code, V>) -> Self {
        Self { node, cursor: 0 }
    }

    /// The node whose value is being resolved.
    #[inline(always)]
    pub fn node(&self) -> &'node Node<'code, V> {
        self.node
    }

    /// The number of children.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.node.children().len()
    }

    /// Always false: nodes have at least one child.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.node.children().is_empty()
    }

    #[inline(always)]
    pub fn token(&self, index: usize) -> Option<&'node Token<'code, V>> {
        Some(self.children().get(index)?.token())
    }

    #[inline(always)]
    pub fn value(&self, index: usize) -> Option<&'node V> {
        self.token(index)?.value()
    }

    #[inline(always)]
    pub fn text(&self, index: usize) -> Option<&'code str> {
        Some(self.token(index)?.text())
    }

    /// The index of the next unconsumed child.
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor back to the first child.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Returns the value of the next unconsumed child whose value has
    /// the `kind` discriminant.
    pub fn next_of_kind(&mut self, kind: V::Kind) -> Option<&'node V> {
        let children = self.children();

        for index in self.cursor..children.len() {
            let Some(value) = children[index].token().value() else {
                continue;
            };

            if value.kind() == kind {
                self.cursor = index + 1;
                return Some(value);
            }
        }

        None
    }

    /// Collects the values of all children with the `kind` discriminant in
    /// order, regardless of the cursor.
    pub fn values_of_kind(&self, kind: V::Kind) -> Vec<&'node V> {
        self.children()
            .iter()
            .filter_map(|child| child.token().value())
            .filter(|value| value.kind() == kind)
            .collect()
    }

    /// Returns the next unconsumed child tagged with the `symbol`.
    pub fn next_of(&mut self, symbol: &Symbol) -> Option<&'node Token<'code, V>> {
        let children = self.children();

        for index in self.cursor..children.len() {
            let token = children[index].token();

            if token.symbol() == symbol {
                self.cursor = index + 1;
                return Some(token);
            }
        }

        None
    }

    /// Returns the value of the next unconsumed child tagged with
    /// the `symbol`.
    ///
    /// The cursor moves after the found child even if it has no value.
    #[inline(always)]
    pub fn next_value_of(&mut self, symbol: &Symbol) -> Option<&'node V> {
        self.next_of(symbol)?.value()
    }

    /// Returns the first child bound to the `label` name.
    #[inline(always)]
    pub fn named(&self, label: &str) -> Option<&'node Token<'code, V>> {
        self.named_all(label).next()
    }

    #[inline(always)]
    pub fn named_value(&self, label: &str) -> Option<&'node V> {
        self.named(label)?.value()
    }

    /// Iterates through all children bound to the `label` name in order.
    ///
    /// Repeated elements may bind many children to the same name.
    pub fn named_all<'a>(
        &self,
        label: &'a str,
    ) -> impl Iterator<Item = &'node Token<'code, V>> + 'a
    where
        'node: 'a,
        'code: 'a,
    {
        self.children()
            .iter()
            .filter(move |child| child.label() == Some(label))
            .map(Child::token)
    }

    #[inline(always)]
    fn children(&self) -> &'node [Child<'code, V>] {
        self.node.children()
    }
}

/// An ordered list of typed value transforms.
///
/// Each case is a signature of the value [kinds](Value::Kind) and
/// a transform function. The resolver tries the cases in order: for each
/// case it resets the [Arguments] cursor and looks for the signature kinds
/// one by one via [next_of_kind](Arguments::next_of_kind). The first case
/// whose entire signature is found is applied to the found values, and its
/// result is final even if the transform returns None.
///
/// If no case matches, the node has no value.
///
/// ```rust
/// use thicket::syntax::Cases;
///
/// let cases = Cases::<i64>::new()
///     .case([(), ()], |values| Some(values[0] + values[1]))
///     .case([()], |values| Some(*values[0]));
///
/// assert_eq!(cases.len(), 2);
/// ```
pub struct Cases<V: Value> {
    cases: Vec<Case<V>>,
}

struct Case<V: Value> {
    signature: Box<[V::Kind]>,
    transform: Arc<dyn Fn(&[&V]) -> Option<V> + Send + Sync>,
}

impl<V: Value> Default for Cases<V> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> Debug for Cases<V> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter
            .debug_list()
            .entries(self.cases.iter().map(|case| &case.signature))
            .finish()
    }
}

impl<V: Value> Cases<V> {
    #[inline(always)]
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Appends a case.
    pub fn case(
        mut self,
        signature: impl IntoIterator<Item = V::Kind>,
        transform: impl Fn(&[&V]) -> Option<V> + Send + Sync + 'static,
    ) -> Self {
        self.cases.push(Case {
            signature: signature.into_iter().collect(),
            transform: Arc::new(transform),
        });

        self
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub(crate) fn apply(&self, arguments: &mut Arguments<'_, '_, V>) -> Option<V> {
        'outer: for case in &self.cases {
            arguments.reset();

            let mut values = Vec::with_capacity(case.signature.len());

            for kind in case.signature.iter() {
                match arguments.next_of_kind(*kind) {
                    Some(value) => values.push(value),
                    None => continue 'outer,
                }
            }

            return (case.transform)(&values);
        }

        None
    }
}
