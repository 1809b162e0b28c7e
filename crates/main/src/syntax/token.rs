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
    ops::Range,
    rc::Rc,
};

use crate::{
    grammar::{Symbol, Value},
    lexis::{ByteIndex, Leaf, Position},
    syntax::Node,
};

/// A matched token of the parse forest: either a lexical [Leaf] or
/// a syntax [Node].
///
/// Tokens are cheap to clone. The clones share the same underlying object,
/// and the [ptr_eq](Self::ptr_eq) function tests this identity.
pub enum Token<'code, V: Value> {
    Leaf(Rc<Leaf<'code, V>>),
    Node(Rc<Node<'code, V>>),
}

impl<'code, V: Value> Clone for Token<'code, V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(leaf.clone()),
            Self::Node(node) => Self::Node(node.clone()),
        }
    }
}

impl<'code, V: Value> Debug for Token<'code, V> {
    #[inline]
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Leaf(leaf) => Debug::fmt(leaf, formatter),
            Self::Node(node) => Debug::fmt(node, formatter),
        }
    }
}

impl<'code, V: Value> Token<'code, V> {
    #[inline(always)]
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Leaf(leaf) => leaf.symbol(),
            Self::Node(node) => node.symbol(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> Position {
        match self {
            Self::Leaf(leaf) => leaf.start(),
            Self::Node(node) => node.start(),
        }
    }

    #[inline(always)]
    pub fn end(&self) -> Position {
        match self {
            Self::Leaf(leaf) => leaf.end(),
            Self::Node(node) => node.end(),
        }
    }

    #[inline(always)]
    pub fn span(&self) -> Range<ByteIndex> {
        self.start().offset()..self.end().offset()
    }

    #[inline(always)]
    pub fn text(&self) -> &'code str {
        match self {
            Self::Leaf(leaf) => leaf.text(),
            Self::Node(node) => node.text(),
        }
    }

    /// Returns the token's value. For nodes, the value is computed lazily.
    #[inline(always)]
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Leaf(leaf) => leaf.value(),
            Self::Node(node) => node.value(),
        }
    }

    /// Returns the [kind](Value::kind) of the token's value.
    #[inline(always)]
    pub fn kind(&self) -> Option<V::Kind> {
        self.value().map(Value::kind)
    }

    #[inline(always)]
    pub fn as_leaf(&self) -> Option<&Rc<Leaf<'code, V>>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Node(_) => None,
        }
    }

    #[inline(always)]
    pub fn as_node(&self) -> Option<&Rc<Node<'code, V>>> {
        match self {
            Self::Leaf(_) => None,
            Self::Node(node) => Some(node),
        }
    }

    /// Returns true if both tokens refer to the same object.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(this), Self::Leaf(other)) => Rc::ptr_eq(this, other),
            (Self::Node(this), Self::Node(other)) => Rc::ptr_eq(this, other),
            _ => false,
        }
    }

    /// Returns the token's subtree in the S-expression form:
    /// leaves print their text, nodes print their children in parentheses.
    ///
    /// No symbol names are printed, so two parses of the same structure
    /// produce equal strings regardless of the whitespace between tokens.
    pub fn structure(&self) -> String {
        let mut result = String::new();

        self.write_structure(&mut result);

        result
    }

    fn write_structure(&self, target: &mut String) {
        match self {
            Self::Leaf(leaf) => target.push_str(leaf.text()),

            Self::Node(node) => {
                target.push('(');

                for (index, child) in node.children().iter().enumerate() {
                    if index > 0 {
                        target.push(' ');
                    }

                    child.token().write_structure(target);
                }

                target.push(')');
            }
        }
    }
}
