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

use std::collections::HashMap;

use crate::{
    grammar::{Element, Symbol, Value},
    syntax::arguments::ValueResolver,
};

pub(crate) struct Alternative<V: Value> {
    pub(crate) elements: Vec<Element>,
    pub(crate) resolver: Option<ValueResolver<V>>,

    // The first element refers to the rule's own symbol.
    pub(crate) recursive: bool,
}

pub(crate) struct SyntaxRule<V: Value> {
    pub(crate) symbol: Symbol,
    pub(crate) alternatives: Vec<Alternative<V>>,
}

impl<V: Value> SyntaxRule<V> {
    #[inline(always)]
    pub(crate) fn seeds(&self) -> impl Iterator<Item = &Alternative<V>> {
        self.alternatives
            .iter()
            .filter(|alternative| !alternative.recursive)
    }

    #[inline(always)]
    pub(crate) fn extensions(&self) -> impl Iterator<Item = &Alternative<V>> {
        self.alternatives
            .iter()
            .filter(|alternative| alternative.recursive)
    }
}

pub(crate) struct SyntaxRules<V: Value> {
    rules: Vec<SyntaxRule<V>>,
    index: HashMap<Symbol, usize>,
}

impl<V: Value> Default for SyntaxRules<V> {
    #[inline(always)]
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Value> SyntaxRules<V> {
    #[inline(always)]
    pub(crate) fn rules(&self) -> &[SyntaxRule<V>] {
        &self.rules
    }

    #[inline(always)]
    pub(crate) fn rule(&self, symbol: &Symbol) -> Option<&SyntaxRule<V>> {
        Some(&self.rules[*self.index.get(symbol)?])
    }

    #[inline(always)]
    pub(crate) fn contains(&self, symbol: &Symbol) -> bool {
        self.index.contains_key(symbol)
    }

    pub(crate) fn rule_mut(&mut self, symbol: &Symbol) -> &mut SyntaxRule<V> {
        let index = match self.index.get(symbol) {
            Some(index) => *index,

            None => {
                let index = self.rules.len();

                self.rules.push(SyntaxRule {
                    symbol: symbol.clone(),
                    alternatives: Vec::new(),
                });
                self.index.insert(symbol.clone(), index);

                index
            }
        };

        &mut self.rules[index]
    }
}
