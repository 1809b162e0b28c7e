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

use std::{collections::HashMap, mem::take, sync::Arc};

use crate::{grammar::Symbol, lexis::scanners::Scanner};

pub(crate) type Transform<V> = Arc<dyn Fn(&str) -> V + Send + Sync>;

pub(crate) struct Candidate<V> {
    pub(crate) scanner: Scanner,
    pub(crate) transform: Option<Transform<V>>,
}

pub(crate) struct TerminalRule<V> {
    pub(crate) symbol: Symbol,
    pub(crate) candidates: Vec<Candidate<V>>,
}

pub(crate) struct AliasRule {
    pub(crate) symbol: Symbol,
    pub(crate) targets: Vec<Symbol>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AliasMark {
    Fresh,
    Visiting,
    Done,
}

// Terminals and aliases in the registration order.
pub(crate) struct LexisRules<V> {
    terminals: Vec<TerminalRule<V>>,
    terminal_index: HashMap<Symbol, usize>,
    aliases: Vec<AliasRule>,
    alias_index: HashMap<Symbol, usize>,
}

impl<V> Default for LexisRules<V> {
    #[inline(always)]
    fn default() -> Self {
        Self {
            terminals: Vec::new(),
            terminal_index: HashMap::new(),
            aliases: Vec::new(),
            alias_index: HashMap::new(),
        }
    }
}

impl<V> LexisRules<V> {
    #[inline(always)]
    pub(crate) fn terminals(&self) -> &[TerminalRule<V>] {
        &self.terminals
    }

    #[inline(always)]
    pub(crate) fn aliases(&self) -> &[AliasRule] {
        &self.aliases
    }

    #[inline(always)]
    pub(crate) fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminal_index.contains_key(symbol)
    }

    #[inline(always)]
    pub(crate) fn is_alias(&self, symbol: &Symbol) -> bool {
        self.alias_index.contains_key(symbol)
    }

    #[inline(always)]
    pub(crate) fn contains(&self, symbol: &Symbol) -> bool {
        self.is_terminal(symbol) || self.is_alias(symbol)
    }

    pub(crate) fn terminal_mut(&mut self, symbol: &Symbol) -> &mut TerminalRule<V> {
        let index = match self.terminal_index.get(symbol) {
            Some(index) => *index,

            None => {
                let index = self.terminals.len();

                self.terminals.push(TerminalRule {
                    symbol: symbol.clone(),
                    candidates: Vec::new(),
                });
                self.terminal_index.insert(symbol.clone(), index);

                index
            }
        };

        &mut self.terminals[index]
    }

    pub(crate) fn alias_mut(&mut self, symbol: &Symbol) -> &mut AliasRule {
        let index = match self.alias_index.get(symbol) {
            Some(index) => *index,

            None => {
                let index = self.aliases.len();

                self.aliases.push(AliasRule {
                    symbol: symbol.clone(),
                    targets: Vec::new(),
                });
                self.alias_index.insert(symbol.clone(), index);

                index
            }
        };

        &mut self.aliases[index]
    }

    // Reorders the aliases so that every alias follows the aliases it refers
    // to. Otherwise keeps the registration order.
    //
    // Returns the symbol of an alias on a reference cycle.
    pub(crate) fn order_aliases(&mut self) -> Result<(), Symbol> {
        let mut marks = vec![AliasMark::Fresh; self.aliases.len()];
        let mut order = Vec::with_capacity(self.aliases.len());

        for index in 0..self.aliases.len() {
            self.visit_alias(index, &mut marks, &mut order)?;
        }

        let mut aliases = take(&mut self.aliases)
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();

        self.aliases = order
            .into_iter()
            .filter_map(|index| aliases[index].take())
            .collect();

        self.alias_index = self
            .aliases
            .iter()
            .enumerate()
            .map(|(index, alias)| (alias.symbol.clone(), index))
            .collect();

        Ok(())
    }

    fn visit_alias(
        &self,
        index: usize,
        marks: &mut [AliasMark],
        order: &mut Vec<usize>,
    ) -> Result<(), Symbol> {
        match marks[index] {
            AliasMark::Done => return Ok(()),
            AliasMark::Visiting => return Err(self.aliases[index].symbol.clone()),
            AliasMark::Fresh => (),
        }

        marks[index] = AliasMark::Visiting;

        for target in &self.aliases[index].targets {
            if let Some(target) = self.alias_index.get(target) {
                self.visit_alias(*target, marks, order)?;
            }
        }

        marks[index] = AliasMark::Done;
        order.push(index);

        Ok(())
    }
}
