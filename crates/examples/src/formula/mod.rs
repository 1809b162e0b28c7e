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

//! An arithmetic formula evaluator.
//!
//! The grammar is left recursive: `FORMULA := FORMULA BINARY SECTION`.
//! The parser produces left-leaning operator chains, and the
//! [Expr::binary] constructor rebalances them by the operator priorities.

mod expr;
mod grammar;

use log::debug;
use once_cell::sync::Lazy;
use thicket::grammar::{Grammar, GrammarError};

pub use crate::formula::{
    expr::{Expr, FormulaKind, FormulaValue, Operator},
    grammar::{formula_grammar, BINARY, FORMULA, NUMBER, SECTION, UNARY},
};

static GRAMMAR: Lazy<Result<Grammar<FormulaValue>, GrammarError>> = Lazy::new(formula_grammar);

/// The formula grammar shared by all threads.
#[inline(always)]
pub fn shared_grammar() -> Result<&'static Grammar<FormulaValue>, &'static GrammarError> {
    GRAMMAR.as_ref()
}

/// Parses and evaluates the formula.
///
/// Returns None if the text is not a complete formula.
pub fn evaluate(text: &str) -> Option<f64> {
    let grammar = shared_grammar().ok()?;
    let parse = grammar.parse(text);

    if !parse.is_complete() {
        debug!("Formula {text:?} is incomplete at {}.", parse.end());
        return None;
    }

    let expr = parse.value()?.as_expr()?;

    debug!("Evaluating {expr}.");

    Some(expr.evaluate())
}
