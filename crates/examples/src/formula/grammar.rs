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

use std::rc::Rc;

use thicket::{
    elements,
    grammar::{Grammar, GrammarError, Symbol},
    lexis::Matcher,
    syntax::Cases,
};

use crate::formula::{Expr, FormulaKind, FormulaValue, Operator};

pub const NUMBER: Symbol = Symbol::named("NUMBER");
pub const BINARY: Symbol = Symbol::named("BINARY");
pub const UNARY: Symbol = Symbol::named("UNARY");
pub const SECTION: Symbol = Symbol::named("SECTION");
pub const FORMULA: Symbol = Symbol::named("FORMULA");

/// Builds the arithmetic formula grammar.
///
/// ```text
/// NUMBER  := decimal | binary | octal | hexadecimal
/// BINARY  := "*" | "/" | "+" | "-"
/// UNARY   := "-" | "+"
/// SECTION := NUMBER | UNARY SECTION | "(" FORMULA ")"
/// FORMULA := SECTION | FORMULA BINARY SECTION
/// ```
pub fn formula_grammar() -> Result<Grammar<FormulaValue>, GrammarError> {
    Grammar::builder()
        .root(FORMULA)
        .terminal(NUMBER)
        .pattern(Matcher::regexes([r"[1-9]\d*", r"[1-9]\d*\.\d*", r"0\.\d*"]))
        .pattern(Matcher::word("0"))
        .value(|text| FormulaValue::number(text.parse().unwrap_or(f64::NAN)))
        .pattern(Matcher::regex("0b[01]+"))
        .value(|text| FormulaValue::number(radix(&text[2..], 2)))
        .pattern(Matcher::regex("0[0-7]+"))
        .value(|text| FormulaValue::number(radix(&text[1..], 8)))
        .pattern(Matcher::regex("0x[0-9a-fA-F]+"))
        .value(|text| FormulaValue::number(radix(&text[2..], 16)))
        .terminal(BINARY)
        .pattern(Matcher::words(["*", "/", "+", "-"]))
        .value(operator)
        .terminal(UNARY)
        .pattern(Matcher::words(["-", "+"]))
        .value(operator)
        .rule(SECTION)
        .pattern(elements![NUMBER])
        .value(|arguments| arguments.value(0).cloned())
        .pattern(elements![UNARY, SECTION])
        .cases(Cases::<FormulaValue>::new().case(
            [FormulaKind::Operator, FormulaKind::Expr],
            |values| {
                Some(FormulaValue::Expr(Rc::new(Expr::Unary {
                    operator: values[0].as_operator()?,
                    operand: values[1].as_expr()?.clone(),
                })))
            },
        ))
        .pattern(elements!["(", FORMULA, ")"])
        .value(|arguments| {
            let inner = arguments.next_of_kind(FormulaKind::Expr)?.as_expr()?;

            Some(FormulaValue::Expr(Rc::new(Expr::Group(inner.clone()))))
        })
        .rule(FORMULA)
        .pattern(elements![SECTION])
        .value(|arguments| arguments.value(0).cloned())
        .pattern(elements![FORMULA, BINARY, SECTION])
        .cases(Cases::<FormulaValue>::new().case(
            [FormulaKind::Expr, FormulaKind::Operator, FormulaKind::Expr],
            |values| {
                Some(FormulaValue::Expr(Expr::binary(
                    values[1].as_operator()?,
                    values[0].as_expr()?.clone(),
                    values[2].as_expr()?.clone(),
                )))
            },
        ))
        .build()
}

fn operator(text: &str) -> FormulaValue {
    match Operator::parse(text) {
        Some(operator) => FormulaValue::Operator(operator),
        None => FormulaValue::number(f64::NAN),
    }
}

fn radix(digits: &str, radix: u32) -> f64 {
    match u64::from_str_radix(digits, radix) {
        Ok(number) => number as f64,
        Err(_) => f64::NAN,
    }
}
