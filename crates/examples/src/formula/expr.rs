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
    fmt::{Display, Formatter},
    rc::Rc,
};

use log::trace;
use thicket::grammar::Value;

/// An arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for Operator {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        })
    }
}

impl Operator {
    /// Binding strength of the binary form. Greater binds tighter.
    #[inline(always)]
    pub fn priority(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 10,
            Self::Mul | Self::Div => 11,
        }
    }

    /// Parses an operator symbol.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }
}

/// An arithmetic expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),

    Unary {
        operator: Operator,
        operand: Rc<Expr>,
    },

    Binary {
        operator: Operator,
        left: Rc<Expr>,
        right: Rc<Expr>,
    },

    /// A parenthesized expression.
    ///
    /// Groups are never restructured by the priority rebalancing.
    Group(Rc<Expr>),
}

impl Display for Expr {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Number(number) => formatter.write_fmt(format_args!("{number}")),
            Self::Unary { operator, operand } => {
                formatter.write_fmt(format_args!("{operator}{operand}"))
            }
            Self::Binary {
                operator,
                left,
                right,
            } => formatter.write_fmt(format_args!("[{left} {operator} {right}]")),
            Self::Group(inner) => formatter.write_fmt(format_args!("({inner})")),
        }
    }
}

impl Expr {
    /// Combines two operands with a binary operator.
    ///
    /// The parser always produces left-leaning chains, so when the `left`
    /// operand is a binary expression of lower priority, the new operator is
    /// pushed down into its right operand. Equal priorities stay
    /// left-associative.
    pub fn binary(operator: Operator, left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        if let Self::Binary {
            operator: inner,
            left: inner_left,
            right: inner_right,
        } = left.as_ref()
        {
            if inner.priority() < operator.priority() {
                trace!("Rebalancing {operator} under {inner}.");

                return Rc::new(Self::Binary {
                    operator: *inner,
                    left: inner_left.clone(),
                    right: Self::binary(operator, inner_right.clone(), right),
                });
            }
        }

        Rc::new(Self::Binary {
            operator,
            left,
            right,
        })
    }

    /// Computes the expression.
    ///
    /// The tree is walked with an explicit stack, so long operator chains
    /// do not exhaust the thread stack.
    pub fn evaluate(&self) -> f64 {
        enum Step<'a> {
            Visit(&'a Expr),
            Negate,
            Apply(Operator),
        }

        let mut steps = vec![Step::Visit(self)];
        let mut results = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Self::Number(number)) => results.push(*number),

                Step::Visit(Self::Unary { operator, operand }) => {
                    if *operator == Operator::Sub {
                        steps.push(Step::Negate);
                    }

                    steps.push(Step::Visit(operand.as_ref()));
                }

                Step::Visit(Self::Binary {
                    operator,
                    left,
                    right,
                }) => {
                    steps.push(Step::Apply(*operator));
                    steps.push(Step::Visit(right.as_ref()));
                    steps.push(Step::Visit(left.as_ref()));
                }

                Step::Visit(Self::Group(inner)) => steps.push(Step::Visit(inner.as_ref())),

                Step::Negate => {
                    if let Some(result) = results.last_mut() {
                        *result = -*result;
                    }
                }

                Step::Apply(operator) => {
                    let right = results.pop().unwrap_or(f64::NAN);
                    let left = results.pop().unwrap_or(f64::NAN);

                    results.push(match operator {
                        Operator::Add => left + right,
                        Operator::Sub => left - right,
                        Operator::Mul => left * right,
                        Operator::Div => left / right,
                    });
                }
            }
        }

        results.pop().unwrap_or(f64::NAN)
    }
}

/// A value of the formula grammar tokens.
#[derive(Clone, Debug, PartialEq)]
pub enum FormulaValue {
    Operator(Operator),
    Expr(Rc<Expr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormulaKind {
    Operator,
    Expr,
}

impl Value for FormulaValue {
    type Kind = FormulaKind;

    #[inline(always)]
    fn kind(&self) -> Self::Kind {
        match self {
            Self::Operator(_) => FormulaKind::Operator,
            Self::Expr(_) => FormulaKind::Expr,
        }
    }
}

impl FormulaValue {
    #[inline(always)]
    pub fn number(number: f64) -> Self {
        Self::Expr(Rc::new(Expr::Number(number)))
    }

    #[inline(always)]
    pub fn as_expr(&self) -> Option<&Rc<Expr>> {
        match self {
            Self::Expr(expr) => Some(expr),
            Self::Operator(_) => None,
        }
    }

    #[inline(always)]
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(operator) => Some(*operator),
            Self::Expr(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::formula::{Expr, Operator};

    fn number(number: f64) -> Rc<Expr> {
        Rc::new(Expr::Number(number))
    }

    #[test]
    fn test_rebalancing() {
        let sum = Expr::binary(Operator::Add, number(2.0), number(3.0));
        let product = Expr::binary(Operator::Mul, sum.clone(), number(4.0));

        assert_eq!(product.to_string(), "[2 + [3 * 4]]");
        assert_eq!(product.evaluate(), 14.0);

        let grouped = Expr::binary(Operator::Mul, Rc::new(Expr::Group(sum)), number(4.0));

        assert_eq!(grouped.to_string(), "[([2 + 3]) * 4]");
        assert_eq!(grouped.evaluate(), 20.0);

        let difference = Expr::binary(Operator::Sub, number(1.0), number(2.0));
        let difference = Expr::binary(Operator::Sub, difference, number(3.0));

        assert_eq!(difference.evaluate(), -4.0);
    }
}
