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

use thicket::{
    grammar::{Grammar, Symbol},
    lexis::{Matcher, Position},
};

const PLUS: Symbol = Symbol::named("PLUS");
const A: Symbol = Symbol::named("A");
const B: Symbol = Symbol::named("B");
const AB: Symbol = Symbol::named("AB");
const WORD: Symbol = Symbol::named("WORD");
const NAME: Symbol = Symbol::named("NAME");
const PAIR: Symbol = Symbol::named("PAIR");
const BLANK: Symbol = Symbol::named("BLANK");

fn grammar() -> Grammar<i64> {
    Grammar::builder()
        .root(PLUS)
        .terminal(PLUS)
        .pattern(Matcher::word("+"))
        .value(|_| 1)
        .pattern(Matcher::regex(r"\+\+"))
        .value(|_| 2)
        .terminal(A)
        .pattern(Matcher::fixed(2))
        .value(|_| 10)
        .terminal(B)
        .pattern(Matcher::fixed(5))
        .value(|_| 20)
        .alias(AB, [A, B])
        .terminal(WORD)
        .pattern(Matcher::word("if"))
        .value(|_| 100)
        .pattern(Matcher::regex("[a-z]{2}"))
        .value(|_| 200)
        .terminal(NAME)
        .pattern(Matcher::join([
            Matcher::regex("[a-z]"),
            Matcher::regex("[a-z0-9_]").repeat(0, None),
        ]))
        .terminal(PAIR)
        .pattern(Matcher::regex("[a-z]{2}"))
        .terminal(BLANK)
        .pattern(Matcher::regex("x*"))
        .build()
        .unwrap()
}

#[test]
fn test_longest_match() {
    let grammar = grammar();
    let session = grammar.session("++");
    let leaf = session.lexis_at(Position::START).leaf(&PLUS).unwrap();

    assert_eq!(leaf.span(), 0..2);
    assert_eq!(leaf.value(), Some(&2));

    let session = grammar.session("+-");
    let leaf = session.lexis_at(Position::START).leaf(&PLUS).unwrap();

    assert_eq!(leaf.span(), 0..1);
    assert_eq!(leaf.value(), Some(&1));
}

#[test]
fn test_alias_longest_target() {
    let grammar = grammar();
    let session = grammar.session("abcdefgh");
    let context = session.lexis_at(Position::START);

    let alias = context.leaf(&AB).unwrap();
    let long = context.leaf(&B).unwrap();

    assert_eq!(alias.symbol(), &AB);
    assert_eq!(alias.span(), long.span());
    assert_eq!(alias.value(), Some(&20));

    let session = grammar.session("abc");
    let alias = session.lexis_at(Position::START).leaf(&AB).unwrap();

    assert_eq!(alias.span(), 0..2);
    assert_eq!(alias.value(), Some(&10));

    let session = grammar.session("a");

    assert!(!session.lexis_at(Position::START).has_symbol(&AB));
}

#[test]
fn test_alias_chains() {
    const OUTER: Symbol = Symbol::named("OUTER");
    const INNER: Symbol = Symbol::named("INNER");

    let grammar = Grammar::<i64>::builder()
        .root(OUTER)
        .terminal(A)
        .pattern(Matcher::word("a"))
        .value(|_| 1)
        .terminal(B)
        .pattern(Matcher::word("bbb"))
        .value(|_| 2)
        .terminal(WORD)
        .pattern(Matcher::regex("[a-z]{2}"))
        .value(|_| 3)
        .alias(OUTER, [INNER, WORD])
        .alias(INNER, [A, B])
        .build()
        .unwrap();

    let session = grammar.session("a");
    let context = session.lexis_at(Position::START);

    assert!(context.has_symbol(&INNER));
    assert_eq!(context.leaf(&OUTER).unwrap().value(), Some(&1));
    assert_eq!(context.leaf(&OUTER).unwrap().symbol(), &OUTER);

    let session = grammar.session("bbb");
    let outer = session.lexis_at(Position::START).leaf(&OUTER).unwrap();

    assert_eq!(outer.span(), 0..3);
    assert_eq!(outer.value(), Some(&2));

    let session = grammar.session("ab");
    let outer = session.lexis_at(Position::START).leaf(&OUTER).unwrap();

    assert_eq!(outer.span(), 0..2);
    assert_eq!(outer.value(), Some(&3));
    assert!(grammar.parse("bbb").is_complete());
}

#[test]
fn test_equal_length_candidates() {
    let grammar = grammar();
    let session = grammar.session("if");
    let context = session.lexis_at(Position::START);

    // Both WORD candidates match two chars. The first registered one wins.
    assert_eq!(context.leaf(&WORD).unwrap().value(), Some(&100));

    // A, WORD, NAME and PAIR all match two chars. A is registered first.
    assert_eq!(context.longest().unwrap().symbol(), &A);
    assert_eq!(context.leaf(&NAME).unwrap().text(), "if");
    assert_eq!(context.leaf(&PAIR).unwrap().value(), None);
}

#[test]
fn test_zero_width_match() {
    let grammar = grammar();
    let session = grammar.session("yyy");
    let context = session.lexis_at(Position::START);

    let blank = context.leaf(&BLANK).unwrap();

    assert_eq!(blank.span(), 0..0);
    assert_eq!(blank.text(), "");

    let session = grammar.session("");
    let context = session.lexis_at(Position::START);

    assert!(context.is_eof());
    assert!(context.has_symbol(&BLANK));
    assert!(!context.has_symbol(&PLUS));
}

#[test]
fn test_whitespace_skip() {
    let grammar = grammar();
    let text = "\t\n  if\r\n+";
    let session = grammar.session(text);

    let first = session.lexis_at(Position::START);
    let word = first.leaf(&WORD).unwrap();

    assert_eq!(first.origin(), Position::START);
    assert_eq!(first.whitespace(), "\t\n  ");
    assert_eq!(word.whitespace(), "\t\n  ");
    assert_eq!(word.span(), 4..6);
    assert_eq!((word.start().line(), word.start().column()), (2, 3));

    let second = first.next(&thicket::syntax::Token::Leaf(word));
    let plus = second.leaf(&PLUS).unwrap();

    assert_eq!(second.whitespace(), "\r\n");
    assert_eq!(plus.span(), 8..9);
    assert_eq!(plus.start().to_string(), "3:1");
    assert!(second.next(&thicket::syntax::Token::Leaf(plus)).is_eof());

    // Another request leading to the same offset reuses the context.
    let third = session.lexis_at(Position::of(text, 2));

    assert!(third.ptr_eq(&first));
    assert_eq!(third.whitespace(), "\t\n  ");
    assert_eq!(session.lexis_contexts(), 3);
}

#[test]
fn test_literals() {
    let grammar = grammar();
    let session = grammar.session("  ifx");
    let context = session.lexis_at(Position::START);

    let literal = context.literal("if").unwrap();

    assert!(literal.symbol().is_unknown());
    assert_eq!(literal.span(), 2..4);
    assert_eq!(literal.value(), None);
    assert!(std::rc::Rc::ptr_eq(&literal, &context.literal("if").unwrap()));
    assert!(context.literal("ifs").is_none());
    assert!(context.has_literal("ifx"));
    assert!(context.has_literal(""));
}

#[test]
#[should_panic]
fn test_out_of_bounds_position() {
    let grammar = grammar();
    let session = grammar.session("abc");

    let _ = session.lexis_at(Position::of("abcdef", 5));
}
