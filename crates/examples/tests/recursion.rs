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
    elements,
    grammar::{Element, Grammar, Symbol},
    lexis::Matcher,
};

const ID: Symbol = Symbol::named("ID");
const BLANK: Symbol = Symbol::named("BLANK");
const CALL: Symbol = Symbol::named("CALL");
const PATH: Symbol = Symbol::named("PATH");
const LIST: Symbol = Symbol::named("LIST");
const TAIL: Symbol = Symbol::named("TAIL");
const PADDED: Symbol = Symbol::named("PADDED");
const BROKEN: Symbol = Symbol::named("BROKEN");
const ROOT: Symbol = Symbol::named("ROOT");

fn grammar() -> Grammar<usize> {
    Grammar::builder()
        .root(ROOT)
        .terminal(ID)
        .pattern(Matcher::regex("[a-z]+"))
        .value(|text| text.len())
        .terminal(BLANK)
        .pattern(Matcher::regex("_*"))
        // PATH := ID | PATH "." ID | PATH "::" ID
        .rule(PATH)
        .pattern(elements![ID])
        .value(|_| Some(1))
        .pattern(elements![PATH, ".", ID])
        .pattern(elements![PATH, "::", ID])
        .value(|arguments| Some(arguments.value(0)? + 1))
        // CALL := PATH | PATH "(" ")" | CALL "(" ")"
        .rule(CALL)
        .pattern(elements![PATH])
        .pattern(elements![PATH, "(", ")"])
        .pattern(elements![CALL, "(", ")"])
        // LIST := ID TAIL?, TAIL := "," LIST
        .rule(LIST)
        .pattern(elements![ID, Element::optional(elements![TAIL])])
        .value(|arguments| Some(1 + arguments.value(1).copied().unwrap_or(0)))
        .rule(TAIL)
        .pattern(elements![",", LIST])
        .value(|arguments| arguments.value(1).copied())
        // PADDED := BLANK* ID
        .rule(PADDED)
        .pattern(elements![Element::many(elements![BLANK]), ID])
        .value(|arguments| Some(arguments.len()))
        .rule(BROKEN)
        .pattern(elements![ID, "!"])
        .pattern(elements![BROKEN, "?"])
        .rule(ROOT)
        .pattern(elements![CALL])
        .pattern(elements![LIST])
        .build()
        .unwrap()
}

#[test]
fn test_left_recursion_terminates() {
    let grammar = grammar();
    let session = grammar.session("a.bc::d.e");
    let path = session.resolve(&PATH).unwrap();

    assert_eq!(path.span(), 0..9);
    assert_eq!(path.value(), Some(&4));
    assert_eq!(path.structure(), "((((a) . bc) :: d) . e)");
}

#[test]
fn test_long_left_recursion() {
    let text = vec!["a"; 10_000].join(".");

    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            let grammar = grammar();
            let session = grammar.session(&text);
            let path = session.resolve(&PATH)?;
            let span = path.span();
            let value = path.value().copied();

            drop(path);
            drop(session);

            Some((span, value))
        })
        .unwrap();

    assert_eq!(handle.join().unwrap(), Some((0..19_999, Some(10_000))));
}

#[test]
fn test_longest_alternative() {
    let grammar = grammar();
    let session = grammar.session("a.b()()");
    let call = session.resolve(&CALL).unwrap();

    assert_eq!(call.span(), 0..7);
    assert_eq!(call.structure(), "((((a) . b) ( )) ( ))");

    let session = grammar.session("a.b()(");

    assert_eq!(session.resolve(&CALL).unwrap().span(), 0..5);
}

#[test]
fn test_right_recursion() {
    let grammar = grammar();
    let session = grammar.session("a, b, c");
    let list = session.resolve(&LIST).unwrap();

    assert_eq!(list.span(), 0..7);
    assert_eq!(list.value(), Some(&3));
}

#[test]
fn test_zero_width_repetition() {
    let grammar = grammar();

    let session = grammar.session("abc");
    let padded = session.resolve(&PADDED).unwrap();

    // The zero-width BLANK is matched once, then the repetition stops.
    assert_eq!(padded.span(), 0..3);
    assert_eq!(padded.value(), Some(&2));

    let session = grammar.session("__abc");
    let padded = session.resolve(&PADDED).unwrap();

    assert_eq!(padded.span(), 0..5);
    assert_eq!(padded.value(), Some(&3));
}

#[test]
fn test_failure_propagation() {
    let grammar = grammar();
    let session = grammar.session("abc?");

    assert!(session.resolve(&BROKEN).is_none());
    assert!(!session.start().has_symbol(&BROKEN));
    assert!(session.resolve(&BROKEN).is_none());

    let session = grammar.session("abc!??");
    let broken = session.resolve(&BROKEN).unwrap();

    assert_eq!(broken.span(), 0..6);
    assert_eq!(broken.value(), None);

    let parse = grammar.parse("123");

    assert!(parse.root().is_none());
    assert!(parse.value().is_none());
    assert_eq!(parse.end().offset(), 0);
}

#[test]
fn test_context_reentry() {
    let grammar = grammar();
    let parse = grammar.parse("a.b x.y.z");
    let root = parse.root().unwrap();

    assert_eq!(root.span(), 0..3);
    assert!(!parse.is_complete());

    let next = parse.session().start().next(root);

    assert_eq!(next.position().offset(), 4);
    assert_eq!(next.lexis().whitespace(), " ");

    let path = next.token(&PATH).unwrap();

    assert_eq!(path.span(), 4..9);
    assert_eq!(path.value(), Some(&3));
    assert!(next.next(&path).is_eof());
}

#[test]
fn test_lazy_values() {
    let grammar = grammar();
    let session = grammar.session("a.b.c");
    let path = session.resolve(&PATH).unwrap();
    let node = path.as_node().unwrap();

    assert!(!node.is_evaluated());
    assert_eq!(node.value(), Some(&3));
    assert!(node.is_evaluated());

    let inner = node.children()[0].token().as_node().unwrap();

    assert!(inner.is_evaluated());
}
