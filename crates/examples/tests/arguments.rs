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

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use thicket::{
    elements,
    grammar::{Element, Grammar, Symbol, Value},
    lexis::Matcher,
    syntax::Cases,
};

#[derive(Clone, Debug, PartialEq)]
enum Item {
    Int(i64),
    Text(String),
    Flag(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemKind {
    Int,
    Text,
    Flag,
}

impl Value for Item {
    type Kind = ItemKind;

    fn kind(&self) -> Self::Kind {
        match self {
            Self::Int(_) => ItemKind::Int,
            Self::Text(_) => ItemKind::Text,
            Self::Flag(_) => ItemKind::Flag,
        }
    }
}

const INT: Symbol = Symbol::named("INT");
const TEXT: Symbol = Symbol::named("TEXT");
const FLAG: Symbol = Symbol::named("FLAG");
const ATOM: Symbol = Symbol::named("ATOM");
const SEQUENCE: Symbol = Symbol::named("SEQUENCE");
const TYPED: Symbol = Symbol::named("TYPED");
const ASSIGN: Symbol = Symbol::named("ASSIGN");
const COUNTED: Symbol = Symbol::named("COUNTED");
const WORDS: Symbol = Symbol::named("WORDS");

fn grammar(calls: Arc<AtomicUsize>) -> Grammar<Item> {
    Grammar::builder()
        .root(SEQUENCE)
        .terminal(INT)
        .pattern(Matcher::regex("[0-9]+"))
        .value(|text| Item::Int(text.parse().unwrap_or_default()))
        .terminal(TEXT)
        .pattern(Matcher::regex("[a-z]+"))
        .value(|text| Item::Text(text.to_string()))
        .terminal(FLAG)
        .pattern(Matcher::words(["yes", "no"]))
        .value(|text| Item::Flag(text == "yes"))
        .alias(ATOM, [FLAG, INT, TEXT])
        .rule(SEQUENCE)
        .pattern(elements!["<", Element::many(elements![ATOM]), ">"])
        .value(|arguments| {
            let mut sum = 0;

            while let Some(Item::Int(value)) = arguments.next_of_kind(ItemKind::Int) {
                sum += value;
            }

            Some(Item::Int(sum))
        })
        .rule(TYPED)
        .pattern(elements!["[", Element::many(elements![ATOM]), "]"])
        .cases(
            Cases::<Item>::new()
                .case([ItemKind::Flag, ItemKind::Int], |values| match values {
                    [Item::Flag(true), Item::Int(value)] => Some(Item::Int(*value)),
                    _ => None,
                })
                .case([ItemKind::Text], |values| Some(values[0].clone()))
                .case([ItemKind::Int, ItemKind::Int], |values| match values {
                    [Item::Int(left), Item::Int(right)] => Some(Item::Int(left * right)),
                    _ => None,
                }),
        )
        .rule(ASSIGN)
        .pattern(elements![TEXT.bind("name"), "=", ATOM.bind("value")])
        .value(|arguments| {
            let Item::Text(name) = arguments.named_value("name")? else {
                return None;
            };

            Some(Item::Text(format!(
                "{name}:{}",
                arguments.named("value")?.text()
            )))
        })
        .rule(WORDS)
        .pattern(elements!["{", Element::many(elements![ATOM]), "}"])
        .value(|arguments| {
            let words = arguments
                .values_of_kind(ItemKind::Text)
                .into_iter()
                .filter_map(|value| match value {
                    Item::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>();

            Some(Item::Text(words.join(",")))
        })
        .rule(COUNTED)
        .pattern(elements![INT, Element::many(elements![",", INT])])
        .value(move |arguments| {
            let _ = calls.fetch_add(1, Ordering::SeqCst);

            Some(Item::Int(arguments.len() as i64))
        })
        .build()
        .unwrap()
}

#[test]
fn test_positional_arguments() {
    let grammar = grammar(Arc::default());
    let session = grammar.session("<1 abc 2>");
    let sequence = session.resolve(&SEQUENCE).unwrap();
    let node = sequence.as_node().unwrap();

    assert_eq!(node.children().len(), 5);
    assert_eq!(node.children()[1].token().symbol(), &ATOM);
    assert_eq!(node.children()[2].token().value(), Some(&Item::Text(String::from("abc"))));
    assert_eq!(node.children()[4].token().text(), ">");
    assert_eq!(sequence.value(), Some(&Item::Int(3)));
}

#[test]
fn test_forward_cursor() {
    let grammar = grammar(Arc::default());

    // Children of other kinds are skipped.
    let session = grammar.session("<yes 10 abc 20 no 30>");

    assert_eq!(session.resolve(&SEQUENCE).unwrap().value(), Some(&Item::Int(60)));

    let session = grammar.session("<>");

    assert_eq!(session.resolve(&SEQUENCE).unwrap().value(), Some(&Item::Int(0)));
}

#[test]
fn test_values_of_kind() {
    let grammar = grammar(Arc::default());
    let session = grammar.session("{a 1 bc yes d}");

    assert_eq!(
        session.resolve(&WORDS).unwrap().value(),
        Some(&Item::Text(String::from("a,bc,d"))),
    );

    let session = grammar.session("{1 no}");

    assert_eq!(
        session.resolve(&WORDS).unwrap().value(),
        Some(&Item::Text(String::new())),
    );
}

#[test]
fn test_cases() {
    let grammar = grammar(Arc::default());

    let typed = |text: &str| -> Option<Item> {
        let session = grammar.session(text);
        let token = session.resolve(&TYPED)?;

        token.value().cloned()
    };

    // The first case matches.
    assert_eq!(typed("[yes 7]"), Some(Item::Int(7)));

    // The signature kinds are found in order, skipping other children.
    assert_eq!(typed("[abc yes 3 4]"), Some(Item::Int(3)));

    // The first case matches, its None result is final.
    assert_eq!(typed("[no 3 4]"), None);

    // The first case does not match, the second one does.
    assert_eq!(typed("[3 abc]"), Some(Item::Text(String::from("abc"))));

    // Only the third case matches.
    assert_eq!(typed("[3 4]"), Some(Item::Int(12)));

    // Nothing matches.
    assert_eq!(typed("[5]"), None);
    assert_eq!(typed("[]"), None);
}

#[test]
fn test_named_arguments() {
    let grammar = grammar(Arc::default());
    let session = grammar.session("width = 100");
    let assign = session.resolve(&ASSIGN).unwrap();

    assert_eq!(assign.value(), Some(&Item::Text(String::from("width:100"))));

    let node = assign.as_node().unwrap();

    assert_eq!(node.children()[0].label(), Some("name"));
    assert_eq!(node.children()[1].label(), None);
    assert_eq!(node.children()[2].label(), Some("value"));
}

#[test]
fn test_memoized_values() {
    let calls = Arc::new(AtomicUsize::new(0));
    let grammar = grammar(calls.clone());
    let session = grammar.session("1, 2, 3");
    let counted = session.resolve(&COUNTED).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(counted.value(), Some(&Item::Int(5)));
    assert_eq!(counted.value(), Some(&Item::Int(5)));
    assert_eq!(session.resolve(&COUNTED).unwrap().value(), Some(&Item::Int(5)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
