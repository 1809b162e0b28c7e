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

use thicket_examples::json::{read, shared_grammar, Json, ARRAY, OBJECT, SCALAR, STRING, VALUE};

#[test]
fn test_scalars() {
    assert_eq!(read("null"), Some(Json::Null));
    assert_eq!(read("true"), Some(Json::Bool(true)));
    assert_eq!(read(" false "), Some(Json::Bool(false)));
    assert_eq!(read("-12.5e1"), Some(Json::Number(-125.0)));
    assert_eq!(read("0"), Some(Json::Number(0.0)));
    assert_eq!(read(r#""text""#), Some(Json::String(String::from("text"))));
    assert_eq!(read(r#""true""#), Some(Json::String(String::from("true"))));
}

#[test]
fn test_scalar_alias() {
    let grammar = shared_grammar().unwrap();
    let session = grammar.session(r#""key""#);
    let lexis = session.start().lexis();

    let scalar = lexis.leaf(&SCALAR).unwrap();
    let string = lexis.leaf(&STRING).unwrap();

    assert_eq!(scalar.symbol(), &SCALAR);
    assert_eq!(scalar.span(), string.span());
    assert_eq!(scalar.value(), string.value());

    let value = session.resolve(&VALUE).unwrap();
    let node = value.as_node().unwrap();

    assert_eq!(node.children().len(), 1);
    assert_eq!(node.children()[0].token().symbol(), &SCALAR);
}

#[test]
fn test_escapes() {
    assert_eq!(
        read(r#""line\nbreak \"quoted\" A""#),
        Some(Json::String(String::from("line\nbreak \"quoted\" A"))),
    );
    assert_eq!(read("\"raw\ttab\""), None);
}

#[test]
fn test_containers() {
    assert_eq!(read("[]"), Some(Json::Array(Vec::new())));
    assert_eq!(read("{ }"), Some(Json::Object(Vec::new())));

    assert_eq!(
        read("[1, [2, []], null]"),
        Some(Json::Array(vec![
            Json::Number(1.0),
            Json::Array(vec![Json::Number(2.0), Json::Array(Vec::new())]),
            Json::Null,
        ])),
    );

    let document = read(
        r#"{
            "name": "thicket",
            "tags": ["parser", "memo"],
            "nested": {"depth": 2, "flag": true},
            "name": "duplicate"
        }"#,
    )
    .unwrap();

    assert_eq!(document.get("name").and_then(Json::as_str), Some("duplicate"));
    assert_eq!(
        document.get("tags"),
        Some(&Json::Array(vec![
            Json::String(String::from("parser")),
            Json::String(String::from("memo")),
        ])),
    );
    assert_eq!(
        document
            .get("nested")
            .and_then(|nested| nested.get("depth"))
            .and_then(Json::as_f64),
        Some(2.0),
    );
    assert_eq!(document.get("missing"), None);

    let Json::Object(members) = &document else {
        panic!("Not an object.");
    };

    assert_eq!(members.len(), 4);
}

#[test]
fn test_nodes() {
    let grammar = shared_grammar().unwrap();
    let parse = grammar.parse(r#"{"a": [1, 2]}"#);

    assert!(parse.is_complete());

    let root = parse.root().unwrap();

    assert_eq!(root.symbol(), &VALUE);
    assert_eq!(root.structure(), r#"(({ "a" : (([ (1) , (2) ])) }))"#);

    let object = root.as_node().unwrap().children()[0].token().clone();

    assert_eq!(object.symbol(), &OBJECT);

    let array = parse
        .session()
        .syntax_at(object.as_node().unwrap().children()[3].token().start())
        .token(&ARRAY);

    assert_eq!(array.map(|array| array.span()), Some(6..12));
}

#[test]
fn test_incomplete_documents() {
    assert_eq!(read(""), None);
    assert_eq!(read("[1, 2"), None);
    assert_eq!(read("[1,]"), None);
    assert_eq!(read(r#"{"a" 1}"#), None);
    assert_eq!(read(r#"{"a": 1,}"#), None);
    assert_eq!(read("{1: 2}"), None);
    assert_eq!(read("01"), None);
    assert_eq!(read("nul"), None);
    assert_eq!(read("[] []"), None);
}
