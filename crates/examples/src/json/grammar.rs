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
    grammar::{Element, Grammar, GrammarError, Symbol},
    lexis::Matcher,
};

use crate::json::{value::unescape, Json};

pub const STRING: Symbol = Symbol::named("STRING");
pub const NUMBER: Symbol = Symbol::named("NUMBER");
pub const KEYWORD: Symbol = Symbol::named("KEYWORD");
pub const SCALAR: Symbol = Symbol::named("SCALAR");
pub const VALUE: Symbol = Symbol::named("VALUE");
pub const ARRAY: Symbol = Symbol::named("ARRAY");
pub const OBJECT: Symbol = Symbol::named("OBJECT");

/// Builds the JSON grammar.
///
/// ```text
/// SCALAR := STRING | NUMBER | KEYWORD
/// VALUE  := SCALAR | ARRAY | OBJECT
/// ARRAY  := "[" (VALUE ("," VALUE)*)? "]"
/// OBJECT := "{" (STRING ":" VALUE ("," STRING ":" VALUE)*)? "}"
/// ```
pub fn json_grammar() -> Result<Grammar<Json>, GrammarError> {
    Grammar::builder()
        .root(VALUE)
        .terminal(STRING)
        .pattern(Matcher::regex(r#""([^"\\\x00-\x1F]|\\.)*""#))
        .value(|text| match unescape(text) {
            Some(string) => Json::String(string),
            None => Json::Null,
        })
        .terminal(NUMBER)
        .pattern(Matcher::regex(
            r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?",
        ))
        .value(|text| Json::Number(text.parse().unwrap_or(f64::NAN)))
        .terminal(KEYWORD)
        .pattern(Matcher::words(["true", "false", "null"]))
        .value(|text| match text {
            "true" => Json::Bool(true),
            "false" => Json::Bool(false),
            _ => Json::Null,
        })
        .alias(SCALAR, [STRING, NUMBER, KEYWORD])
        .rule(VALUE)
        .pattern(elements![SCALAR])
        .pattern(elements![ARRAY])
        .pattern(elements![OBJECT])
        .value(|arguments| arguments.value(0).cloned())
        .rule(ARRAY)
        .pattern(elements![
            "[",
            Element::optional(elements![
                VALUE.bind("item"),
                Element::many(elements![",", VALUE.bind("item")]),
            ]),
            "]",
        ])
        .value(|arguments| {
            let mut items = Vec::new();

            for item in arguments.named_all("item") {
                items.push(item.value()?.clone());
            }

            Some(Json::Array(items))
        })
        .rule(OBJECT)
        .pattern(elements![
            "{",
            Element::optional(elements![
                STRING.bind("key"),
                ":",
                VALUE.bind("value"),
                Element::many(elements![",", STRING.bind("key"), ":", VALUE.bind("value")]),
            ]),
            "}",
        ])
        .value(|arguments| {
            let mut members = Vec::new();

            for (key, value) in arguments.named_all("key").zip(arguments.named_all("value")) {
                let Json::String(key) = key.value()? else {
                    return None;
                };

                members.push((key.clone(), value.value()?.clone()));
            }

            Some(Json::Object(members))
        })
        .build()
}
