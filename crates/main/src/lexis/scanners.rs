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

use regex::Regex;

use crate::{
    grammar::{GrammarError, Symbol},
    lexis::{ByteIndex, Matcher},
};

// A compiled form of the Matcher.
#[derive(Clone, Debug)]
pub(crate) enum Scanner {
    Words(Box<[Box<str>]>),
    Regex(Box<[Regex]>),
    Fixed(usize),
    Join(Box<[Scanner]>),
    Repeat {
        scanner: Box<Scanner>,
        min: usize,
        max: Option<usize>,
    },
    Any(Box<[Scanner]>),
}

impl Scanner {
    pub(crate) fn compile(symbol: &Symbol, matcher: &Matcher) -> Result<Self, GrammarError> {
        match matcher {
            Matcher::Words(words) => {
                if words.is_empty() {
                    return Err(GrammarError::EmptyPattern {
                        symbol: symbol.clone(),
                    });
                }

                Ok(Self::Words(
                    words.iter().map(|word| Box::from(word.as_ref())).collect(),
                ))
            }

            Matcher::Regex(patterns) => {
                if patterns.is_empty() {
                    return Err(GrammarError::EmptyPattern {
                        symbol: symbol.clone(),
                    });
                }

                let mut compiled = Vec::with_capacity(patterns.len());

                for pattern in patterns {
                    match Regex::new(&format!("^(?:{pattern})")) {
                        Ok(regex) => compiled.push(regex),

                        Err(source) => {
                            return Err(GrammarError::InvalidRegex {
                                symbol: symbol.clone(),
                                pattern: pattern.to_string(),
                                source,
                            })
                        }
                    }
                }

                Ok(Self::Regex(compiled.into()))
            }

            Matcher::Fixed(chars) => Ok(Self::Fixed(*chars)),

            Matcher::Join(matchers) => Ok(Self::Join(Self::compile_all(symbol, matchers)?)),

            Matcher::Any(matchers) => Ok(Self::Any(Self::compile_all(symbol, matchers)?)),

            Matcher::Repeat { matcher, min, max } => {
                if let Some(max) = max {
                    if *max == 0 || max < min {
                        return Err(GrammarError::InvalidRepetition {
                            symbol: symbol.clone(),
                            min: *min,
                            max: *max,
                        });
                    }
                }

                Ok(Self::Repeat {
                    scanner: Box::new(Self::compile(symbol, matcher)?),
                    min: *min,
                    max: *max,
                })
            }
        }
    }

    fn compile_all(symbol: &Symbol, matchers: &[Matcher]) -> Result<Box<[Self]>, GrammarError> {
        if matchers.is_empty() {
            return Err(GrammarError::EmptyPattern {
                symbol: symbol.clone(),
            });
        }

        matchers
            .iter()
            .map(|matcher| Self::compile(symbol, matcher))
            .collect()
    }

    // Returns the byte length of the longest match at the beginning of `text`.
    //
    // The returned length is always a char boundary of the `text`.
    pub(crate) fn scan(&self, text: &str) -> Option<ByteIndex> {
        match self {
            Self::Words(words) => longest(
                words
                    .iter()
                    .filter(|word| text.starts_with(word.as_ref()))
                    .map(|word| word.len()),
            ),

            Self::Regex(regexes) => longest(
                regexes
                    .iter()
                    .filter_map(|regex| regex.find(text))
                    .map(|found| found.end()),
            ),

            Self::Fixed(chars) => {
                let mut count = 0;

                for (index, _) in text.char_indices() {
                    if count == *chars {
                        return Some(index);
                    }

                    count += 1;
                }

                match count == *chars {
                    true => Some(text.len()),
                    false => None,
                }
            }

            Self::Join(scanners) => {
                let mut length = 0;

                for scanner in scanners.iter() {
                    length += scanner.scan(&text[length..])?;
                }

                Some(length)
            }

            Self::Repeat { scanner, min, max } => {
                let mut length = 0;
                let mut count = 0;

                loop {
                    if let Some(max) = max {
                        if count >= *max {
                            break;
                        }
                    }

                    match scanner.scan(&text[length..]) {
                        None => break,

                        Some(0) => {
                            count = count.max(*min);
                            break;
                        }

                        Some(next) => {
                            length += next;
                            count += 1;
                        }
                    }
                }

                match count >= *min {
                    true => Some(length),
                    false => None,
                }
            }

            Self::Any(scanners) => longest(scanners.iter().filter_map(|scanner| scanner.scan(text))),
        }
    }
}

// Picks the greatest length. Among equal lengths the first one is kept.
#[inline]
fn longest(lengths: impl Iterator<Item = ByteIndex>) -> Option<ByteIndex> {
    let mut result: Option<ByteIndex> = None;

    for length in lengths {
        if result.map_or(true, |best| length > best) {
            result = Some(length);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use crate::{
        grammar::{GrammarError, Symbol},
        lexis::{scanners::Scanner, Matcher},
    };

    fn scan(matcher: Matcher, text: &str) -> Option<usize> {
        Scanner::compile(&Symbol::named("TEST"), &matcher)
            .expect("Valid matcher.")
            .scan(text)
    }

    #[test]
    fn test_words_and_regexes() {
        assert_eq!(scan(Matcher::words(["+", "++"]), "+++"), Some(2));
        assert_eq!(scan(Matcher::words(["-"]), "+"), None);
        assert_eq!(scan(Matcher::regexes(["[0-9]", r"\d+"]), "123a"), Some(3));
        assert_eq!(scan(Matcher::regex(r"\d+"), "a123"), None);
        assert_eq!(scan(Matcher::regex("a*"), "bbb"), Some(0));
    }

    #[test]
    fn test_fixed() {
        assert_eq!(scan(Matcher::fixed(2), "щщщ"), Some(4));
        assert_eq!(scan(Matcher::fixed(3), "щщщ"), Some(6));
        assert_eq!(scan(Matcher::fixed(4), "щщщ"), None);
        assert_eq!(scan(Matcher::fixed(0), ""), Some(0));
    }

    #[test]
    fn test_combinators() {
        let identifier = Matcher::join([
            Matcher::regex("[a-z]"),
            Matcher::regex("[a-z0-9]").repeat(0, None),
        ]);

        assert_eq!(scan(identifier.clone(), "abc12 + x"), Some(5));
        assert_eq!(scan(identifier, "1abc"), None);

        assert_eq!(scan(Matcher::word("ab").repeat(2, Some(3)), "abababab"), Some(6));
        assert_eq!(scan(Matcher::word("ab").repeat(2, Some(3)), "abx"), None);

        // A zero-length iteration satisfies the lower bound.
        assert_eq!(scan(Matcher::regex("x*").repeat(3, None), "yyy"), Some(0));
        assert_eq!(scan(Matcher::regex("x*").repeat(3, None), "xxy"), Some(2));

        assert_eq!(
            scan(Matcher::any([Matcher::word("if"), Matcher::regex("[a-z]+")]), "iffy"),
            Some(4),
        );
    }

    #[test]
    fn test_invalid_matchers() {
        let symbol = Symbol::named("TEST");

        assert!(matches!(
            Scanner::compile(&symbol, &Matcher::regex("(")),
            Err(GrammarError::InvalidRegex { .. }),
        ));
        assert!(matches!(
            Scanner::compile(&symbol, &Matcher::words([])),
            Err(GrammarError::EmptyPattern { .. }),
        ));
        assert!(matches!(
            Scanner::compile(&symbol, &Matcher::word("a").repeat(3, Some(2))),
            Err(GrammarError::InvalidRepetition { min: 3, max: 2, .. }),
        ));
    }
}
