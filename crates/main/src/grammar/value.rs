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

use std::fmt::Debug;

/// A type of the values derived from the matched tokens.
///
/// The parsing engine is generic over the value type. Every leaf and node
/// of the parse forest may carry a value of this type. The grammar author
/// usually declares V as an enum, and the [Kind](Value::Kind) as its
/// field-less discriminant enum.
///
/// The value kind drives the typed argument extraction:
/// [Arguments::next_of_kind](crate::syntax::Arguments::next_of_kind) and
/// the [Cases](crate::syntax::Cases) signatures match the child values by
/// their kinds.
///
/// ```rust
/// use thicket::grammar::Value;
///
/// #[derive(Clone)]
/// enum Json {
///     Number(f64),
///     Text(String),
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum JsonKind {
///     Number,
///     Text,
/// }
///
/// impl Value for Json {
///     type Kind = JsonKind;
///
///     fn kind(&self) -> Self::Kind {
///         match self {
///             Self::Number(_) => JsonKind::Number,
///             Self::Text(_) => JsonKind::Text,
///         }
///     }
/// }
/// ```
pub trait Value: Clone + 'static {
    /// A discriminant of the value variants.
    type Kind: Copy + Eq + Debug + Send + Sync + 'static;

    /// Returns the discriminant of this value.
    fn kind(&self) -> Self::Kind;
}

macro_rules! impl_plain_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                type Kind = ();

                #[inline(always)]
                fn kind(&self) -> Self::Kind {}
            }
        )*
    };
}

impl_plain_value!((), bool, char, i32, i64, u32, u64, usize, f32, f64, String);
