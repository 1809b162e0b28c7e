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

// Checks an internal invariant in debug builds.
macro_rules! th_assert {
    ($assertion:expr, $($message:tt)+) => {
        #[cfg(debug_assertions)]
        {
            if !$assertion {
                $crate::report::system_panic!($($message)+);
            }
        }
    };
}

// Reports an engine bug unless the thread is unwinding already.
macro_rules! system_panic {
    ($($message:tt)+) => {
        if !::std::thread::panicking() {
            ::std::panic!(
                "{}",
                $crate::report::error_message!(::std::format!($($message)+)),
            );
        }
    };
}

macro_rules! error_message {
    ($message:expr) => {
        ::std::format!(
            " !! THICKET INTERNAL ERROR\n !! {}\n !! at {}:{}\n",
            $message,
            ::std::file!(),
            ::std::line!(),
        )
    };
}

pub(crate) use error_message;
pub(crate) use system_panic;
pub(crate) use th_assert;
