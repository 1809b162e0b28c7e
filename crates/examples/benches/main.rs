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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use thicket_examples::{formula, json};

const SEED: u64 = 154656;
static SIZES: [usize; 3] = [10, 100, 1000];

fn gen_formula(random: &mut StdRng, operands: usize, depth: usize) -> String {
    let mut result = String::new();

    for index in 0..operands {
        if index > 0 {
            result.push_str([" + ", " - ", " * ", " / "][random.gen_range(0..4)]);
        }

        match depth > 0 && random.gen_bool(0.2) {
            true => {
                let inner = random.gen_range(1..4);

                result.push('(');
                result.push_str(&gen_formula(random, inner, depth - 1));
                result.push(')');
            }

            false => result.push_str(&random.gen_range(1..1000).to_string()),
        }
    }

    result
}

fn gen_json(random: &mut StdRng, items: usize, depth: usize) -> String {
    let mut result = String::from("[");

    for index in 0..items {
        if index > 0 {
            result.push_str(", ");
        }

        match depth > 0 && random.gen_bool(0.1) {
            true => {
                let inner = random.gen_range(1..5);

                result.push_str(&format!(
                    "{{\"key{index}\": {}, \"flag\": {}}}",
                    gen_json(random, inner, depth - 1),
                    random.gen_bool(0.5),
                ));
            }

            false => match random.gen_range(0..3) {
                0 => result.push_str(&format!("{:.3}", random.gen_range(-1000.0..1000.0))),
                1 => result.push_str(&format!("\"item {index}\"")),
                _ => result.push_str("null"),
            },
        }
    }

    result.push(']');

    result
}

fn bench_formula(criterion: &mut Criterion) {
    let grammar = formula::shared_grammar().expect("Formula grammar error.");
    let mut random = StdRng::seed_from_u64(SEED);
    let mut group = criterion.benchmark_group("Formula");

    for size in SIZES {
        let text = gen_formula(&mut random, size, 3);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("Parse", size), &text, |bencher, text| {
            bencher.iter(|| {
                let parse = grammar.parse(text);

                assert!(parse.is_complete());

                parse.end()
            })
        });
        group.bench_with_input(BenchmarkId::new("Evaluate", size), &text, |bencher, text| {
            bencher.iter(|| formula::evaluate(text))
        });
    }

    group.finish();
}

fn bench_json(criterion: &mut Criterion) {
    let mut random = StdRng::seed_from_u64(SEED);
    let mut group = criterion.benchmark_group("Json");

    for size in SIZES {
        let text = gen_json(&mut random, size, 3);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("Read", size), &text, |bencher, text| {
            bencher.iter(|| {
                let document = json::read(text);

                assert!(document.is_some());

                document
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_formula, bench_json);
criterion_main!(benches);
