// Copyright 2020 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! pgdecimal benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pgdecimal::Numeric;

fn parse(s: &str) -> Numeric {
    s.parse().unwrap()
}

fn parse_benchmark(c: &mut Criterion) {
    c.bench_function("parse_nan", |b| {
        b.iter(|| {
            let _n = parse(black_box("NaN"));
        })
    });
    c.bench_function("parse_int", |b| {
        b.iter(|| {
            let _n = parse(black_box("18446744073709551615"));
        })
    });
    c.bench_function("parse_decimal", |b| {
        b.iter(|| {
            let _n = parse(black_box("12345678901.23456789"));
        })
    });
}

fn to_string_benchmark(c: &mut Criterion) {
    let val = parse("12345678901.23456789");
    c.bench_function("to_string", |b| {
        b.iter(|| {
            let _s = black_box(&val).to_string();
        })
    });
}

fn arithmetic_benchmark(c: &mut Criterion) {
    let x = parse("12345678901.23456789");
    let y = parse("87654321098.87654321");

    c.bench_function("add", |b| {
        b.iter(|| {
            let _n = black_box(&x) + black_box(&y);
        })
    });
    c.bench_function("sub", |b| {
        b.iter(|| {
            let _n = black_box(&x) - black_box(&y);
        })
    });
    c.bench_function("mul", |b| {
        b.iter(|| {
            let _n = black_box(&x) * black_box(&y);
        })
    });
    c.bench_function("div", |b| {
        b.iter(|| {
            let _n = black_box(&x) / black_box(&y);
        })
    });
    c.bench_function("rem", |b| {
        b.iter(|| {
            let _n = black_box(&x) % black_box(&y);
        })
    });
    c.bench_function("neg", |b| {
        b.iter(|| {
            let _n = -black_box(&x);
        })
    });
}

fn cmp_benchmark(c: &mut Criterion) {
    let x = parse("12345678901.23456789");
    let y = parse("12345678901.23456788");
    c.bench_function("cmp", |b| {
        b.iter(|| {
            let _r = black_box(&x) < black_box(&y);
        })
    });
}

fn convert_benchmark(c: &mut Criterion) {
    c.bench_function("from_i64", |b| {
        b.iter(|| {
            let _n = Numeric::from(black_box(1234567890123456789i64));
        })
    });

    let val = parse("1234567890123456789");
    c.bench_function("to_i64", |b| {
        b.iter(|| {
            let _v = black_box(&val).to_i64();
        })
    });
}

fn binary_benchmark(c: &mut Criterion) {
    let val = parse("12345678901.23456789");
    c.bench_function("to_binary", |b| {
        b.iter(|| {
            let _bytes = black_box(&val).to_binary();
        })
    });

    let bytes = val.to_binary();
    c.bench_function("from_binary", |b| {
        b.iter(|| {
            let _n = Numeric::from_binary(black_box(&bytes)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    parse_benchmark,
    to_string_benchmark,
    arithmetic_benchmark,
    cmp_benchmark,
    convert_benchmark,
    binary_benchmark,
);
criterion_main!(benches);
