use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ecoquiz_core::parser::{parse_quiz_str, validate_quiz};

const SUSTAINABILITY: &str = include_str!("../../../quizzes/sustainability.toml");

fn generated_quiz(questions: usize) -> String {
    let mut s = String::from(
        "[quiz]\nid = \"generated\"\nname = \"Generated\"\n\n[[categories]]\nid = \"c\"\nlabel = \"C\"\n",
    );
    for i in 0..questions {
        s.push_str(&format!(
            "\n[[questions]]\nid = \"q{i}\"\ncategory = \"c\"\nprompt = \"Question {i}?\"\n\
             choices = [{{ label = \"low\", value = 1 }}, {{ label = \"mid\", value = 3 }}, {{ label = \"high\", value = 5 }}]\n"
        ));
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_quiz");
    let path = Path::new("bench.toml");

    group.bench_function("sustainability", |b| {
        b.iter(|| parse_quiz_str(black_box(SUSTAINABILITY), path).unwrap())
    });

    let large = generated_quiz(500);
    group.bench_function("generated/500", |b| {
        b.iter(|| parse_quiz_str(black_box(&large), path).unwrap())
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let quiz = parse_quiz_str(&generated_quiz(500), Path::new("bench.toml")).unwrap();
    c.bench_function("validate/500", |b| b.iter(|| validate_quiz(black_box(&quiz))));
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);
