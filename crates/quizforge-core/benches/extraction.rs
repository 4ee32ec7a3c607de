use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::extract::{extract_quiz, parse_generated_json};
use quizforge_core::model::{Difficulty, GenerationRequest, QuestionType};

fn quiz_json(n: usize) -> String {
    let questions: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"question_text": "Question {i}?", "question_type": "multiple_choice", "options": ["A", "B", "C", "D"], "correct_answer": "B", "explanation": "Because.", "points": 1, "difficulty_level": "easy"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"title": "Bench quiz", "description": "Generated", "questions": [{}]}}"#,
        questions.join(",\n")
    )
}

fn bench_extract_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_quiz");
    let request = GenerationRequest::new(
        "Bench",
        "Any",
        "Benchmarks",
        10,
        Difficulty::Medium,
        QuestionType::ALL,
    )
    .expect("valid request");

    let plain = quiz_json(10);
    let fenced = format!("Here is your quiz:\n```json\n{plain}\n```\nGood luck!");
    let large = quiz_json(200);
    // Trailing brace in prose forces the line-recovery strategy.
    let recovery = format!("{}\nNote: }}", quiz_json(10).replace('\n', " "));

    group.bench_function("plain", |b| {
        b.iter(|| extract_quiz(black_box(&plain), black_box(&request)))
    });

    group.bench_function("fenced", |b| {
        b.iter(|| extract_quiz(black_box(&fenced), black_box(&request)))
    });

    group.bench_function("large", |b| {
        b.iter(|| extract_quiz(black_box(&large), black_box(&request)))
    });

    group.bench_function("line_recovery", |b| {
        b.iter(|| parse_generated_json(black_box(&recovery)))
    });

    group.finish();
}

criterion_group!(benches, bench_extract_quiz);
criterion_main!(benches);
