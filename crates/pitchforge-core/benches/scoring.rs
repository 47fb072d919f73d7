use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Utc;
use uuid::Uuid;

use pitchforge_core::model::{Attempt, Persona, Question, QuestionCategory, WeaknessTag};
use pitchforge_core::scoring::{score_answer, score_rebuttal};
use pitchforge_core::statistics::heatmap;

fn make_attempt(category: QuestionCategory, score: u8) -> Attempt {
    Attempt {
        id: Uuid::nil(),
        question_id: "bench".into(),
        question_text: "Why won't a big company copy you?".into(),
        category,
        score,
        words: 40,
        elapsed_secs: 35,
        answer: String::new(),
        weakness_tags: vec![WeaknessTag::Shallow, WeaknessTag::NoMetric],
        created_at: Utc::now(),
    }
}

fn bench_score_answer(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_answer");
    let question = Question {
        id: "qa-moat".into(),
        text: "Why won't a big company copy you?".into(),
        category: QuestionCategory::Moat,
    };

    let short = "our moat is focus";
    let quantified = "We grew revenue 40% this quarter because of our enterprise pilot with \
                      Acme Corp, validated by a 3x increase in retained MRR and a defensible \
                      data moat across every distribution channel we operate.";
    let rambling = quantified.repeat(4);

    group.bench_function("short", |b| {
        b.iter(|| score_answer(black_box(short), &question, 30, Persona::Balanced))
    });
    group.bench_function("quantified", |b| {
        b.iter(|| score_answer(black_box(quantified), &question, 30, Persona::SkepticalVc))
    });
    group.bench_function("rambling", |b| {
        b.iter(|| score_answer(black_box(&rambling), &question, 120, Persona::EnterpriseCfo))
    });

    group.finish();
}

fn bench_score_rebuttal(c: &mut Criterion) {
    c.bench_function("score_rebuttal", |b| {
        let objection = "Your claims sound optimistic. Show third-party evidence or customer-level proof.";
        let rebuttal = "We can show third-party evidence today: 14 reference customers and a \
                        fallback plan that mitigates concentration risk.";
        b.iter(|| score_rebuttal(black_box(rebuttal), black_box(objection)))
    });
}

fn bench_heatmap(c: &mut Criterion) {
    let categories = [
        QuestionCategory::Moat,
        QuestionCategory::Retention,
        QuestionCategory::Timing,
        QuestionCategory::Gtm,
        QuestionCategory::Financials,
        QuestionCategory::General,
    ];
    let log: Vec<Attempt> = (0..60)
        .map(|i| make_attempt(categories[i % categories.len()], 40 + (i % 50) as u8))
        .collect();

    c.bench_function("heatmap_60_attempts", |b| b.iter(|| heatmap(black_box(&log))));
}

criterion_group!(benches, bench_score_answer, bench_score_rebuttal, bench_heatmap);
criterion_main!(benches);
