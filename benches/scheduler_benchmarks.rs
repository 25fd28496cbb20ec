use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use satzbau::lesson::Exercise;
use satzbau::lesson::tokens::parse_tokens;
use satzbau::session::answer::check_answer;
use satzbau::session::scheduler::MasteryQueue;

fn make_exercises(count: usize) -> Vec<Exercise> {
    let solution = ["Ich", "hätte", "gerne", "einen", "Kaffee", "mit", "Milch"];
    let distractors = ["Tee", "ohne", "Zucker"];
    (0..count)
        .map(|i| {
            Exercise::new(
                &format!("e{i}"),
                i,
                "I would like a coffee with milk",
                &solution,
                &distractors,
            )
        })
        .collect()
}

fn bench_worst_case_session(c: &mut Criterion) {
    let exercises = make_exercises(50);

    c.bench_function("mastery queue, every answer wrong (50 exercises)", |b| {
        b.iter(|| {
            let mut q = MasteryQueue::new(black_box(exercises.clone()), SmallRng::seed_from_u64(1));
            while !q.is_complete() {
                q.select_slot(0);
                q.check_answer();
                q.advance();
            }
            q.answers().len()
        })
    });
}

fn bench_check_answer(c: &mut Criterion) {
    let solution = parse_tokens("Ich, hätte, gerne, einen, Kaffee, mit, Milch");
    let submitted = parse_tokens("ich, hätte, gerne, einen, kaffee, mit, milch");

    c.bench_function("check_answer (7 tokens)", |b| {
        b.iter(|| check_answer(black_box(&submitted), black_box(&solution)))
    });
}

criterion_group!(benches, bench_worst_case_session, bench_check_answer);
criterion_main!(benches);
