use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use typemaster::engine::achievements;
use typemaster::generator::RepeatText;
use typemaster::session::{Session, SessionMode};

fn long_reference(words: usize) -> String {
    let vocab = ["quick", "brown", "fox", "jumps", "over", "lazy", "dog", "café"];
    (0..words)
        .map(|i| vocab[i % vocab.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// A session two thirds of the way through a long passage, every tenth char wrong.
fn busy_session(reference: &str) -> Session {
    let mut session = Session::new(reference, SessionMode::Untimed);
    let mut texts = RepeatText::new(reference);
    let typed: String = reference
        .chars()
        .take(reference.chars().count() * 2 / 3)
        .enumerate()
        .map(|(i, ch)| if i % 10 == 9 { '#' } else { ch })
        .collect();
    let t0 = Instant::now();
    session.on_input("q", t0, &mut texts);
    session.on_input(&typed, t0 + Duration::from_secs(45), &mut texts);
    session
}

fn bench_snapshot(c: &mut Criterion) {
    let reference = long_reference(400);
    let session = busy_session(&reference);

    c.bench_function("snapshot (400 words)", |b| {
        b.iter(|| black_box(&session).snapshot())
    });

    c.bench_function("achievements::evaluate", |b| {
        let snap = session.snapshot();
        b.iter(|| achievements::evaluate(black_box(&snap)))
    });
}

fn bench_on_input(c: &mut Criterion) {
    let reference = long_reference(400);
    let chars: Vec<char> = reference.chars().collect();

    c.bench_function("on_input keystroke by keystroke (200 chars)", |b| {
        b.iter(|| {
            let mut session = Session::new(&reference, SessionMode::Untimed);
            let mut texts = RepeatText::new(reference.as_str());
            let t0 = Instant::now();
            let mut value = String::new();
            for (i, ch) in chars.iter().take(200).enumerate() {
                value.push(*ch);
                session.on_input(
                    black_box(&value),
                    t0 + Duration::from_millis(i as u64 * 80),
                    &mut texts,
                );
            }
            session
        })
    });
}

criterion_group!(benches, bench_snapshot, bench_on_input);
criterion_main!(benches);
