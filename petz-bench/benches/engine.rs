//! PETZ engine benchmarks.
//!
//! Targets:
//!   normalize_partial_record ......... < 1μs
//!   tick_single ...................... < 1μs
//!   action_feed ...................... < 1μs
//!   tick_run_1000 .................... < 1ms

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use petz_core::{Action, PetState, PetStatus, RawState, apply_tick, normalize};

fn partial_record() -> RawState {
    RawState::from_value(&serde_json::json!({
        "hunger": 42.5,
        "mood": "not a number",
        "energy": 130,
        "status": "playing",
        "playingProgress": 3.4,
        "passThrough": 1,
    }))
}

fn bench_normalize(c: &mut Criterion) {
    let raw = partial_record();
    c.bench_function("normalize_partial_record", |b| {
        b.iter(|| black_box(normalize(black_box(&raw))));
    });
}

fn bench_tick(c: &mut Criterion) {
    let states = [
        PetState::default(),
        PetState { status: PetStatus::Eating, eating_duration: 2, feeding_progress: 60.0, ..PetState::default() },
        PetState { status: PetStatus::Sleeping, energy: 30.0, ..PetState::default() },
        PetState { status: PetStatus::Foraging, satiation: 20.0, ..PetState::default() },
    ];
    c.bench_function("tick_single", |b| {
        b.iter(|| {
            for s in &states {
                black_box(apply_tick(black_box(s)));
            }
        });
    });
}

fn bench_actions(c: &mut Criterion) {
    let s = PetState::default();
    c.bench_function("action_feed", |b| {
        b.iter(|| black_box(Action::Feed.apply(black_box(&s))));
    });
}

/// A thousand ticks with an action every fifty, the way a long session runs.
fn bench_tick_run(c: &mut Criterion) {
    let actions = [Action::Feed, Action::Play, Action::Sleep];
    c.bench_function("tick_run_1000", |b| {
        b.iter(|| {
            let mut state = PetState::default();
            for i in 0..1000_usize {
                if i % 50 == 0 {
                    state = actions[(i / 50) % actions.len()].apply(&state).into_state();
                }
                state = apply_tick(&state).into_state();
            }
            black_box(state)
        });
    });
}

criterion_group!(benches, bench_normalize, bench_tick, bench_actions, bench_tick_run);
criterion_main!(benches);
