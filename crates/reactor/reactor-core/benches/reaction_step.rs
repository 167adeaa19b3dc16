use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reactor_core::{
    Animation, Ease, LoopType, PlayDirection, Reaction, ReactionSettings, Reactor, TickDelta, Vec3,
};

const FRAME: f32 = 1.0 / 60.0;
const REACTION_COUNTS: &[usize] = &[16, 256];

fn looping_settings(i: usize) -> ReactionSettings {
    ReactionSettings::new(0.5 + (i % 7) as f32 * 0.1)
        .with_loops(-1)
        .with_loop_type(LoopType::PingPong)
        .with_ease(Ease::ALL[i % Ease::ALL.len()])
}

fn build_reactor(count: usize) -> Reactor {
    let mut reactor = Reactor::default();
    let mut anim = Animation::new("bench");
    for i in 0..count {
        let reaction = Reaction::between(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), looping_settings(i))
            .expect("valid settings");
        anim.add_reaction(format!("r{i}"), reaction)
            .expect("unique name");
    }
    let id = reactor.add_animation(anim);
    if let Some(anim) = reactor.animation_mut(id) {
        anim.play(PlayDirection::Forward);
    }
    reactor
}

fn bench_single_reaction(c: &mut Criterion) {
    let mut reaction =
        Reaction::between(0.0f32, 1.0, looping_settings(3)).expect("valid settings");
    reaction.play(PlayDirection::Forward);
    let delta = TickDelta::uniform(FRAME);
    c.bench_function("reaction_advance_f32", |b| {
        b.iter(|| {
            reaction.advance(black_box(&delta));
            black_box(reaction.current_value())
        })
    });
}

fn bench_reactor_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("reactor_advance");
    for &count in REACTION_COUNTS {
        let mut reactor = build_reactor(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(reactor.advance(TickDelta::uniform(FRAME)).events.len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_reaction, bench_reactor_tick);
criterion_main!(benches);
