use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sdmm_core::event_bus::events::model::Environment;
use sdmm_core::event_bus::events::reaction::environment::EnvironmentReset;
use sdmm_core::event_bus::events::trigger::environment::FetchOpenedEnvironment;
use sdmm_core::EventBus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn bench_post_reaction(c: &mut Criterion) {
    let bus = EventBus::new();
    let calls = Arc::new(AtomicUsize::new(0));
    for _ in 0..16 {
        let calls = calls.clone();
        bus.sign::<EnvironmentReset, _>(move |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
    }

    c.bench_function("post_reaction_16_handlers", |b| {
        b.iter(|| bus.post(black_box(EnvironmentReset)))
    });
}

fn bench_post_trigger(c: &mut Criterion) {
    let bus = EventBus::new();
    let environment = Environment::new("station", "station.dme").with_type("/obj");
    bus.sign::<FetchOpenedEnvironment, _>(move |event| {
        event.reply(environment.clone());
    });

    c.bench_function("post_trigger_with_reply", |b| {
        b.iter(|| bus.post(black_box(FetchOpenedEnvironment)))
    });
}

fn bench_post_unsubscribed(c: &mut Criterion) {
    let bus = EventBus::new();
    c.bench_function("post_without_subscribers", |b| {
        b.iter(|| bus.post(black_box(FetchOpenedEnvironment)))
    });
}

criterion_group!(
    benches,
    bench_post_reaction,
    bench_post_trigger,
    bench_post_unsubscribed
);
criterion_main!(benches);
