// Benchmark for the per-frame column layout.
//
// assign_columns runs every frame while a drag is active, so it has to
// stay comfortably inside a frame budget even for an absurdly dense day.

use chrono::{Duration, Local, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quest_calendar::layout::columns::assign_columns;
use quest_calendar::models::event::Event;

/// A day packed with overlapping events: starts every 7 minutes, each
/// 45 minutes long, so clusters chain across the whole morning.
fn dense_day(count: usize) -> Vec<Event> {
    let midnight = Local.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let start = midnight + Duration::minutes((idx as i64 * 7) % 1380);
            Event::new(
                format!("task-{}", idx),
                format!("Quest {}", idx),
                start,
                start + Duration::minutes(45),
            )
            .unwrap()
        })
        .collect()
}

fn bench_assign_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_columns");
    for count in [10, 50, 200] {
        let events = dense_day(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| assign_columns(black_box(events)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_assign_columns);
criterion_main!(benches);
