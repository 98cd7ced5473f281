use criterion::{black_box, criterion_group, criterion_main, Criterion};
use life_points::models::{DateWindow, Page, PropertyValue, SourceRegistry};
use life_points::services::points::tally;
use life_points::time_utils::{add_days, format_date, parse_date};

fn benchmark_tally(c: &mut Criterion) {
    let registry = SourceRegistry::builtin();
    let end = parse_date("2024-12-31").expect("Failed to parse date");

    // A capped fetch worth of health rows spread over the last year
    let pages: Vec<Page> = (0..5_100)
        .map(|i| {
            let date = add_days(end, -(i % 365));
            Page::new(format!("p{i}"), "2024-01-01T00:00:00Z".parse().unwrap())
                .with_property("Date", PropertyValue::date(&format_date(date)))
                .with_property("光", PropertyValue::select(["A", "B", "C", "D"][i as usize % 4]))
                .with_property("歩数", PropertyValue::number((i * 37 % 15_000) as f64))
        })
        .collect();

    let week = DateWindow::new(add_days(end, -6), Some(end));
    let all_time = DateWindow::new(parse_date("2021-01-01").expect("Failed to parse date"), None);

    let mut group = c.benchmark_group("tally");

    for id in ["health_light", "health_steps"] {
        let source = registry.get(id).expect("Missing built-in source");

        group.bench_function(format!("{id}_week"), |b| {
            b.iter(|| tally(black_box(source), black_box(&pages), &week))
        });

        group.bench_function(format!("{id}_all_time"), |b| {
            b.iter(|| tally(black_box(source), black_box(&pages), &all_time))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_tally);
criterion_main!(benches);
