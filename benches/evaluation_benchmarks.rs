//! Performance benchmarks for the Attendance Evaluation Engine.
//!
//! This benchmark suite verifies that the evaluation engine meets performance
//! targets:
//! - Single employee-day evaluation: < 100μs mean
//! - One employee, one month of punches: < 1ms mean
//! - 200 employees, one month of punches: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::api::{AppState, create_router};
use attendance_engine::evaluate::{EngineOptions, evaluate_batch};
use attendance_engine::models::{
    DateWindow, DirectoryEntry, RawPunchEntry, RawScheduleFields, ScheduleType, WorkSchedule,
};
use attendance_engine::store::MemoryStore;

use axum::{body::Body, http::Request};
use chrono::{Datelike, NaiveDate};
use tower::ServiceExt;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn window() -> DateWindow {
    DateWindow {
        start: date("2026-01-01"),
        end: date("2026-01-31"),
    }
}

/// Builds a store with `employee_count` employees, each carrying a fixed
/// schedule and a directory row whose bio field is a zero-padded token.
fn create_store(employee_count: usize) -> MemoryStore {
    let mut store = MemoryStore::default();
    for i in 0..employee_count {
        let id = format!("emp_{:04}", i);
        store.schedules.push(WorkSchedule {
            employee_id: id.clone(),
            schedule_type: ScheduleType::Fixed,
            fields: RawScheduleFields {
                start_time: Some("08:00".to_string()),
                end_time: Some("17:00".to_string()),
                break_minutes: Some(60),
                grace_minutes: Some(10),
                ..RawScheduleFields::default()
            },
            effective_from: date("2025-06-01"),
            effective_to: None,
        });
        store.directory.push(DirectoryEntry {
            id,
            full_name: format!("Employee, Bench {}", i),
            bio_field: format!("{:04},badge", i),
            office: Some("Main".to_string()),
            updated_at: date("2025-06-01").and_hms_opt(8, 0, 0).unwrap(),
        });
    }
    store
}

/// One month of two-punch weekday entries per employee.
fn create_entries(employee_count: usize) -> Vec<RawPunchEntry> {
    let mut entries = Vec::new();
    for i in 0..employee_count {
        for day in 1..=31u32 {
            let d = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
            if d.weekday().number_from_monday() > 5 {
                continue; // weekends
            }
            entries.push(RawPunchEntry {
                employee_token: format!("{:04}", i),
                date: d,
                all_times: vec!["08:03".to_string(), "17:11".to_string()],
                punches: vec![],
                source_files: vec!["device_a.dat".to_string()],
                employee_id: None,
                office: None,
            });
        }
    }
    entries
}

/// Benchmark: one employee-day through the full batch path.
///
/// Target: < 100μs mean
fn bench_single_day(c: &mut Criterion) {
    let store = create_store(1);
    let entries = vec![RawPunchEntry {
        employee_token: "0000".to_string(),
        date: date("2026-01-12"),
        all_times: vec!["08:03".to_string(), "17:11".to_string()],
        punches: vec![],
        source_files: vec![],
        employee_id: None,
        office: None,
    }];
    let options = EngineOptions::default();

    c.bench_function("single_day", |b| {
        b.iter(|| {
            let outcome =
                evaluate_batch(&store, &store, &store, &entries, window(), &options).unwrap();
            black_box(outcome)
        })
    });
}

/// Benchmark: one employee over a full month.
///
/// Target: < 1ms mean
fn bench_employee_month(c: &mut Criterion) {
    let store = create_store(1);
    let entries = create_entries(1);
    let options = EngineOptions::default();

    c.bench_function("employee_month", |b| {
        b.iter(|| {
            let outcome =
                evaluate_batch(&store, &store, &store, &entries, window(), &options).unwrap();
            black_box(outcome)
        })
    });
}

/// Benchmark: scaling across roster sizes, including one that spans
/// multiple preload chunks.
fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    let options = EngineOptions::default();

    for employee_count in [10, 50, 200, 450].iter() {
        let store = create_store(*employee_count);
        let entries = create_entries(*employee_count);

        group.throughput(Throughput::Elements(entries.len() as u64));
        group.sample_size(10);
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| {
                b.iter(|| {
                    let outcome =
                        evaluate_batch(&store, &store, &store, &entries, window(), &options)
                            .unwrap();
                    black_box(outcome)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: the full HTTP round-trip through the router.
fn bench_http_roundtrip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::in_memory(create_store(50), EngineOptions::default());
    let router = create_router(state);

    let body = serde_json::json!({
        "window": { "start": "2026-01-01", "end": "2026-01-31" },
        "entries": create_entries(50),
    })
    .to_string();

    c.bench_function("http_roundtrip_50_employees", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/evaluate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_day,
    bench_employee_month,
    bench_scaling,
    bench_http_roundtrip,
);
criterion_main!(benches);
