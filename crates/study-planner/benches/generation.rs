use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use study_planner::{
    generate_multi_week_plan, generate_slot_sync, AvailabilitySlot, MultiWeekRequest, Resource,
    Section, SessionRecord, SlotSyncRequest,
};

fn sections(count: usize) -> Vec<Section> {
    (0..count)
        .map(|i| {
            Section::new(format!("Chapter {i}"), Some(20 + (i as u32 % 7) * 15), i as i32)
                .with_topics([format!("read {i}"), format!("exercises {i}")])
        })
        .collect()
}

fn weekly_slots() -> Vec<AvailabilitySlot> {
    ["Monday", "Tuesday", "Thursday", "Saturday", "Sunday"]
        .iter()
        .map(|day| AvailabilitySlot::new(*day, "19:00", "20:00", 60))
        .collect()
}

fn bench_multi_week(c: &mut Criterion) {
    let request = MultiWeekRequest {
        goal_id: "bench".into(),
        sections: sections(500),
        slots: weekly_slots(),
        weekly_hours: 5.0,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    };
    c.bench_function("multi_week_500_sections", |b| {
        b.iter(|| generate_multi_week_plan(black_box(&request)))
    });
}

fn bench_slot_sync(c: &mut Criterion) {
    let existing: Vec<SessionRecord> = (0..250)
        .map(|i| SessionRecord {
            topic: format!("Chapter {i}"),
            duration_minutes: 60,
        })
        .collect();
    let request = SlotSyncRequest {
        new_slots: weekly_slots(),
        resource: Resource {
            title: "bench".into(),
            sections: sections(500),
        },
        completed_section_titles: Default::default(),
        existing_sessions: existing,
    };
    c.bench_function("slot_sync_250_history", |b| {
        b.iter(|| generate_slot_sync(black_box(&request)))
    });
}

criterion_group!(benches, bench_multi_week, bench_slot_sync);
criterion_main!(benches);
