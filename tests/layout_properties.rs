// Property tests for column assignment and pixel/time mapping.

use std::collections::HashMap;

use chrono::{Duration, Local, TimeZone};
use proptest::prelude::*;

use quest_calendar::layout::columns::{assign_columns, SlotAssignment};
use quest_calendar::layout::coordinates::{CoordinateMapper, SNAP_MINUTES};
use quest_calendar::models::event::Event;

/// Up to twelve events on one day, each 5..=180 minutes long.
fn day_of_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0i64..1260, 5i64..=180), 1..12).prop_map(|specs| {
        let midnight = Local.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        specs
            .into_iter()
            .enumerate()
            .map(|(idx, (start_min, duration))| {
                let start = midnight + Duration::minutes(start_min);
                Event::new(
                    format!("task-{}", idx),
                    format!("Quest {}", idx),
                    start,
                    start + Duration::minutes(duration),
                )
                .unwrap()
            })
            .collect()
    })
}

/// Transitive overlap clusters, computed independently of the layout code.
fn reference_clusters(events: &[Event]) -> Vec<usize> {
    let mut cluster: Vec<usize> = (0..events.len()).collect();
    loop {
        let mut changed = false;
        for i in 0..events.len() {
            for j in 0..events.len() {
                if events[i].interval().overlaps(&events[j].interval())
                    && cluster[i] != cluster[j]
                {
                    let merged = cluster[i].min(cluster[j]);
                    cluster[i] = merged;
                    cluster[j] = merged;
                    changed = true;
                }
            }
        }
        if !changed {
            return cluster;
        }
    }
}

proptest! {
    /// Directly overlapping events never share a column.
    #[test]
    fn overlapping_events_get_distinct_columns(events in day_of_events()) {
        let layout = assign_columns(&events);

        for (i, a) in events.iter().enumerate() {
            for b in events.iter().skip(i + 1) {
                if a.interval().overlaps(&b.interval()) {
                    prop_assert_ne!(
                        layout[&a.id].column,
                        layout[&b.id].column,
                        "{} and {} overlap yet share a column",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    /// Every member of a transitive cluster reports the same column count,
    /// wide enough for the cluster's rightmost column.
    #[test]
    fn cluster_members_agree_on_total_columns(events in day_of_events()) {
        let layout = assign_columns(&events);
        let clusters = reference_clusters(&events);

        let mut widest: HashMap<usize, usize> = HashMap::new();
        for (idx, event) in events.iter().enumerate() {
            let entry = widest.entry(clusters[idx]).or_insert(0);
            *entry = (*entry).max(layout[&event.id].column + 1);
        }

        for (idx, event) in events.iter().enumerate() {
            let assignment = layout[&event.id];
            prop_assert_eq!(
                assignment.total_columns,
                widest[&clusters[idx]],
                "{} disagrees with its cluster",
                &event.id
            );
            prop_assert!(assignment.column < assignment.total_columns);
        }
    }

    /// An event overlapping nothing always gets the full row.
    #[test]
    fn isolated_events_take_full_width(events in day_of_events()) {
        let layout = assign_columns(&events);

        for (i, event) in events.iter().enumerate() {
            let isolated = events
                .iter()
                .enumerate()
                .all(|(j, other)| i == j || !event.interval().overlaps(&other.interval()));
            if isolated {
                prop_assert_eq!(
                    layout[&event.id],
                    SlotAssignment { column: 0, total_columns: 1 }
                );
            }
        }
    }

    /// Every event gets exactly one assignment.
    #[test]
    fn layout_covers_every_event(events in day_of_events()) {
        let layout = assign_columns(&events);
        prop_assert_eq!(layout.len(), events.len());
    }

    /// time→pixel→time round-trips within one snap increment at any scale.
    #[test]
    fn coordinate_round_trip_stays_within_snap(
        minute in 0u32..(24 * 60),
        pixels_per_hour in 20.0f32..240.0,
    ) {
        let mapper = CoordinateMapper::new(pixels_per_hour);
        let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(minute * 60, 0).unwrap();

        let back = mapper.y_to_time(mapper.time_to_y(time));
        let drift = (chrono::Timelike::num_seconds_from_midnight(&back) as i64
            - (minute as i64 * 60))
            .abs();
        prop_assert!(
            drift <= SNAP_MINUTES * 60,
            "{} drifted {}s at {}px/h",
            time,
            drift,
            pixels_per_hour
        );
    }

    /// Snapped deltas are always multiples of the snap increment, and
    /// mirror for negative travel.
    #[test]
    fn delta_snapping_is_symmetric_and_quantized(
        delta_y in -1440.0f32..1440.0,
        pixels_per_hour in 20.0f32..240.0,
    ) {
        let mapper = CoordinateMapper::new(pixels_per_hour);
        let minutes = mapper.delta_to_minutes(delta_y);

        prop_assert_eq!(minutes % SNAP_MINUTES, 0);
        prop_assert_eq!(minutes, -mapper.delta_to_minutes(-delta_y));
    }
}
