//! Column assignment for overlapping events on one day.
//!
//! Given the events that intersect a rendered day, assigns each a column
//! index and a column count so that overlapping events render side-by-side
//! without visual collision. The column count is shared across a whole
//! transitively-overlapping cluster, so the day's width divides evenly among
//! every event that conflicts with the cluster, directly or indirectly.
//!
//! Both passes are O(n²) in the number of same-day events. A single day
//! holds tens of events at most, so the constant factors of a sweep-line
//! never pay for themselves here (see the layout benchmark).

use std::collections::HashMap;

use crate::models::event::Event;
use crate::models::interval::TimeInterval;

/// Horizontal placement of one event within its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    /// Zero-based column index.
    pub column: usize,
    /// Column count for the event's overlap cluster, always ≥ 1.
    pub total_columns: usize,
}

impl SlotAssignment {
    /// Fractional `(left, width)` within the day column, both in `0.0..=1.0`.
    pub fn geometry(&self) -> (f32, f32) {
        let width = 1.0 / self.total_columns as f32;
        (self.column as f32 * width, width)
    }
}

/// Assign columns to every event of one day.
///
/// Events are placed first-fit in start order, with longer events winning
/// ties so they take the leftmost columns. Sub-minimum durations are clamped
/// up for the overlap test only, so zero-width slivers still claim a column.
pub fn assign_columns(events: &[Event]) -> HashMap<String, SlotAssignment> {
    if events.is_empty() {
        return HashMap::new();
    }

    let mut order: Vec<(usize, TimeInterval)> = events
        .iter()
        .enumerate()
        .map(|(idx, event)| (idx, event.interval().clamped_for_layout()))
        .collect();
    order.sort_by(|(_, a), (_, b)| {
        a.start
            .cmp(&b.start)
            .then(b.duration().cmp(&a.duration()))
    });

    // First-fit packing: each column remembers the intervals placed in it.
    let mut columns: Vec<Vec<TimeInterval>> = Vec::new();
    let mut assigned: Vec<usize> = vec![0; events.len()];

    for (idx, interval) in &order {
        let slot = columns
            .iter()
            .position(|occupants| occupants.iter().all(|placed| !interval.overlaps(placed)));

        let column = match slot {
            Some(column) => column,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };
        columns[column].push(*interval);
        assigned[*idx] = column;
    }

    // Second pass: group transitively-overlapping events so the whole
    // cluster reports the same column count.
    let cluster = overlap_clusters(&order);
    let mut widest: HashMap<usize, usize> = HashMap::new();
    for (idx, _) in &order {
        let entry = widest.entry(cluster[*idx]).or_insert(0);
        *entry = (*entry).max(assigned[*idx] + 1);
    }

    events
        .iter()
        .enumerate()
        .map(|(idx, event)| {
            (
                event.id.clone(),
                SlotAssignment {
                    column: assigned[idx],
                    total_columns: widest[&cluster[idx]],
                },
            )
        })
        .collect()
}

/// Connected components of the direct-overlap graph, via union-find.
fn overlap_clusters(order: &[(usize, TimeInterval)]) -> Vec<usize> {
    let capacity = order.iter().map(|(idx, _)| idx + 1).max().unwrap_or(0);
    let mut parent: Vec<usize> = (0..capacity).collect();

    fn root(parent: &mut [usize], mut node: usize) -> usize {
        while parent[node] != node {
            parent[node] = parent[parent[node]];
            node = parent[node];
        }
        node
    }

    for (i, (a_idx, a)) in order.iter().enumerate() {
        for (b_idx, b) in order.iter().skip(i + 1) {
            // Sorted by start, so once b starts after a ends nothing
            // later can overlap a either.
            if b.start >= a.end {
                break;
            }
            if a.overlaps(b) {
                let ra = root(&mut parent, *a_idx);
                let rb = root(&mut parent, *b_idx);
                parent[ra] = rb;
            }
        }
    }

    (0..capacity).map(|idx| root(&mut parent, idx)).collect()
}
