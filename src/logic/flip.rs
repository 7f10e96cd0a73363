//! Reorder animation (First-Last-Invert-Play)
//!
//! When a dictionary is selected under the "selected first" sort, the rows
//! slide into their new positions instead of jumping. Positions are row
//! offsets derived from row heights, so the plan is independent of the
//! terminal backend.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::model::dictionary::DictListView;
use crate::SortMode;

use super::sorting::selected_first_order;

/// Fixed length of the slide
pub const FLIP_DURATION: Duration = Duration::from_millis(200);

/// A single-shot slide from the current order to the selected-first order
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub selected: String,
    pub original_order: Vec<String>,
    pub target_order: Vec<String>,
    /// new offset - old offset, only for rows that move
    deltas: HashMap<String, i32>,
    pub started_at: Instant,
    pub duration: Duration,
    /// List action that started the slide
    pub generation: u64,
}

/// Vertical offset of each row when laid out in `order`
pub fn row_offsets<F>(order: &[String], height_of: F) -> HashMap<String, i32>
where
    F: Fn(&str) -> u16,
{
    let mut offsets = HashMap::with_capacity(order.len());
    let mut y = 0i32;
    for name in order {
        offsets.insert(name.clone(), y);
        y += height_of(name) as i32;
    }
    offsets
}

/// Plan the slide for selecting `selected`.
///
/// Returns `None` (nothing to animate, caller continues immediately) when
/// the sort mode is not `SelectedFirst` or `selected` is not rendered.
pub fn plan_select_reorder<F>(
    view: &DictListView,
    selected: &str,
    sort_mode: SortMode,
    height_of: F,
    now: Instant,
    generation: u64,
) -> Option<Transition>
where
    F: Fn(&str) -> u16,
{
    if sort_mode != SortMode::SelectedFirst {
        return None;
    }
    if view.position(selected).is_none() {
        return None;
    }

    let names = view.names();
    let original_order: Vec<String> = names.iter().map(|n| n.to_string()).collect();

    // First: offsets in the order currently on screen
    let old = row_offsets(&original_order, &height_of);

    // Last: offsets once the selected row leads. The rows themselves are
    // not reordered until commit, so the visible frame is unchanged.
    let target_order = selected_first_order(&names, selected);
    let new = row_offsets(&target_order, &height_of);

    // Invert: remember how far each row has to travel
    let deltas = original_order
        .iter()
        .filter_map(|name| {
            let from = old.get(name)?;
            let to = new.get(name).unwrap_or(from);
            let dy = to - from;
            (dy != 0).then(|| (name.clone(), dy))
        })
        .collect();

    Some(Transition {
        selected: selected.to_string(),
        original_order,
        target_order,
        deltas,
        started_at: now,
        duration: FLIP_DURATION,
        generation,
    })
}

impl Transition {
    /// Linear progress in [0, 1]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    /// Total distance `name` travels (0 for rows that stay put)
    pub fn delta(&self, name: &str) -> i32 {
        self.deltas.get(name).copied().unwrap_or(0)
    }

    /// Rows with a non-zero delta
    pub fn moving(&self) -> impl Iterator<Item = &str> {
        self.deltas.keys().map(|k| k.as_str())
    }

    /// Play: offset to draw `name` at, relative to its original row
    pub fn offset_at(&self, name: &str, now: Instant) -> f32 {
        self.delta(name) as f32 * ease(self.progress(now))
    }

    /// Put the rows in target order. The caller drops the transition
    /// afterwards, which clears all transient offsets.
    pub fn commit(&self, view: &mut DictListView) {
        let rank: HashMap<&str, usize> = self
            .target_order
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();
        view.rows
            .sort_by_key(|row| rank.get(row.name.as_str()).copied().unwrap_or(usize::MAX));
    }
}

/// CSS `ease` timing curve, cubic-bezier(0.25, 0.1, 0.25, 1.0)
pub fn ease(t: f32) -> f32 {
    cubic_bezier(0.25, 0.1, 0.25, 1.0, t)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let bez = |p1: f32, p2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };
    let bez_dx = |s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * x1 + 6.0 * inv * s * (x2 - x1) + 3.0 * s * s * (1.0 - x2)
    };

    // Newton first, bisection if the slope is too flat
    let mut s = t;
    for _ in 0..8 {
        let err = bez(x1, x2, s) - t;
        if err.abs() < 1e-5 {
            return bez(y1, y2, s);
        }
        let d = bez_dx(s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = t;
    for _ in 0..32 {
        let x = bez(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bez(y1, y2, s)
}
