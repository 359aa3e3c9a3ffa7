//! Sample history for graph fields.
//!
//! A single [`GraphCache`] is shared by every graph on the display; only the
//! graph currently on screen samples into it. [`GraphSlot`] records which
//! graph owns the cache so switching to a different graph starts from an
//! empty history.

use crate::config::GRAPH_MAX_POINTS;
use crate::field::FieldId;

/// Ring buffer of the most recent samples plus their running extremes.
pub struct GraphCache {
    points: [i32; GRAPH_MAX_POINTS],
    /// Oldest sample.
    start: usize,
    /// Number of stored samples.
    len: usize,
    min_val: i32,
    max_val: i32,
}

impl GraphCache {
    pub const fn new() -> Self {
        Self {
            points: [0; GRAPH_MAX_POINTS],
            start: 0,
            len: 0,
            min_val: i32::MAX,
            max_val: i32::MIN,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Append `val`, evicting the oldest sample when full.
    ///
    /// Samples below `min_threshold` are stored but ignored by the running
    /// extremes. Extremes only widen; evicted samples do not shrink them.
    pub fn add_point(
        &mut self,
        val: i32,
        min_threshold: i32,
    ) {
        if self.len == GRAPH_MAX_POINTS {
            self.points[self.start] = val;
            self.start = (self.start + 1) % GRAPH_MAX_POINTS;
        } else {
            self.points[(self.start + self.len) % GRAPH_MAX_POINTS] = val;
            self.len += 1;
        }

        if val >= min_threshold {
            self.min_val = self.min_val.min(val);
            self.max_val = self.max_val.max(val);
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Running minimum, `None` until a sample passed the threshold.
    pub const fn min_val(&self) -> Option<i32> {
        if self.min_val == i32::MAX { None } else { Some(self.min_val) }
    }

    /// Running maximum, `None` until a sample passed the threshold.
    pub const fn max_val(&self) -> Option<i32> {
        if self.max_val == i32::MIN { None } else { Some(self.max_val) }
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i32> + ExactSizeIterator + '_ {
        (0..self.len).map(move |i| self.points[(self.start + i) % GRAPH_MAX_POINTS])
    }

    /// Map `val` onto the pixel rows between the axis `y_min` and the top `y_max`.
    ///
    /// The running minimum lands one row above the axis so bars never cover
    /// it. A flat history maps everything onto the axis. Values outside the
    /// extremes land outside the area, callers clip what they draw.
    pub fn scale_y(
        &self,
        val: i32,
        y_min: i32,
        y_max: i32,
    ) -> i32 {
        let (lo, hi) = (i64::from(self.min_val), i64::from(self.max_val));
        if hi <= lo {
            return y_min;
        }
        let bottom = i64::from(y_min) - 1;
        let offset = i64::from(val) - lo;
        let y = bottom - offset * (bottom - i64::from(y_max)) / (hi - lo);
        y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared cache and the graph field currently sampling into it.
#[derive(Default)]
pub struct GraphSlot {
    pub cache: GraphCache,
    owner: Option<FieldId>,
}

impl GraphSlot {
    pub const fn new() -> Self {
        Self {
            cache: GraphCache::new(),
            owner: None,
        }
    }

    /// Hand the cache to `graph`, clearing history if another graph had it.
    pub fn claim(
        &mut self,
        graph: FieldId,
    ) -> &mut GraphCache {
        if self.owner != Some(graph) {
            crate::logging::debug!("graph cache claimed by field {}", graph.index());
            self.cache.reset();
            self.owner = Some(graph);
        }
        &mut self.cache
    }

    /// Drop ownership and history.
    pub fn release(&mut self) {
        self.owner = None;
        self.cache.reset();
    }

    pub const fn owner(&self) -> Option<FieldId> {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache() {
        let cache = GraphCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.min_val(), None);
        assert_eq!(cache.max_val(), None);
        assert_eq!(cache.scale_y(5, 100, 10), 100);
    }

    #[test]
    fn test_min_threshold_ignores_low_samples() {
        let mut cache = GraphCache::new();
        cache.add_point(-40, 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.min_val(), None);

        cache.add_point(10, 0);
        cache.add_point(30, 0);
        assert_eq!(cache.min_val(), Some(10));
        assert_eq!(cache.max_val(), Some(30));
        assert_eq!(cache.iter().collect::<std::vec::Vec<_>>(), [-40, 10, 30]);
    }

    #[test]
    fn test_wraps_and_keeps_newest() {
        let mut cache = GraphCache::new();
        for v in 0..(GRAPH_MAX_POINTS as i32 + 10) {
            cache.add_point(v, i32::MIN);
        }
        assert_eq!(cache.len(), GRAPH_MAX_POINTS);
        assert_eq!(cache.iter().next(), Some(10));
        assert_eq!(cache.iter().next_back(), Some(GRAPH_MAX_POINTS as i32 + 9));
        // extremes only widen
        assert_eq!(cache.min_val(), Some(0));
    }

    #[test]
    fn test_scale_y_spans_area() {
        let mut cache = GraphCache::new();
        cache.add_point(10, 0);
        cache.add_point(20, 0);
        assert_eq!(cache.scale_y(10, 100, 20), 99);
        assert_eq!(cache.scale_y(20, 100, 20), 20);
        assert_eq!(cache.scale_y(15, 100, 20), 60);
        // outside the extremes is not clipped
        assert!(cache.scale_y(-5, 100, 20) > 100);
        assert!(cache.scale_y(30, 100, 20) < 20);
    }

    #[test]
    fn test_flat_history_maps_to_baseline() {
        let mut cache = GraphCache::new();
        cache.add_point(7, 0);
        cache.add_point(7, 0);
        assert_eq!(cache.scale_y(7, 63, 10), 63);
    }

    #[test]
    fn test_claim_resets_on_owner_change() {
        let mut slot = GraphSlot::new();
        slot.claim(FieldId(10)).add_point(5, 0);
        slot.claim(FieldId(10)).add_point(6, 0);
        assert_eq!(slot.cache.len(), 2);

        slot.claim(FieldId(11));
        assert!(slot.cache.is_empty());
        assert_eq!(slot.owner(), Some(FieldId(11)));

        slot.release();
        assert_eq!(slot.owner(), None);
    }
}

#[cfg(test)]
mod graph_proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn samples_stay_within_extremes(
            values in proptest::collection::vec(-10_000i32..10_000, 1..600),
            min_threshold in -100i32..100,
        ) {
            let mut cache = GraphCache::new();
            for v in &values {
                cache.add_point(*v, min_threshold);
            }
            prop_assert_eq!(cache.len(), values.len().min(GRAPH_MAX_POINTS));

            let kept = values.iter().copied().filter(|v| *v >= min_threshold);
            prop_assert_eq!(cache.min_val(), kept.clone().min());
            prop_assert_eq!(cache.max_val(), kept.max());
        }

        #[test]
        fn scaled_points_stay_inside_area(
            values in proptest::collection::vec(-1_000i32..1_000, 1..300),
            y_max in 0i32..50,
            height in 1i32..200,
        ) {
            let mut cache = GraphCache::new();
            for v in &values {
                cache.add_point(*v, i32::MIN);
            }
            let y_min = y_max + height;
            for v in cache.iter() {
                let y = cache.scale_y(v, y_min, y_max);
                prop_assert!((y_max..=y_min).contains(&y));
            }
        }
    }
}
