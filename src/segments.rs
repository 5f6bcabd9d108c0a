//! # GPS time segments
//!
//! A [`Segment`] is an interval `[start, end]` of integer GPS seconds; a
//! [`SegmentList`] is an ordered sequence of them that can be
//! [coalesced](SegmentList::coalesce) into sorted, disjoint form.
//!
//! ```rust
//! use gwchannel::segments::{Segment, SegmentList};
//!
//! let mut list: SegmentList = vec![
//!     Segment::new(30, 40),
//!     Segment::new(0, 10),
//!     Segment::new(10, 20),
//! ]
//! .into_iter()
//! .collect();
//! list.coalesce();
//! assert_eq!(list.as_slice(), &[Segment::new(0, 20), Segment::new(30, 40)]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed interval of GPS seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Segment {
    /// First second of the interval
    pub start: i64,
    /// Last second of the interval
    pub end: i64,
}

impl Segment {
    /// Create a segment; no ordering check is made
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Length in seconds; zero for reversed segments, saturating at
    /// `i64::MAX`
    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start).max(0)
    }

    /// True if `start <= end`
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// True if the two segments share more than a boundary point
    pub fn intersects(&self, other: &Segment) -> bool {
        self.end > other.start && self.start < other.end
    }

    /// Overlap of the two segments, or `None` if they only touch or are
    /// disjoint
    pub fn intersect(&self, other: &Segment) -> Option<Segment> {
        if !self.intersects(other) {
            return None;
        }
        Some(Segment::new(
            self.start.max(other.start),
            self.end.min(other.end),
        ))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<(i64, i64)> for Segment {
    fn from((start, end): (i64, i64)) -> Self {
        Segment::new(start, end)
    }
}

/// Ordered sequence of [`Segment`]s
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    /// An empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if the list holds no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments in order
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// The segments as a slice
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Total length of all segments in seconds.
    ///
    /// Overlapping segments are counted twice; coalesce first for livetime.
    pub fn duration(&self) -> i64 {
        self.segments
            .iter()
            .map(Segment::duration)
            .fold(0i64, i64::saturating_add)
    }

    /// Sort the segments and merge every pair that overlaps or touches.
    ///
    /// Afterwards the list is ascending and pairwise disjoint.
    pub fn coalesce(&mut self) {
        if self.segments.len() < 2 {
            return;
        }
        self.segments.sort_unstable();

        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for seg in self.segments.drain(..) {
            match merged.last_mut() {
                Some(current) if seg.start <= current.end => {
                    current.end = current.end.max(seg.end);
                }
                _ => merged.push(seg),
            }
        }
        self.segments = merged;
    }

    /// Coalesced copy of this list
    pub fn coalesced(&self) -> SegmentList {
        let mut out = self.clone();
        out.coalesce();
        out
    }
}

impl FromIterator<Segment> for SegmentList {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SegmentList {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl From<Vec<Segment>> for SegmentList {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for SegmentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", seg)?;
        }
        f.write_str("]")
    }
}
