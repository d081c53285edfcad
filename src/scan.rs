use smallvec::SmallVec;
use thiserror::Error;

use crate::{Interval, Vec2};

/// Errors surfaced when a control-point run does not describe a valid
/// quadratic path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path needs at least 3 control points, got {0}")]
    TooFewPoints(usize),
    #[error("{0} control points do not form whole quadratic segments")]
    PartialSegment(usize),
}

/// Checks that `cvs` is a valid quadratic control-point run: `1 + 2k` points
/// for `k >= 1` segments, consecutive segments sharing an endpoint.
pub fn validate_path(cvs: &[Vec2]) -> Result<(), PathError> {
    if cvs.len() < 3 {
        return Err(PathError::TooFewPoints(cvs.len()));
    }
    if (cvs.len() - 1) % 2 != 0 {
        return Err(PathError::PartialSegment(cvs.len()));
    }
    Ok(())
}

/// One quadratic bezier piece of a path.
///
/// `y_interval` bounds the three control points' y coordinates. The curve
/// lies within the convex hull of its control points, so this is always a
/// superset of the curve's true vertical extent; it can be computed without
/// any curve analysis, at the cost of being loose when the control point
/// overshoots.
#[derive(Copy, Clone, Debug)]
pub struct Segment {
    pub cvs: [Vec2; 3],
    pub y_interval: Interval,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Segment {
        Segment {
            cvs: [a, b, c],
            y_interval: Interval {
                min: a.y.min(b.y).min(c.y),
                max: a.y.max(b.y).max(c.y),
            },
        }
    }
}

/// Sweeps a quadratic path from low y to high y, maintaining the set of
/// segments whose vertical extent overlaps the current band.
///
/// Drive it with [`begin`] once per path, then call [`next`] until it
/// returns `false`; between calls, [`interval`] is the current band and
/// [`active_segments`] yields exactly the segments overlapping it. Band
/// boundaries are the segments' enter/exit events, so a traversal makes at
/// most `2n` bands for `n` segments. Where an exit and an enter coincide,
/// the exit is processed first.
///
/// [`begin`]: PathScanner::begin
/// [`next`]: PathScanner::next
/// [`interval`]: PathScanner::interval
/// [`active_segments`]: PathScanner::active_segments
pub struct PathScanner {
    segments: Vec<Segment>,
    active: SmallVec<[u32; 16]>,
    index: usize,
    interval: Interval,
}

impl PathScanner {
    pub fn new() -> PathScanner {
        PathScanner {
            segments: Vec::new(),
            active: SmallVec::new(),
            index: 0,
            interval: Interval::point(0.0),
        }
    }

    /// Loads a new path, discarding any previous scan state.
    ///
    /// `cvs` is a quadratic control-point run: each segment consumes two new
    /// points plus the endpoint shared with its predecessor. Fails on a
    /// malformed run; the scanner is left empty and a later valid `begin`
    /// proceeds normally.
    pub fn begin(&mut self, cvs: &[Vec2]) -> Result<(), PathError> {
        self.segments.clear();
        self.active.clear();
        self.index = 0;
        self.interval = Interval::point(0.0);

        validate_path(cvs)?;

        let mut i = 0;
        while i + 2 < cvs.len() {
            self.segments.push(Segment::new(cvs[i], cvs[i + 1], cvs[i + 2]));
            i += 2;
        }

        // Segments enter the sweep in ascending order of their lower bound;
        // once removed they never re-enter, so a single forward cursor
        // suffices.
        self.segments
            .sort_unstable_by(|a, b| a.y_interval.min.total_cmp(&b.y_interval.min));

        let start = self.segments[0].y_interval.min;
        self.interval = Interval::point(start);
        Ok(())
    }

    /// Advances to the next band. Returns `false` once every segment has
    /// been swept past; further calls keep returning `false`.
    pub fn next(&mut self) -> bool {
        let mut y = self.interval.max;

        // Exits before enters at a shared boundary.
        let segments = &self.segments;
        self.active
            .retain(|i| segments[*i as usize].y_interval.max > y);

        while self.index < self.segments.len() && self.segments[self.index].y_interval.min <= y {
            self.active.push(self.index as u32);
            self.index += 1;
        }

        if self.active.is_empty() {
            if self.index == self.segments.len() {
                return false;
            }

            // The path has a vertical gap here; jump the sweep to the next
            // segment rather than emit an empty band.
            y = self.segments[self.index].y_interval.min;
            while self.index < self.segments.len() && self.segments[self.index].y_interval.min <= y
            {
                self.active.push(self.index as u32);
                self.index += 1;
            }
        }

        let mut next_y = f32::INFINITY;
        for &i in &self.active {
            next_y = next_y.min(self.segments[i as usize].y_interval.max);
        }
        if self.index < self.segments.len() {
            next_y = next_y.min(self.segments[self.index].y_interval.min);
        }

        self.interval = Interval::new(y, next_y);
        true
    }

    /// The band exposed by the last successful [`next`] call.
    ///
    /// [`next`]: PathScanner::next
    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The segments whose vertical extent overlaps the current band.
    pub fn active_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.active.iter().map(move |&i| &self.segments[i as usize])
    }
}

impl Default for PathScanner {
    fn default() -> PathScanner {
        PathScanner::new()
    }
}
