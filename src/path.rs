use crate::geom::*;

/// Builds the control-point run for one quadratic path: `1 + 2k` points,
/// consecutive segments sharing an endpoint. This is the encoding
/// [`PathScanner::begin`] and [`Context::fill_path`] consume.
///
/// A `Path` holds a single contour; calling [`move_to`] after curves have
/// been added starts the path over.
///
/// [`PathScanner::begin`]: crate::PathScanner::begin
/// [`Context::fill_path`]: crate::Context::fill_path
/// [`move_to`]: Path::move_to
pub struct Path {
    cvs: Vec<Vec2>,
}

impl Path {
    pub fn new() -> Path {
        Path { cvs: Vec::new() }
    }

    fn pen(&mut self) -> Vec2 {
        if self.cvs.is_empty() {
            self.cvs.push(Vec2::new(0.0, 0.0));
        }
        *self.cvs.last().unwrap()
    }

    pub fn move_to(&mut self, point: Vec2) -> &mut Self {
        if self.cvs.len() > 1 {
            self.cvs.clear();
        }
        if self.cvs.is_empty() {
            self.cvs.push(point);
        } else {
            self.cvs[0] = point;
        }
        self
    }

    /// A straight edge, encoded as a quadratic with its control point at
    /// the midpoint.
    pub fn line_to(&mut self, point: Vec2) -> &mut Self {
        let current = self.pen();
        self.cvs.push(0.5 * (current + point));
        self.cvs.push(point);
        self
    }

    pub fn quad_to(&mut self, control: Vec2, point: Vec2) -> &mut Self {
        self.pen();
        self.cvs.push(control);
        self.cvs.push(point);
        self
    }

    /// Crude approximation of a cubic with two quadratics: split at
    /// t = 0.5, then collapse each half's two inner control points to one.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, point: Vec2) -> &mut Self {
        let current = self.pen();
        let p01 = 0.5 * (current + control1);
        let p12 = 0.5 * (control1 + control2);
        let p23 = 0.5 * (control2 + point);
        let p012 = 0.5 * (p01 + p12);
        let p123 = 0.5 * (p12 + p23);
        let mid = 0.5 * (p012 + p123);

        let q1 = 0.25 * (3.0 * p01 - current + 3.0 * p012 - mid);
        let q2 = 0.25 * (3.0 * p123 - mid + 3.0 * p23 - point);
        self.quad_to(q1, mid).quad_to(q2, point)
    }

    /// Closes the contour with a straight edge back to the start point, if
    /// it is not already closed.
    pub fn close(&mut self) -> &mut Self {
        if self.cvs.len() > 1 {
            let first = self.cvs[0];
            if *self.cvs.last().unwrap() != first {
                self.line_to(first);
            }
        }
        self
    }

    /// The control-point run built so far.
    pub fn cvs(&self) -> &[Vec2] {
        &self.cvs
    }

    pub fn is_empty(&self) -> bool {
        self.cvs.len() < 3
    }

    pub fn clear(&mut self) {
        self.cvs.clear();
    }
}

impl Default for Path {
    fn default() -> Path {
        Path::new()
    }
}
