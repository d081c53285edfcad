/// A closed scalar range `[min, max]`.
///
/// Callers must keep `min <= max`; inverted ranges are never constructed by
/// this crate and are not checked for at runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    #[inline]
    pub fn new(min: f32, max: f32) -> Interval {
        Interval { min, max }
    }

    /// The zero-width range containing only `value`.
    #[inline]
    pub fn point(value: f32) -> Interval {
        Interval {
            min: value,
            max: value,
        }
    }

    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// True iff the two closed ranges share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_closed() {
        let i = Interval::new(1.0, 3.0);
        assert!(i.contains(1.0));
        assert!(i.contains(2.0));
        assert!(i.contains(3.0));
        assert!(!i.contains(0.999));
        assert!(!i.contains(3.001));
    }

    #[test]
    fn overlaps_counts_shared_endpoints() {
        let a = Interval::new(0.0, 2.0);
        assert!(a.overlaps(&Interval::new(2.0, 5.0)));
        assert!(a.overlaps(&Interval::new(-1.0, 0.0)));
        assert!(a.overlaps(&Interval::new(1.0, 1.5)));
        assert!(!a.overlaps(&Interval::new(2.5, 5.0)));
        assert!(!a.overlaps(&Interval::new(-3.0, -0.5)));
    }

    #[test]
    fn zero_width_interval() {
        let p = Interval::point(4.0);
        assert!(p.contains(4.0));
        assert!(p.overlaps(&Interval::new(4.0, 9.0)));
        assert!(!p.overlaps(&Interval::new(4.1, 9.0)));
    }

    #[test]
    fn union_encloses_both() {
        let u = Interval::new(0.0, 1.0).union(&Interval::new(5.0, 6.0));
        assert_eq!(u, Interval::new(0.0, 6.0));
    }
}
