/// A closed range of real values, used for the valid `t` span of a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn test_interval_clamp() {
        let unit = Interval::new(0.0, 1.0);

        assert_eq!(unit.clamp(-5.0), 0.0);
        assert_eq!(unit.clamp(0.25), 0.25);
        assert_eq!(unit.clamp(1.5), 1.0);
    }

    #[test]
    fn test_interval_with_max() {
        let interval = Interval::new(0.001, f32::INFINITY).with_max(4.0);

        assert_eq!(interval.min, 0.001);
        assert_eq!(interval.max, 4.0);
    }
}
