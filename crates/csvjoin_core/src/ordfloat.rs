//! Transparent float wrapper providing total order for floats.
use std::cmp::Ordering;
use std::ops::Deref;

/// A totally ordered float64.
#[derive(Debug, Default, Clone, Copy)]
#[repr(transparent)]
pub struct OrdF64(f64);

impl OrdF64 {
    /// Wrap a float, collapsing every NaN payload into a single NaN.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            OrdF64(f64::NAN)
        } else {
            OrdF64(v)
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for OrdF64 {
    fn from(v: f64) -> Self {
        OrdF64::new(v)
    }
}

impl From<OrdF64> for f64 {
    fn from(v: OrdF64) -> Self {
        v.0
    }
}

impl Deref for OrdF64 {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for OrdF64 {
    fn eq(&self, other: &Self) -> bool {
        f64::total_cmp(self, other).is_eq()
    }
}

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}
