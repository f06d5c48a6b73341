use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};
use thiserror::Error as ThisError;

///
/// Float64
///
/// Finite f64 only; -0.0 canonically stored as 0.0
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize)]
pub struct Float64(f64);

impl Float64 {
    /// Fallible constructor that rejects non-finite values and normalizes -0.0.
    #[must_use]
    pub fn try_new(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }

        // canonicalize -0.0 to 0.0 so Eq/Hash/Ord are consistent
        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0.to_bits()
    }
}

///
/// Float64Error
///

#[derive(Debug, ThisError)]
pub enum Float64Error {
    #[error("non-finite float64 value: {0}")]
    NonFinite(f64),
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        // finite-only invariant makes total_cmp agree with ==
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits());
    }
}

impl TryFrom<f64> for Float64 {
    type Error = Float64Error;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::try_new(v).ok_or(Float64Error::NonFinite(v))
    }
}

impl From<Float64> for f64 {
    fn from(v: Float64) -> Self {
        v.0
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Self::try_new(v).ok_or_else(|| serde::de::Error::custom(format!("non-finite float64: {v}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{DefaultHasher, Hash, Hasher};

    fn hash_of(v: Float64) -> u64 {
        let mut hasher = DefaultHasher::new();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Float64::try_new(f64::NAN).is_none());
        assert!(Float64::try_new(f64::INFINITY).is_none());
        assert!(Float64::try_new(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn negative_zero_canonicalizes() {
        let pos = Float64::try_new(0.0).unwrap();
        let neg = Float64::try_new(-0.0).unwrap();

        assert_eq!(pos, neg);
        assert_eq!(hash_of(pos), hash_of(neg));
        assert_eq!(neg.to_bits(), pos.to_bits());
    }

    #[test]
    fn ordering_is_total_over_finite_values() {
        let a = Float64::try_new(-1.5).unwrap();
        let b = Float64::try_new(0.0).unwrap();
        let c = Float64::try_new(2.25).unwrap();

        assert!(a < b && b < c);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }
}
