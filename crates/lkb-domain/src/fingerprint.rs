//! Fingerprint module - cache-validity token for compiled dictionaries

use std::fmt;

/// Integer fingerprint of a dictionary's effective settings
///
/// Two fingerprints are equal iff the configuration and query they were
/// derived from are equal modulo whitespace run-length. Used purely to decide
/// whether a compiled cache is still valid; it is not a security digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(i32);

impl Fingerprint {
    /// Wrap a raw hash value
    ///
    /// This is primarily for cache deserialization.
    pub fn from_value(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw hash value
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Fingerprint {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_roundtrip() {
        let fp = Fingerprint::from_value(-42);
        assert_eq!(fp.value(), -42);
        assert_eq!(Fingerprint::from(-42), fp);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fingerprint::from_value(1234).to_string(), "1234");
    }
}
