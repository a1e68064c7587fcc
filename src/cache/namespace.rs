//! Cache Namespace Module
//!
//! Typed key-builder for the `<Prefix>` / `<Prefix>.<Discriminator>` naming
//! convention that prefix-scoped invalidation depends on.
//!
//! Every producer of a cache key goes through its entity's namespace, so a
//! hand-formatted key can never silently fall outside its invalidation scope.

use std::fmt;

// == Cache Namespace ==
/// An entity's key namespace, e.g. `Aircraft` for keys like `Aircraft.42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheNamespace {
    prefix: &'static str,
}

impl CacheNamespace {
    // == Constructor ==
    /// Creates a namespace with the given prefix. Prefixes must not contain
    /// `.`, which separates discriminator segments.
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    // == Prefix ==
    /// The bare prefix string.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    // == Root Key ==
    /// The key for the namespace's unscoped collection, e.g. `Airports`.
    pub fn root(&self) -> String {
        self.prefix.to_string()
    }

    // == Scoped Key ==
    /// A discriminated key, e.g. `Aircraft.42` or `Flights.R.LGW.RMU` via
    /// `scoped(format_args!("R.{}.{}", from, to))`.
    pub fn scoped<D: fmt::Display>(&self, discriminator: D) -> String {
        format!("{}.{}", self.prefix, discriminator)
    }

    // == Ownership Test ==
    /// Whether a key belongs to this namespace: the exact root, or the prefix
    /// followed by a `.` segment. `Air` does not own `Airports.1`.
    pub fn owns(&self, key: &str) -> bool {
        key == self.prefix
            || (key.len() > self.prefix.len() + 1
                && key.starts_with(self.prefix)
                && key.as_bytes()[self.prefix.len()] == b'.')
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const AIRCRAFT: CacheNamespace = CacheNamespace::new("Aircraft");
    const AIRPORTS: CacheNamespace = CacheNamespace::new("Airports");
    const FLIGHTS: CacheNamespace = CacheNamespace::new("Flights");

    #[test]
    fn test_root_and_scoped_keys() {
        assert_eq!(AIRPORTS.root(), "Airports");
        assert_eq!(AIRCRAFT.scoped(42), "Aircraft.42");
        assert_eq!(
            FLIGHTS.scoped(format_args!("R.{}.{}", "LGW", "RMU")),
            "Flights.R.LGW.RMU"
        );
    }

    #[test]
    fn test_owns_root_and_scoped() {
        assert!(AIRCRAFT.owns("Aircraft"));
        assert!(AIRCRAFT.owns("Aircraft.42"));
        assert!(FLIGHTS.owns("Flights.N.BA123"));
    }

    #[test]
    fn test_owns_rejects_other_namespaces() {
        assert!(!AIRCRAFT.owns("Airports.1"));
        assert!(!AIRCRAFT.owns("Flights.A.1"));
    }

    #[test]
    fn test_owns_requires_segment_boundary() {
        // A shorter prefix must not claim a longer namespace's keys
        let air = CacheNamespace::new("Air");
        assert!(!air.owns("Airports.1"));
        assert!(!air.owns("Aircraft"));
        assert!(air.owns("Air.1"));
    }

    #[test]
    fn test_owns_rejects_bare_dot() {
        assert!(!AIRCRAFT.owns("Aircraft."));
    }
}
