//! Toolchain version numbers.
//!
//! A [`VersionNumber`] is an ordered tuple of numeric components parsed from
//! a dotted string such as `9.3.0` or `14.0`. Comparison is component-wise:
//! when two versions have a different number of components, the shorter one
//! is padded on the right with zeros, so `4.2` and `4.2.0` are equal and
//! `4.10` is newer than `4.2`.
//!
//! [`VersionNumber::UNKNOWN`] is used for installations whose version could
//! not be obtained (for example MinGW located by a fixed path). It is a real
//! value, not an absent one: it sorts below every parsed version, including
//! `0`, and is equal only to itself.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error returned when a version string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{input}`: {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: &'static str,
}

/// A comparable, dotted numeric version.
#[derive(Debug, Clone)]
pub struct VersionNumber {
    components: Vec<u64>,
}

impl VersionNumber {
    /// The version of an installation whose version is not known.
    pub const UNKNOWN: VersionNumber = VersionNumber {
        components: Vec::new(),
    };

    /// Create a version from explicit components.
    ///
    /// An empty slice yields [`VersionNumber::UNKNOWN`].
    pub fn new(components: &[u64]) -> Self {
        VersionNumber {
            components: components.to_vec(),
        }
    }

    /// Parse a dotted numeric version.
    ///
    /// Leading numeric components are taken up to the first character that
    /// is neither a digit nor a dot, so `9.3.0-1ubuntu2` parses as `9.3.0`
    /// and `14.0.25431.01` keeps all four components.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let trimmed = input.trim();
        let numeric_end = trimmed
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(trimmed.len());
        let numeric = trimmed[..numeric_end].trim_end_matches('.');

        if numeric.is_empty() {
            return Err(VersionParseError {
                input: input.to_string(),
                reason: "expected a leading number",
            });
        }

        let mut components = Vec::new();
        for part in numeric.split('.') {
            if part.is_empty() {
                return Err(VersionParseError {
                    input: input.to_string(),
                    reason: "empty version component",
                });
            }
            let value = part.parse::<u64>().map_err(|_| VersionParseError {
                input: input.to_string(),
                reason: "version component out of range",
            })?;
            components.push(value);
        }

        Ok(VersionNumber { components })
    }

    /// Parse a version, falling back to [`VersionNumber::UNKNOWN`].
    pub fn parse_or_unknown(input: &str) -> Self {
        Self::parse(input).unwrap_or(Self::UNKNOWN)
    }

    /// Whether this is the [`VersionNumber::UNKNOWN`] sentinel.
    pub fn is_unknown(&self) -> bool {
        self.components.is_empty()
    }

    /// Major component, `0` for an unknown version.
    pub fn major(&self) -> u64 {
        self.component(0)
    }

    /// Minor component, `0` when absent.
    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    /// Micro (patch) component, `0` when absent.
    pub fn micro(&self) -> u64 {
        self.component(2)
    }

    /// The parsed components.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }

    /// Components with trailing zeros removed; the canonical form used for
    /// hashing so that `Hash` agrees with `Eq`.
    fn significant(&self) -> &[u64] {
        let len = self
            .components
            .iter()
            .rposition(|c| *c != 0)
            .map_or(0, |i| i + 1);
        &self.components[..len]
    }
}

impl Default for VersionNumber {
    fn default() -> Self {
        VersionNumber::UNKNOWN
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_unknown(), other.is_unknown()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionNumber {}

impl Hash for VersionNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_unknown().hash(state);
        self.significant().hash(state);
    }
}

impl FromStr for VersionNumber {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionNumber::parse(s)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "unknown");
        }
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl Serialize for VersionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn v(s: &str) -> VersionNumber {
        VersionNumber::parse(s).unwrap()
    }

    #[test]
    fn test_component_wise_ordering() {
        assert!(v("4.10") > v("4.2"));
        assert!(v("10.0.0") > v("9.3.0"));
        assert!(v("9.3.1") > v("9.3"));
    }

    #[test]
    fn test_zero_padding_equality() {
        assert_eq!(v("4.2"), v("4.2.0"));
        assert_eq!(v("14"), v("14.0.0.0"));
        assert_eq!(v("4.2").cmp(&v("4.2.0")), Ordering::Equal);
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(v("4.2"));
        assert!(set.contains(&v("4.2.0")));
        assert!(!set.contains(&VersionNumber::UNKNOWN));
    }

    #[test]
    fn test_unknown_is_lowest_but_present() {
        assert!(VersionNumber::UNKNOWN < v("0"));
        assert!(VersionNumber::UNKNOWN < v("0.0.1"));
        assert_ne!(VersionNumber::UNKNOWN, v("0"));
        assert_eq!(VersionNumber::UNKNOWN, VersionNumber::UNKNOWN);
        assert_eq!(VersionNumber::UNKNOWN.major(), 0);
    }

    #[test]
    fn test_parse_ignores_suffix() {
        assert_eq!(v("9.3.0-1ubuntu2"), v("9.3.0"));
        assert_eq!(v("5.1 (swiftlang-1100)"), v("5.1"));
        assert_eq!(v("14.0.25431.01").components(), &[14, 0, 25431, 1]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(VersionNumber::parse("").is_err());
        assert!(VersionNumber::parse("abc").is_err());
        assert!(VersionNumber::parse("1..2").is_err());
        assert!(VersionNumber::parse_or_unknown("garbage").is_unknown());
    }

    #[test]
    fn test_display() {
        assert_eq!(v("9.3.0").to_string(), "9.3.0");
        assert_eq!(v("14.0").to_string(), "14.0");
        assert_eq!(VersionNumber::UNKNOWN.to_string(), "unknown");
    }

    #[test]
    fn test_accessors() {
        let version = v("10.2");
        assert_eq!(version.major(), 10);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.micro(), 0);
    }
}
