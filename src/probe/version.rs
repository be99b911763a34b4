//! Packed version decoding.
//!
//! ROCm packs versions as `major * 10_000_000 + minor * 100_000 + patch`;
//! ROCm 6.x runtimes report values >= 60_000_000. The packing is
//! vendor-specific, so the decoded parts are informational; the canonical
//! probe output is always the raw value in hex.

use std::fmt;

use serde::Serialize;

/// A packed runtime or driver version split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeVersion {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
}

impl RuntimeVersion {
    /// Decode a packed version integer.
    pub fn from_packed(raw: i32) -> Self {
        Self {
            major: raw / 10_000_000,
            minor: (raw / 100_000) % 100,
            patch: raw % 100_000,
        }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rocm6() {
        let v = RuntimeVersion::from_packed(60_000_000);
        assert_eq!(v, RuntimeVersion { major: 6, minor: 0, patch: 0 });
    }

    #[test]
    fn test_decode_with_minor_and_patch() {
        let v = RuntimeVersion::from_packed(60_342_134);
        assert_eq!(v.major, 6);
        assert_eq!(v.minor, 3);
        assert_eq!(v.patch, 42_134);
        assert_eq!(v.to_string(), "6.3.42134");
    }
}
