//! Version acceptance rules.
//!
//! The constrained dependency uses a three-tier rule: versions from a
//! "too new" major onward are rejected outright (that line dropped a
//! capability the converter needs), the current majors are accepted, and
//! one legacy major is accepted from a minimum minor onward.

use std::fmt;

use super::version::Version;

/// Result of evaluating a version against a [`VersionRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Version satisfies the rule.
    Accepted,
    /// Version belongs to a newer, incompatible major line.
    TooNew,
    /// Version predates the supported range.
    TooOld,
    /// No version could be determined.
    Unknown,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Three-tier version acceptance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRule {
    /// First rejected major; everything at or above it is too new.
    pub reject_from_major: u32,
    /// First fully accepted major.
    pub accept_from_major: u32,
    /// Legacy major accepted from `legacy_min_minor` onward.
    pub legacy_major: u32,
    pub legacy_min_minor: u32,
}

impl VersionRule {
    /// Blender: 4.x accepted, 3.6+ accepted, 5.x and later rejected.
    pub const fn blender() -> Self {
        Self {
            reject_from_major: 5,
            accept_from_major: 4,
            legacy_major: 3,
            legacy_min_minor: 6,
        }
    }

    /// Classify a possibly-unknown version.
    pub fn evaluate(&self, version: Option<Version>) -> Verdict {
        let Some(v) = version else {
            return Verdict::Unknown;
        };

        if v.major >= self.reject_from_major {
            Verdict::TooNew
        } else if v.major >= self.accept_from_major {
            Verdict::Accepted
        } else if v.major == self.legacy_major && v.minor >= self.legacy_min_minor {
            Verdict::Accepted
        } else {
            Verdict::TooOld
        }
    }

    /// Whether the version satisfies the rule. Unknown never does.
    pub fn accepts(&self, version: Option<Version>) -> bool {
        self.evaluate(version).is_accepted()
    }

    /// Whether a known version falls in the rejected newer line.
    pub fn is_too_new(&self, version: Version) -> bool {
        version.major >= self.reject_from_major
    }
}

impl fmt::Display for VersionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ">={}.{}, <{}",
            self.legacy_major, self.legacy_min_minor, self.reject_from_major
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::version::parse_version_token;

    fn verdict(text: &str) -> Verdict {
        VersionRule::blender().evaluate(parse_version_token(text))
    }

    #[test]
    fn rejects_five_and_later() {
        for v in ["5.0.0", "5.1.2", "6.0", "12.3.4"] {
            assert_eq!(verdict(v), Verdict::TooNew, "{v}");
        }
    }

    #[test]
    fn accepts_every_four_x() {
        for minor in 0..=9 {
            for patch in 0..=9 {
                let v = format!("4.{minor}.{patch}");
                assert_eq!(verdict(&v), Verdict::Accepted, "{v}");
            }
        }
    }

    #[test]
    fn accepts_legacy_from_three_six() {
        assert_eq!(verdict("3.6.0"), Verdict::Accepted);
        assert_eq!(verdict("3.9.1"), Verdict::Accepted);
        assert_eq!(verdict("3.10"), Verdict::Accepted);
    }

    #[test]
    fn rejects_below_three_six() {
        assert_eq!(verdict("3.5.9"), Verdict::TooOld);
        assert_eq!(verdict("3.0.0"), Verdict::TooOld);
        assert_eq!(verdict("2.93.4"), Verdict::TooOld);
    }

    #[test]
    fn unknown_never_accepted() {
        let rule = VersionRule::blender();
        assert_eq!(rule.evaluate(None), Verdict::Unknown);
        assert!(!rule.accepts(None));
        assert!(!rule.accepts(parse_version_token("")));
        assert!(!rule.accepts(parse_version_token("unknown")));
    }

    #[test]
    fn too_new_matches_reject_line() {
        let rule = VersionRule::blender();
        assert!(rule.is_too_new(Version::new(5, 0)));
        assert!(!rule.is_too_new(Version::new(4, 9)));
    }

    #[test]
    fn rule_displays_range() {
        assert_eq!(VersionRule::blender().to_string(), ">=3.6, <5");
    }
}
