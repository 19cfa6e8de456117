//! Version precedence, the affected-range registry, and containment.

mod registry;
mod version;

pub use registry::{AffectedRange, Registry};
pub use version::{compare, parse_version, PkgVersion, VersionError};

use crate::model::{Classification, UnreadableReason};
use std::cmp::Ordering;

/// Classify an installed version against an affected range.
///
/// The range is closed: versions equal to either bound are in range.
/// A version the comparator rejects is reported as unreadable rather than
/// guessed at.
pub fn classify(installed: &str, range: &AffectedRange) -> Classification {
    let below = compare(installed, range.min.as_str());
    let above = compare(installed, range.max.as_str());

    match (below, above) {
        (Ok(lo), Ok(hi)) if lo == Ordering::Less || hi == Ordering::Greater => {
            Classification::OutOfRange
        }
        (Ok(_), Ok(_)) => Classification::InRange,
        _ => Classification::Unreadable(UnreadableReason::InvalidVersion(installed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn range(min: &str, max: &str) -> AffectedRange {
        AffectedRange::single(PkgVersion::parse(min).unwrap())
            .widen(&PkgVersion::parse(max).unwrap())
    }

    #[rstest]
    #[case("1.0.0", Classification::InRange)]
    #[case("1.0.1", Classification::InRange)]
    #[case("1.0.2", Classification::InRange)]
    #[case("1.0.3", Classification::OutOfRange)]
    #[case("0.9.0", Classification::OutOfRange)]
    #[case("1.0.2-beta.1", Classification::InRange)]
    #[case("1.0.0-beta.1", Classification::OutOfRange)]
    #[case("1.0", Classification::InRange)]
    fn test_classify(#[case] installed: &str, #[case] expected: Classification) {
        assert_eq!(classify(installed, &range("1.0.0", "1.0.2")), expected);
    }

    #[test]
    fn test_classify_invalid_installed_version() {
        assert_eq!(
            classify("not-a-version", &range("1.0.0", "1.0.2")),
            Classification::Unreadable(UnreadableReason::InvalidVersion(
                "not-a-version".to_string()
            ))
        );
    }

    #[test]
    fn test_classify_agrees_with_contains() {
        let range = range("2.1.0", "2.3.4");
        for installed in ["2.0.9", "2.1.0", "2.2.0", "2.3.4", "2.3.5", "3.0.0"] {
            let version = PkgVersion::parse(installed).unwrap();
            assert_eq!(
                classify(installed, &range).is_hit(),
                range.contains(&version),
                "{installed}"
            );
        }
    }
}
