//! Version-dependent limits on the length of the user part.

use crate::version::MySqlVersion;

/// One row of the limit table: the predicate selects the row and `max` is
/// the longest user part it allows, in characters.
struct LengthLimit {
    applies: fn(&MySqlVersion) -> bool,
    max: usize,
}

fn before_5_7_8(version: &MySqlVersion) -> bool {
    version.is_older_than("5.7.8")
}

fn before_10_0_0(version: &MySqlVersion) -> bool {
    version.is_older_than("10.0.0")
}

fn from_10_0_0(version: &MySqlVersion) -> bool {
    !before_10_0_0(version)
}

const LENGTH_LIMITS: [LengthLimit; 3] = [
    LengthLimit {
        applies: before_5_7_8,
        max: 16,
    },
    LengthLimit {
        applies: before_10_0_0,
        max: 32,
    },
    LengthLimit {
        applies: from_10_0_0,
        max: 80,
    },
];

/// Returns the maximum user-part length for `version`, or `None` when no
/// version is known and no limit applies.
pub(crate) fn max_user_length(version: Option<&MySqlVersion>) -> Option<usize> {
    let server = version?;
    LENGTH_LIMITS
        .iter()
        .find(|limit| (limit.applies)(server))
        .map(|limit| limit.max)
}
