//! Platform version strings such as `5.5.0`, compared component-wise.

use std::fmt;

/// Lower bound assumed when an item has no `fromversion`.
pub const DEFAULT_FROM_VERSION: &str = "0.0.0";
/// Upper bound assumed when an item has no `toversion`.
pub const DEFAULT_TO_VERSION: &str = "99.99.99";

/// Components kept even when zero; `6.0` and `6.0.0` are the same version.
const MIN_COMPONENTS: usize = 3;

/// A dotted version. Non-numeric components count as zero, so `6.0.0-beta`
/// compares like `6.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentVersion(Vec<u64>);

impl ContentVersion {
    pub fn parse(raw: &str) -> Self {
        let mut parts: Vec<u64> = raw
            .trim()
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            })
            .collect();
        while parts.len() > MIN_COMPONENTS && parts.last() == Some(&0) {
            parts.pop();
        }
        parts.resize(parts.len().max(MIN_COMPONENTS), 0);
        Self(parts)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Half-open ranges `[from, to)` intersect.
pub fn ranges_overlap(
    a: (&ContentVersion, &ContentVersion),
    b: (&ContentVersion, &ContentVersion),
) -> bool {
    let (a_from, a_to) = a;
    let (b_from, b_to) = b;
    (a_from <= b_from && b_from < a_to)
        || (a_from < b_to && b_to <= a_to)
        || (b_from <= a_from && a_from < b_to)
        || (b_from < a_to && a_to <= b_to)
}
