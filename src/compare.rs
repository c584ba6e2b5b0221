//! Golden comparison
//!
//! Exact byte equality. No normalization of line endings, whitespace or
//! encoding.

/// Outcome of judging one case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Golden file exists and matches byte for byte
    Pass,
    /// Golden file exists but differs
    Mismatch,
    /// No golden file for this case
    MissingGolden,
}

impl Verdict {
    pub fn passed(self) -> bool {
        self == Verdict::Pass
    }
}

/// Compare captured output against the golden lookup result
pub fn compare(actual: &[u8], golden: Option<&[u8]>) -> Verdict {
    match golden {
        None => Verdict::MissingGolden,
        Some(expected) if expected == actual => Verdict::Pass,
        Some(_) => Verdict::Mismatch,
    }
}
