//! Severity fills as RGB hex.

use sheetdiff_model::Severity;

/// Light green.
pub const MATCH_FILL: &str = "90EE90";
/// Light red.
pub const MISMATCH_FILL: &str = "FFB6C1";
/// Light orange.
pub const CHANGE_FILL: &str = "FFE4B5";

/// Fill colour used to present a severity.
pub fn fill_for(severity: Severity) -> &'static str {
    match severity {
        Severity::Match => MATCH_FILL,
        Severity::Major | Severity::TextMismatch => MISMATCH_FILL,
        Severity::Minor | Severity::OneSided => CHANGE_FILL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_severity_has_a_fill() {
        let fills: Vec<&str> = Severity::ALL.iter().map(|s| fill_for(*s)).collect();
        assert_eq!(
            fills,
            vec![MATCH_FILL, CHANGE_FILL, MISMATCH_FILL, MISMATCH_FILL, CHANGE_FILL]
        );
    }
}
