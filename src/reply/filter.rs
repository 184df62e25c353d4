pub const RESTRICTED_TERMS: [&str; 2] = ["Google", "Gemini"];

/// Replaces each restricted term with `brand`, one term at a time in list order.
/// Matching is case-sensitive.
pub fn filter_restricted_terms(text: &str, brand: &str) -> String {
    RESTRICTED_TERMS
        .iter()
        .fold(text.to_string(), |filtered, term| filtered.replace(term, brand))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRAND: &str = "ShaktiMaangPT";

    #[test]
    fn replaces_every_restricted_term() {
        let filtered = filter_restricted_terms(
            "I am Gemini, a model trained by Google. Google built Gemini.",
            BRAND
        );
        assert_eq!(
            filtered,
            "I am ShaktiMaangPT, a model trained by ShaktiMaangPT. ShaktiMaangPT built ShaktiMaangPT."
        );
        for term in RESTRICTED_TERMS {
            assert!(!filtered.contains(term));
        }
    }

    #[test]
    fn clean_text_is_unchanged() {
        let text = "Gravity is the curvature of spacetime.";
        assert_eq!(filter_restricted_terms(text, BRAND), text);
        let once = filter_restricted_terms("Ask Google", BRAND);
        assert_eq!(filter_restricted_terms(&once, BRAND), once);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(filter_restricted_terms("google and GEMINI", BRAND), "google and GEMINI");
    }

    #[test]
    fn later_term_scans_earlier_replacement() {
        // A brand containing the second term gets rewritten by the second pass.
        assert_eq!(filter_restricted_terms("Google", "Gemini Pro"), "Gemini Pro Pro");
    }
}
