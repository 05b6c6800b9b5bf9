//! Search-token utilities for the product list.
//!
//! Tokens are split on commas and whitespace; a product matches when every
//! token matches case-insensitively. A token equal to a zone name narrows
//! the list to that zone instead of matching text.

/// Splits a raw query into non-empty search tokens.
#[must_use]
pub fn parse_search_tokens(raw: &str) -> Vec<String> {
    raw.split([',', ' ', '\t', '\r', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// True when every token occurs in the text, case-insensitively.
#[must_use]
pub fn tokens_match_text(text: &str, tokens: &[String]) -> bool {
    let haystack = text.to_lowercase();
    tokens
        .iter()
        .all(|token| haystack.contains(&token.to_lowercase()))
}

/// First token that names a known zone, if any.
#[must_use]
pub fn extract_zone_override<'a>(tokens: &[String], zone_names: &'a [String]) -> Option<&'a str> {
    for token in tokens {
        if let Some(name) = zone_names.iter().find(|name| *name == token) {
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &str) -> Vec<String> {
        parse_search_tokens(raw)
    }

    #[test]
    fn test_parse_search_tokens() {
        assert_eq!(tokens("dumpling frozen"), ["dumpling", "frozen"]);
        assert_eq!(tokens("dumpling, frozen"), ["dumpling", "frozen"]);
        assert_eq!(tokens("  dumpling ,, frozen  "), ["dumpling", "frozen"]);
        assert!(tokens("").is_empty());
        assert!(tokens(" , ,").is_empty());
    }

    #[test]
    fn test_tokens_match_text() {
        let t = tokens("Frozen dump");
        assert!(tokens_match_text("frozen dumplings 1kg", &t));
        assert!(tokens_match_text("Dumplings, FROZEN", &t));
        assert!(!tokens_match_text("fresh dumplings", &t));
        // No tokens matches everything
        assert!(tokens_match_text("anything", &[]));
    }

    #[test]
    fn test_extract_zone_override() {
        let zones = vec!["Freezer 1".to_string(), "Chiller".to_string()];
        assert_eq!(
            extract_zone_override(&tokens("Chiller dumpling"), &zones),
            Some("Chiller")
        );
        assert_eq!(extract_zone_override(&tokens("dumpling"), &zones), None);
        // Zone match is exact, not substring
        assert_eq!(extract_zone_override(&tokens("Chill"), &zones), None);
    }
}
