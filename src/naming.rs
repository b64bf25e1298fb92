//! Filename parsing for the `NNN-name` ordering convention.
//!
//! Category directories and tutorial files share one pattern: an optional
//! numeric prefix (`NNN-`) that fixes ordering, followed by the name that
//! becomes the route segment.
//!
//! - `010-gcp/` → category `gcp`, sort key 10
//! - `020-cloud-run-basics.md` → slug `cloud-run-basics`, sort key 20
//! - `drafts/` → category `drafts`, sorted after every numbered entry

/// Result of parsing an entry name like `010-cloud-run`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-cloud-run`)
    pub number: Option<u32>,
    /// Name after `NNN-`, dashes preserved. Full input when unnumbered.
    pub name: String,
    /// Name with dashes converted to spaces.
    pub display_title: String,
}

impl ParsedName {
    /// Ordering key: the prefix, or `u32::MAX` so unnumbered entries sort last.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(u32::MAX)
    }
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"010-cloud-run"` → number=Some(10), name="cloud-run"
/// - `"007"` → number=Some(7), name=""
/// - `"drafts"` → number=None, name="drafts"
/// - `"k8s-intro"` → number=None, name="k8s-intro" (prefix is not numeric)
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(number) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(number),
            name: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    if let Ok(number) = name.parse::<u32>() {
        return ParsedName {
            number: Some(number),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}
