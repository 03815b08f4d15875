use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Short card number taken from a branch reference, e.g. `123` from
/// `refs/heads/feature/#123-login`. Kept as the digit string the board API
/// expects rather than parsed to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRef(String);

impl CardRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn card_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#(\d+)").expect("card reference pattern is valid"))
}

/// Returns the digits of the last `#<digits>` token in `input`.
pub fn extract_card_reference(input: Option<&str>) -> Option<CardRef> {
    let input = input.filter(|s| !s.is_empty())?;
    card_ref_pattern()
        .captures_iter(input)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| CardRef(m.as_str().to_string()))
}
