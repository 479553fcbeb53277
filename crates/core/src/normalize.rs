use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Join words that were split by a hyphen at the end of a line.
///
/// Only a hyphen directly followed by a line break (`\n` or `\r\n`) is
/// removed. Everything else, including other whitespace, is left untouched.
pub fn dehyphenate(text: &str) -> Cow<'_, str> {
    static RE_HYPHEN: OnceLock<Regex> = OnceLock::new();
    let re_hyphen = RE_HYPHEN.get_or_init(|| Regex::new(r"-\r?\n").unwrap());
    re_hyphen.replace_all(text, "")
}
