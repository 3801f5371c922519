// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text cleanup for strings placed into a JUnit document.
//!
//! Test titles, failure messages and captured output routinely contain terminal color codes and
//! control characters. Neither belongs in an XML report: color codes are noise to CI dashboards,
//! and most C0/C1 control characters are not allowed in XML text at all. A report containing one
//! fails to parse.

use regex::Regex;
use std::sync::LazyLock;

/// Matches CSI and OSC escape sequences, introduced by either `ESC` or the single-byte CSI
/// (`U+009B`). Nothing outside a sequence is matched, so tabs and carriage returns survive.
static ANSI_ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x1b\x{9b}][\[\]()#;?]*",
        r"(?:",
        r"(?:(?:(?:;[-a-zA-Z\d/#&.:=?%@~_]+)*|[a-zA-Z\d]+(?:;[-a-zA-Z\d/#&.:=?%@~_]*)*)?\x07)",
        r"|",
        r"(?:(?:\d{1,4}(?:;\d{0,4})*)?[\dA-PR-TZcf-ntqry=><~])",
        r")",
    ))
    .expect("ANSI escape regex is valid")
});

/// Returns true if `c` is in the set of code points removed by [`remove_invalid_chars`].
///
/// This is a subset of the characters excluded by <https://www.w3.org/TR/xml/#charsets>, plus
/// the discouraged C1 controls and the `U+FDD0..=U+FDFF` block. Surrogates can't occur in a Rust
/// string, so they aren't listed.
pub fn is_invalid_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}'
            | '\u{b}'
            | '\u{c}'
            | '\u{e}'..='\u{1f}'
            | '\u{7f}'..='\u{84}'
            | '\u{86}'..='\u{9f}'
            | '\u{fdd0}'..='\u{fdff}'
            | '\u{ffff}'
    )
}

/// Removes every code point rejected by [`is_invalid_char`]. No replacement character is
/// inserted.
pub fn remove_invalid_chars(input: &str) -> String {
    input.replace(is_invalid_char, "")
}

/// Removes ANSI escape sequences (colors, cursor movement, hyperlinks and the like). Every other
/// character, including other control characters, is left in place.
pub fn strip_ansi(input: &str) -> String {
    ANSI_ESCAPE_REGEX.replace_all(input, "").into_owned()
}

/// Applies both [`strip_ansi`] and [`remove_invalid_chars`].
///
/// ANSI sequences are removed first: the escape character is itself an invalid XML character, and
/// removing it on its own would leave the rest of the sequence (e.g. `[31m`) behind.
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    remove_invalid_chars(&strip_ansi(input))
}
