// ============================================================================
// Text Normalization Helpers
// ============================================================================
//
// Shared string handling for field validation:
// - Backslash unescaping, applied before pattern checks so validity is
//   judged on the unescaped value rather than its quoted form
// - HTML entity decoding, applied before length checks so entity-encoded
//   values ("&amp;") count as their rendered length
//
// ============================================================================

/// Remove backslash escapes from a string.
///
/// A backslash is dropped and the character following it is kept, including
/// a second backslash. A trailing lone backslash is dropped.
pub fn strip_slashes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                output.push(escaped);
            }
        } else {
            output.push(c);
        }
    }

    output
}

/// Count the characters of a string after decoding HTML entities.
///
/// Counting happens on Unicode scalar values, so multi-byte characters
/// count as one.
pub fn decoded_char_count(input: &str) -> usize {
    html_escape::decode_html_entities(input).chars().count()
}
