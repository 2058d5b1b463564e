//! Prompt text normalization.

/// Ensure every comma inside a prompt is followed by whitespace.
///
/// A comma already followed by any whitespace is left alone, as is a comma
/// that ends the string. Applying this twice is the same as applying it once.
pub fn normalize_prompt(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len() + prompt.len() / 8);
    let mut chars = prompt.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch == ',' && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            out.push(' ');
        }
    }
    out
}
