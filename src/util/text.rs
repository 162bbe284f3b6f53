/// Quotes a string for source output.
///
/// The result is surrounded by the given quote character; the quote itself,
/// backslashes, newlines and tabs are escaped so the output lexes back to
/// the original text.
///
/// # Example
/// ```
/// use toylang::util::text::quoted_string;
///
/// assert_eq!(quoted_string("a\"b\n", '"'), "\"a\\\"b\\n\"");
/// ```
#[must_use]
pub fn quoted_string(source: &str, quote: char) -> String {
    let mut output = String::with_capacity(source.len() + 2);
    output.push(quote);
    for ch in source.chars() {
        match ch {
            '\n' => output.push_str("\\n"),
            '\t' => output.push_str("\\t"),
            '\\' => output.push_str("\\\\"),
            ch if ch == quote => {
                output.push('\\');
                output.push(ch);
            },
            ch => output.push(ch),
        }
    }
    output.push(quote);
    output
}
