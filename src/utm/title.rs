/// Format a free-text title for use as `utm_content`
///
/// Lowercases, drops everything that is neither a word character
/// (`[A-Za-z0-9_]`) nor whitespace, then turns every whitespace run into a
/// single `_`. The output only contains `[a-z0-9_]`, so applying it twice is a
/// no-op.
///
/// Whitespace follows the ECMAScript `\s` class, which differs from
/// `char::is_whitespace` on U+0085 (not whitespace) and U+FEFF (whitespace).
pub fn format_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if is_title_whitespace(c) {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            in_whitespace = false;
        }
        // 其它字符直接丢弃，不打断空白序列
    }

    out
}

fn is_title_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}
