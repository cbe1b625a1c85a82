//! Relaxed JSON as written in editor settings and color schemes.
//!
//! Settings and `.sublime-color-scheme` files routinely carry `//` and
//! `/* */` comments and trailing commas. [`strip`] removes both so the text
//! can be decoded by `serde_json`. String literals are left untouched.

/// Remove comments and trailing commas from relaxed JSON text.
///
/// Comments are replaced by nothing, except that a block comment is replaced
/// by a single space so adjacent tokens stay separated. Newlines that end
/// line comments are kept so decoder diagnostics still report useful line
/// numbers.
///
/// # Examples
/// ```
/// let text = "{\n  // comment\n  \"a\": [1, 2,], /* note */ \"b\": \"//x\",\n}";
/// let strict = colored_comments::jsonc::strip(text);
/// let value: serde_json::Value = serde_json::from_str(&strict).unwrap_or_default();
/// assert_eq!(value["a"], serde_json::json!([1, 2]));
/// assert_eq!(value["b"], "//x");
/// ```
#[must_use]
pub fn strip(text: &str) -> String {
    drop_trailing_commas(&drop_comments(text))
}

fn drop_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    previous = next;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }
    out
}

fn drop_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // A comma and the whitespace after it, held back until the next
    // significant character shows whether the comma closes a container.
    let mut pending: Option<String> = None;
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if let Some(held) = pending.as_mut() {
            if ch.is_whitespace() {
                held.push(ch);
                continue;
            }
            let held = pending.take().unwrap_or_default();
            if matches!(ch, '}' | ']') {
                out.push_str(held.trim_start_matches(','));
            } else {
                out.push_str(&held);
            }
        }
        match ch {
            ',' => pending = Some(String::from(',')),
            '"' => {
                in_string = true;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    if let Some(held) = pending {
        out.push_str(&held);
    }
    out
}
