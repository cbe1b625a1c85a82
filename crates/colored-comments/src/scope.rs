//! Scope identifiers and entry names derived from colour names.

/// Namespace shared by every generated scope.
pub const SCOPE_PREFIX: &str = "colored.comments.color.";

/// Prefix of every generated theme entry name.
pub const ENTRY_NAME_PREFIX: &str = "[Colored Comments] ";

/// Scope identifier for a colour name.
///
/// The name is lowercased and spaces become periods, so `"Light Blue"` maps
/// to `colored.comments.color.light.blue`.
///
/// # Examples
/// ```
/// use colored_comments::scope::scope_for_color;
/// assert_eq!(scope_for_color("Light Blue"), "colored.comments.color.light.blue");
/// ```
#[must_use]
pub fn scope_for_color(color_name: &str) -> String {
    let mut scope = String::with_capacity(SCOPE_PREFIX.len() + color_name.len());
    scope.push_str(SCOPE_PREFIX);
    scope.push_str(&color_name.to_lowercase().replace(' ', "."));
    scope
}

/// Display name of the theme entry for a colour name.
///
/// # Examples
/// ```
/// use colored_comments::scope::entry_name;
/// assert_eq!(entry_name("light blue"), "[Colored Comments] Light Blue");
/// ```
#[must_use]
pub fn entry_name(color_name: &str) -> String {
    format!("{ENTRY_NAME_PREFIX}{}", title_case(&color_name.to_lowercase()))
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}
