//! Seams to the host editor's preferences and dialogs.

/// The editor-wide preferences the plugin reads and updates.
pub trait Preferences {
    /// Reference of the active color scheme, if one is set.
    fn color_scheme(&self) -> Option<String>;

    /// Make `reference` the active color scheme.
    fn set_color_scheme(&mut self, reference: &str);

    /// Fall back to the editor's default color scheme.
    fn erase_color_scheme(&mut self);
}

/// User-facing dialogs.
pub trait Dialogs {
    /// Ask an ok/cancel question. Returns `true` on ok.
    fn ok_cancel(&mut self, message: &str) -> bool;

    /// Show an error message.
    fn error_message(&mut self, message: &str);
}

/// Question asked before switching to a derived scheme.
#[must_use]
pub fn switch_scheme_message(reference: &str) -> String {
    format!(
        "Would you like to change your color scheme to '{reference}'?\n\
         To permanently disable this prompt, set 'prompt_new_color_scheme' \
         to false in the Colored Comments settings."
    )
}

/// Shown when the source scheme cannot be read.
pub const READ_ERROR_MESSAGE: &str =
    "An error occurred while reading the color scheme file. Please check the console for details.";
