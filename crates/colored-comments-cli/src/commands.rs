//! Command implementations.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use colored_comments::host::Preferences;
use colored_comments::theme::DirectoryStore;
use colored_comments::{
    ColoredComments, CommentSource, Decoration, GenerationReport, LineCommentSource, Settings,
    Span, comment_lines,
};
use eyre::{Result, WrapErr};
use tracing::{debug, info, warn};

use crate::host::{FixedAnswer, JsonPreferences};

/// Settings file plus the context compiled from it.
pub struct Session {
    path: Utf8PathBuf,
    context: ColoredComments,
}

impl Session {
    /// Load and compile the settings at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its tags do not compile.
    pub fn open(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).wrap_err_with(|| format!("reading settings {path}"))?;
        let settings =
            Settings::from_json(&text).wrap_err_with(|| format!("loading settings {path}"))?;
        let context = ColoredComments::new(settings)?;
        Ok(Self {
            path: path.to_owned(),
            context,
        })
    }

    fn save(&self) -> Result<()> {
        let mut text = self.context.settings().to_json_pretty()?;
        text.push('\n');
        fs::write(&self.path, text).wrap_err_with(|| format!("writing settings {}", self.path))?;
        info!(path = %self.path, "saved settings");
        Ok(())
    }
}

/// 1-based line and byte column of `offset` in `buffer`.
fn line_col(buffer: &str, offset: usize) -> (usize, usize) {
    let before = buffer.get(..offset).unwrap_or(buffer);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |newline| before.len() - newline - 1) + 1;
    (line, column)
}

/// Packages directory and preferences file of the editor.
#[derive(Debug, Clone, Copy)]
pub struct Host<'a> {
    /// Packages directory holding color schemes.
    pub packages: &'a Utf8Path,
    /// Preferences file holding `color_scheme`.
    pub preferences: &'a Utf8Path,
}

/// Run one theme pass and persist the settings and preferences it changed.
fn theme_pass(
    session: &mut Session,
    host: Host<'_>,
    regenerate: bool,
    accept: bool,
) -> Result<Option<GenerationReport>> {
    let store = DirectoryStore::open(host.packages)
        .wrap_err_with(|| format!("opening packages directory {}", host.packages))?;
    let mut prefs = JsonPreferences::load(host.preferences)?;
    let mut dialogs = FixedAnswer::new(accept);

    let report = session
        .context
        .generate_theme(&store, &mut prefs, &mut dialogs, regenerate)?;
    if report.as_ref().is_some_and(|report| report.settings_changed) {
        session.save()?;
    }
    prefs.save()?;
    Ok(report)
}

/// Print every decorated comment line of `file`, in buffer order.
///
/// With `host`, a non-forced theme pass runs first while the settings still
/// ask for the derived scheme to be offered. Its failure is logged and does
/// not stop classification.
///
/// # Errors
///
/// Returns an error if the file cannot be read or output cannot be written.
pub fn classify(
    session: &mut Session,
    file: &Utf8Path,
    verbose: bool,
    host: Option<Host<'_>>,
    out: &mut impl Write,
) -> Result<()> {
    match host {
        Some(host) if session.context.wants_theme_pass() => {
            if let Err(err) = theme_pass(session, host, false, false) {
                warn!(error = %err, "theme pass failed");
            }
        }
        Some(_) => debug!("theme pass not requested by settings"),
        None => {}
    }

    let buffer = fs::read_to_string(file).wrap_err_with(|| format!("reading {file}"))?;
    let source = LineCommentSource::default();
    let lines = comment_lines(&buffer, &source.comment_regions(&buffer));
    let decorations = session.context.decorate(&lines);

    let mut rows: Vec<(Span, &Decoration)> = decorations
        .iter()
        .flat_map(|decoration| decoration.regions.iter().map(move |span| (*span, decoration)))
        .collect();
    rows.sort_by_key(|(span, _)| span.start);

    for (span, decoration) in rows {
        let (line, column) = line_col(&buffer, span.start);
        let text = buffer.get(span.start..span.end).unwrap_or_default().trim();
        write!(out, "{}\t{line}:{column}\t{text}", decoration.tag)?;
        if verbose {
            write!(out, "\t{}\t{}", decoration.scope, decoration.flags.bits())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Run a theme generation pass and persist what changed.
///
/// # Errors
///
/// Returns an error if the pass fails or settings and preferences cannot be
/// saved.
pub fn generate(
    mut session: Session,
    host: Host<'_>,
    regenerate: bool,
    accept: bool,
    out: &mut impl Write,
) -> Result<()> {
    let Some(report) = theme_pass(&mut session, host, regenerate, accept)? else {
        writeln!(out, "no tags configured")?;
        return Ok(());
    };

    let verb = if report.written() { "wrote" } else { "kept" };
    writeln!(out, "{verb} {}", report.destination.reference)?;
    if report.switched {
        writeln!(out, "switched to {}", report.destination.reference)?;
    }
    Ok(())
}

/// Restore the scheme that was active before the derived one.
///
/// # Errors
///
/// Returns an error if settings or preferences cannot be loaded or saved.
pub fn revert(mut session: Session, host: Host<'_>, out: &mut impl Write) -> Result<()> {
    let store = DirectoryStore::open(host.packages)
        .wrap_err_with(|| format!("opening packages directory {}", host.packages))?;
    let mut prefs = JsonPreferences::load(host.preferences)?;

    if session.context.revert_theme(&store, &mut prefs) {
        session.save()?;
    }
    prefs.save()?;

    match prefs.color_scheme() {
        Some(scheme) => writeln!(out, "restored {scheme}")?,
        None => writeln!(out, "color scheme preference erased")?,
    }
    Ok(())
}
