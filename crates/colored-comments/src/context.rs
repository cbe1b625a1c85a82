//! The per-process plugin context.
//!
//! [`ColoredComments`] owns everything that outlives a single pass: the
//! settings snapshot, the compiled matchers, the resolved tag styles and
//! whether the user has already been asked to switch schemes. Embedders
//! call [`ColoredComments::reload`] when settings change and the pass
//! methods in response to their own buffer and command events.

use std::io;

use tracing::{debug, info, warn};

use crate::classify::{Classification, CommentLine, classify};
use crate::compile::{CompiledTags, compile_tags};
use crate::decorate::{Decoration, DecorationPlan};
use crate::error::{ConfigError, ThemeError};
use crate::host::{Dialogs, Preferences, READ_ERROR_MESSAGE, switch_scheme_message};
use crate::settings::Settings;
use crate::theme::{
    Destination, MergeOutcome, ThemeDocument, ThemeFileResolver, ThemeFormat, ThemeStore,
    WriteDecision, merge_tags, resolve_source_reference,
};

/// Scheme assumed when the preferences name none.
pub const DEFAULT_COLOR_SCHEME: &str = "Mariana.sublime-color-scheme";

/// What a theme generation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Scheme the derived one was built from.
    pub source: String,
    /// Where the derived scheme lives.
    pub destination: Destination,
    /// Whether the merge appended entries.
    pub changed: bool,
    /// The write policy's verdict.
    pub decision: WriteDecision,
    /// Whether the user switched to the derived scheme during this pass.
    pub switched: bool,
    /// Whether the settings were updated and should be persisted.
    pub settings_changed: bool,
}

impl GenerationReport {
    /// Whether the destination file was written.
    #[must_use]
    pub fn written(&self) -> bool {
        self.decision != WriteDecision::Skip
    }
}

/// Compiled state shared by classification and theme passes.
#[derive(Debug, Clone)]
pub struct ColoredComments {
    settings: Settings,
    compiled: CompiledTags,
    plan: DecorationPlan,
    resolver: ThemeFileResolver,
    prompted: bool,
}

impl ColoredComments {
    /// Compile `settings` into a ready context.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a tag cannot be compiled or styled.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let compiled = compile_tags(settings.tags())?;
        let plan = DecorationPlan::new(settings.tags())?;
        Ok(Self {
            settings,
            compiled,
            plan,
            resolver: ThemeFileResolver::default(),
            prompted: false,
        })
    }

    /// Use a different destination directory for derived schemes.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ThemeFileResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the settings snapshot and recompile.
    ///
    /// On error the previous state is kept untouched. A successful reload
    /// also re-arms the scheme switch prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a tag cannot be compiled or styled.
    pub fn reload(&mut self, settings: Settings) -> Result<(), ConfigError> {
        let compiled = compile_tags(settings.tags())?;
        let plan = DecorationPlan::new(settings.tags())?;
        self.settings = settings;
        self.compiled = compiled;
        self.plan = plan;
        self.prompted = false;
        debug!(tags = self.compiled.len(), "reloaded settings");
        Ok(())
    }

    /// Current settings snapshot, including any updates made by passes.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compiled matchers in priority order.
    #[must_use]
    pub fn compiled(&self) -> &CompiledTags {
        &self.compiled
    }

    /// Destination resolver used by theme passes.
    #[must_use]
    pub fn resolver(&self) -> &ThemeFileResolver {
        &self.resolver
    }

    /// Whether buffer events should also run a (non-forced) theme pass.
    #[must_use]
    pub fn wants_theme_pass(&self) -> bool {
        self.settings.prompt_new_color_scheme() && !self.settings.tags().is_empty()
    }

    /// Classify comment lines with the cached matchers.
    #[must_use]
    pub fn classify(&self, lines: &[CommentLine<'_>]) -> Classification {
        classify(&self.compiled, lines, self.settings.continued_matching())
    }

    /// Classify comment lines and resolve their decorations.
    #[must_use]
    pub fn decorate(&self, lines: &[CommentLine<'_>]) -> Vec<Decoration> {
        self.plan.apply(&self.classify(lines))
    }

    /// Build, and when needed write, the derived color scheme.
    ///
    /// Returns `Ok(None)` when there are no tags. With `regenerate` the
    /// derived scheme is rebuilt from the remembered original scheme and
    /// always rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] when the source scheme cannot be read, parsed
    /// or recognised, or the destination cannot be written. Read and parse
    /// failures are also reported through `dialogs`. Nothing is written
    /// after an error.
    pub fn generate_theme<S, P, D>(
        &mut self,
        store: &S,
        preferences: &mut P,
        dialogs: &mut D,
        regenerate: bool,
    ) -> Result<Option<GenerationReport>, ThemeError>
    where
        S: ThemeStore + ?Sized,
        P: Preferences + ?Sized,
        D: Dialogs + ?Sized,
    {
        if self.settings.tags().is_empty() {
            debug!("no tags configured, skipping color scheme generation");
            return Ok(None);
        }

        let active = preferences.color_scheme();
        let source = match (regenerate, self.settings.old_color_scheme()) {
            (true, Some(old)) => old.to_owned(),
            _ => active
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_owned()),
        };

        let mut settings_changed = false;
        if !ThemeFileResolver::is_derived(&source)
            && self.settings.old_color_scheme() != Some(source.as_str())
        {
            self.settings.set_old_color_scheme(Some(&source));
            settings_changed = true;
        }

        let reference = resolve_source_reference(&source);
        let format = ThemeFormat::from_reference(&reference)?;
        let document = load_document(store, format, &reference).inspect_err(|err| {
            warn!(error = %err, "could not load color scheme");
            dialogs.error_message(READ_ERROR_MESSAGE);
        })?;

        let MergeOutcome { changed, document } = merge_tags(document, self.settings.tags());
        let destination = self.resolver.destination(&source);
        let decision =
            ThemeFileResolver::decide(regenerate, changed, active.as_deref(), &destination);

        match decision {
            WriteDecision::Regenerate => {
                remove_stale(store, &destination);
                write_document(store, &document, &destination)?;
            }
            WriteDecision::Write => write_document(store, &document, &destination)?,
            WriteDecision::Skip => debug!(destination = %destination.reference, "color scheme up to date"),
        }

        let mut switched = false;
        if active.as_deref() != Some(destination.reference.as_str())
            && self.settings.prompt_new_color_scheme()
            && !self.prompted
        {
            self.prompted = true;
            if dialogs.ok_cancel(&switch_scheme_message(&destination.reference)) {
                preferences.set_color_scheme(&destination.reference);
                self.settings.set_prompt_new_color_scheme(false);
                settings_changed = true;
                switched = true;
                info!(scheme = %destination.reference, "switched color scheme");
            }
        }

        Ok(Some(GenerationReport {
            source,
            destination,
            changed,
            decision,
            switched,
            settings_changed,
        }))
    }

    /// Restore the scheme that was active before the derived one.
    ///
    /// The remembered scheme is reinstated when it still exists, otherwise
    /// the preference is erased so the editor default applies. Either way the
    /// remembered scheme is forgotten. Returns whether the settings changed.
    pub fn revert_theme<S, P>(&mut self, store: &S, preferences: &mut P) -> bool
    where
        S: ThemeStore + ?Sized,
        P: Preferences + ?Sized,
    {
        match self.settings.old_color_scheme() {
            Some(old) if store.exists(&resolve_source_reference(old)) => {
                info!(scheme = old, "restoring color scheme");
                preferences.set_color_scheme(old);
            }
            _ => {
                info!("erasing color scheme preference");
                preferences.erase_color_scheme();
            }
        }
        let changed = self.settings.old_color_scheme().is_some();
        self.settings.set_old_color_scheme(None);
        changed
    }

    /// Hand the editor back its original scheme when the plugin unloads.
    pub fn restore_on_unload<P: Preferences + ?Sized>(&self, preferences: &mut P) {
        match self.settings.old_color_scheme() {
            Some(old) => preferences.set_color_scheme(old),
            None => preferences.erase_color_scheme(),
        }
    }
}

fn load_document<S: ThemeStore + ?Sized>(
    store: &S,
    format: ThemeFormat,
    reference: &str,
) -> Result<ThemeDocument, ThemeError> {
    let bytes = store
        .read(reference)
        .map_err(|source| ThemeError::SourceRead {
            reference: reference.to_owned(),
            source,
        })?;
    ThemeDocument::parse(format, &bytes, reference)
}

/// Remove a previously derived scheme. Failure is not fatal.
fn remove_stale<S: ThemeStore + ?Sized>(store: &S, destination: &Destination) {
    match store.remove(&destination.path) {
        Ok(()) => debug!(path = %destination.path, "removed stale color scheme"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %destination.path, "no stale color scheme to remove");
        }
        Err(err) => warn!(path = %destination.path, error = %err, "could not remove stale color scheme"),
    }
}

fn write_document<S: ThemeStore + ?Sized>(
    store: &S,
    document: &ThemeDocument,
    destination: &Destination,
) -> Result<(), ThemeError> {
    let bytes = document.to_bytes()?;
    store
        .write(&destination.path, &bytes)
        .map_err(|source| ThemeError::Write {
            path: destination.path.clone(),
            source,
        })?;
    info!(scheme = %destination.reference, "wrote color scheme");
    Ok(())
}
