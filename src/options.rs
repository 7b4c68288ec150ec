//! Shared builder options: resolved profile, base URL, language, lexicon.
//!
//! One `Options` value is owned by the root builder of a document; every
//! nested scope borrows it immutably, so it never changes mid-composition.

use std::str::FromStr;

use tracing::warn;

use crate::features::{FeatureOverrides, Features, Platform, resolve_overrides};
use crate::lexicon::{Lexicon, LexiconMatcher};

/// Configuration shared by all scopes of one document.
#[derive(Debug, Clone)]
pub struct Options {
    features: Features,
    base: Option<String>,
    lang: Option<String>,
    pretty: bool,
    lexicon: Option<Lexicon>,
    matcher: Option<LexiconMatcher>,
}

impl Options {
    /// The full SSML 1.0 baseline with no overrides.
    pub fn new() -> Self {
        Self::from_features(Features::full())
    }

    /// Options for a known platform preset.
    pub fn platform(platform: Platform) -> Self {
        Self::from_features(platform.features())
    }

    /// Permissive preset lookup, mirroring the stringly configuration
    /// surface: an unknown name logs a warning and falls back to the full
    /// baseline instead of failing. Use [`Platform::from_str`] for the
    /// strict form.
    pub fn preset(name: &str) -> Self {
        match Platform::from_str(name) {
            Ok(platform) => Self::platform(platform),
            Err(_) => {
                warn!(preset = name, "unknown platform preset, using full baseline");
                Self::new()
            }
        }
    }

    /// Options carrying an already resolved profile.
    pub fn from_features(features: Features) -> Self {
        Self {
            features,
            base: None,
            lang: None,
            pretty: false,
            lexicon: None,
            matcher: None,
        }
    }

    /// Overrides shallow-merged on top of the default preset.
    pub fn with_overrides(overrides: &FeatureOverrides) -> Self {
        Self::from_features(resolve_overrides(overrides))
    }

    /// Base URL that relative audio sources resolve against.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Document language, overriding the profile's default.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Indent the serialized markup.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Attach a pronunciation lexicon. The grapheme matcher is compiled
    /// here, once, and shared by every scope of the document.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.matcher = LexiconMatcher::compile(&lexicon);
        self.lexicon = Some(lexicon);
        self
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn lexicon(&self) -> Option<&Lexicon> {
        self.lexicon.as_ref()
    }

    pub(crate) fn matcher(&self) -> Option<&LexiconMatcher> {
        self.matcher.as_ref()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Platform> for Options {
    fn from(platform: Platform) -> Self {
        Options::platform(platform)
    }
}

impl From<&str> for Options {
    fn from(name: &str) -> Self {
        Options::preset(name)
    }
}

impl From<Features> for Options {
    fn from(features: Features) -> Self {
        Options::from_features(features)
    }
}

impl From<&FeatureOverrides> for Options {
    fn from(overrides: &FeatureOverrides) -> Self {
        Options::with_overrides(overrides)
    }
}
