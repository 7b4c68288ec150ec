//! Capability profiles: which SSML features a target platform supports.
//!
//! A [`Features`] value is an immutable description of one platform's
//! dialect. Every feature defaults to disabled; [`Features::full`] is the
//! all-enabled SSML 1.0 baseline, and the [`Platform`] presets override it
//! for the quirks of known speech engines. Callers layer their own
//! [`FeatureOverrides`] on top of the default preset — a shallow merge where
//! a supplied descriptor replaces the whole field, never parts of it.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// SSML 1.0 protocol version emitted on the root element.
pub const SSML_VERSION: &str = "1.0";
/// SSML 1.0 namespace URI.
pub const SSML_XMLNS: &str = "http://www.w3.org/2001/10/synthesis";
/// Default document language of the baseline profile.
pub const DEFAULT_LANG: &str = "en-US";

/// Root-element requirements of a profile.
///
/// Empty strings mean "do not emit the attribute". `base` declares whether
/// the platform natively resolves relative URLs via `xml:base`; when false,
/// audio sources are resolved against the options base before emission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpeakAttrs {
    pub version: String,
    pub xmlns: String,
    pub lang: String,
    pub base: bool,
}

impl SpeakAttrs {
    /// Full SSML 1.0 root attributes.
    pub fn ssml10() -> Self {
        Self {
            version: SSML_VERSION.to_string(),
            xmlns: SSML_XMLNS.to_string(),
            lang: DEFAULT_LANG.to_string(),
            base: false,
        }
    }
}

/// Phoneme support: which notation alphabets a platform accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhonemeSupport {
    #[default]
    Disabled,
    /// Phonemes supported with the default `ipa` alphabet.
    Ipa,
    /// Supported alphabets, checked in priority order.
    Alphabets(Vec<String>),
}

impl PhonemeSupport {
    /// Acceptable alphabets in priority order. Empty when disabled.
    pub(crate) fn alphabets(&self) -> Vec<&str> {
        match self {
            PhonemeSupport::Disabled => Vec::new(),
            PhonemeSupport::Ipa => vec!["ipa"],
            PhonemeSupport::Alphabets(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

/// Audio support, including whether fallback alt text may be nested inside
/// the `audio` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioSupport {
    #[default]
    Disabled,
    Enabled {
        children: bool,
    },
}

impl AudioSupport {
    pub fn is_enabled(self) -> bool {
        matches!(self, AudioSupport::Enabled { .. })
    }

    pub fn allows_children(self) -> bool {
        matches!(self, AudioSupport::Enabled { children: true })
    }
}

/// Custom-effect support. Platforms that support effects under a
/// vendor-namespaced element carry the emitted tag name in `Tag`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EffectSupport {
    #[default]
    Disabled,
    Enabled,
    /// Supported under a renamed element, e.g. `amazon:effect`.
    Tag(String),
}

/// A resolved capability profile.
///
/// Immutable once constructed: composition operations read it, nothing
/// writes it. `Features::default()` disables everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Features {
    pub speak: SpeakAttrs,
    pub lang: bool,
    pub p: bool,
    pub s: bool,
    pub say_as: bool,
    pub phoneme: PhonemeSupport,
    pub prosody: bool,
    pub sub: bool,
    pub break_: bool,
    pub emphasis: bool,
    pub audio: AudioSupport,
    pub w: bool,
    pub effect: EffectSupport,
}

/// Nested-scope features that route through the shared wrap operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeTag {
    Paragraph,
    Sentence,
    Word,
    Emphasis,
    Effect,
}

impl Features {
    /// The all-enabled SSML 1.0 baseline.
    pub fn full() -> Self {
        Self {
            speak: SpeakAttrs::ssml10(),
            lang: true,
            p: true,
            s: true,
            say_as: true,
            phoneme: PhonemeSupport::Ipa,
            prosody: true,
            sub: true,
            break_: true,
            emphasis: true,
            audio: AudioSupport::Enabled { children: true },
            w: false,
            effect: EffectSupport::Disabled,
        }
    }

    /// Shallow-merge overrides on top of this profile.
    ///
    /// Each supplied field replaces the corresponding descriptor wholesale;
    /// nested descriptor shapes are never partially merged.
    pub fn apply(&self, overrides: &FeatureOverrides) -> Self {
        let mut features = self.clone();
        if let Some(speak) = &overrides.speak {
            features.speak = speak.clone();
        }
        if let Some(lang) = overrides.lang {
            features.lang = lang;
        }
        if let Some(p) = overrides.p {
            features.p = p;
        }
        if let Some(s) = overrides.s {
            features.s = s;
        }
        if let Some(say_as) = overrides.say_as {
            features.say_as = say_as;
        }
        if let Some(phoneme) = &overrides.phoneme {
            features.phoneme = phoneme.clone();
        }
        if let Some(prosody) = overrides.prosody {
            features.prosody = prosody;
        }
        if let Some(sub) = overrides.sub {
            features.sub = sub;
        }
        if let Some(break_) = overrides.break_ {
            features.break_ = break_;
        }
        if let Some(emphasis) = overrides.emphasis {
            features.emphasis = emphasis;
        }
        if let Some(audio) = overrides.audio {
            features.audio = audio;
        }
        if let Some(w) = overrides.w {
            features.w = w;
        }
        if let Some(effect) = &overrides.effect {
            features.effect = effect.clone();
        }
        features
    }

    /// Tag name for a nested-scope feature, or `None` when unsupported.
    pub(crate) fn scope_tag(&self, scope: ScopeTag) -> Option<&str> {
        match scope {
            ScopeTag::Paragraph => self.p.then_some("p"),
            ScopeTag::Sentence => self.s.then_some("s"),
            ScopeTag::Word => self.w.then_some("w"),
            ScopeTag::Emphasis => self.emphasis.then_some("emphasis"),
            ScopeTag::Effect => match &self.effect {
                EffectSupport::Disabled => None,
                EffectSupport::Enabled => Some("effect"),
                EffectSupport::Tag(tag) => Some(tag),
            },
        }
    }
}

/// Caller overrides layered on top of the default preset.
///
/// `None` fields keep the preset's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureOverrides {
    pub speak: Option<SpeakAttrs>,
    pub lang: Option<bool>,
    pub p: Option<bool>,
    pub s: Option<bool>,
    pub say_as: Option<bool>,
    pub phoneme: Option<PhonemeSupport>,
    pub prosody: Option<bool>,
    pub sub: Option<bool>,
    pub break_: Option<bool>,
    pub emphasis: Option<bool>,
    pub audio: Option<AudioSupport>,
    pub w: Option<bool>,
    pub effect: Option<EffectSupport>,
}

/// Resolve overrides against the default preset (baseline with root
/// attribute requirements cleared).
pub fn resolve_overrides(overrides: &FeatureOverrides) -> Features {
    Platform::Default.features().apply(overrides)
}

/// Named capability presets for known speech platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Baseline with no required root attributes.
    Default,
    Alexa,
    Google,
    Cortana,
}

impl Platform {
    /// The fully resolved profile for this platform.
    pub fn features(self) -> Features {
        let full = Features::full();
        match self {
            Platform::Default => Features {
                speak: SpeakAttrs::default(),
                ..full
            },
            Platform::Alexa => Features {
                speak: SpeakAttrs::default(),
                lang: false,
                phoneme: PhonemeSupport::Alphabets(vec![
                    "ipa".to_string(),
                    "x-sampa".to_string(),
                ]),
                audio: AudioSupport::Enabled { children: false },
                w: true,
                effect: EffectSupport::Tag("amazon:effect".to_string()),
                ..full
            },
            Platform::Google => Features {
                speak: SpeakAttrs::default(),
                phoneme: PhonemeSupport::Disabled,
                prosody: false,
                ..full
            },
            Platform::Cortana => Features {
                emphasis: false,
                ..full
            },
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Platform::Default),
            "alexa" => Ok(Platform::Alexa),
            "google" => Ok(Platform::Google),
            "cortana" => Ok(Platform::Cortana),
            other => Err(Error::UnknownPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Default => "default",
            Platform::Alexa => "alexa",
            Platform::Google => "google",
            Platform::Cortana => "cortana",
        };
        f.write_str(name)
    }
}
