//! JSON configuration intake.
//!
//! Accepts the loose configuration shapes callers keep in config files: a
//! bare preset name, a feature-overrides object, or a settings object with
//! a `features` key (itself a preset name or overrides) alongside `base`,
//! `lang`, `pretty`, and `lexicon`. Capability values take their permissive
//! spellings — booleans, alternate tag names, alphabet lists, or
//! `{"children": bool}` shapes.
//!
//! ```
//! use voxml::Options;
//!
//! let options = Options::from_json(r#"{
//!     "features": "alexa",
//!     "base": "https://sounds.example.com/"
//! }"#).unwrap();
//! assert_eq!(options.base(), Some("https://sounds.example.com/"));
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::features::{
    AudioSupport, EffectSupport, FeatureOverrides, Features, PhonemeSupport, SpeakAttrs,
    resolve_overrides,
};
use crate::lexicon::Lexicon;
use crate::options::Options;

/// Settings object: `features` plus pass-through session keys.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Settings {
    features: Option<Value>,
    base: Option<String>,
    lang: Option<String>,
    pretty: Option<bool>,
    lexicon: Option<Lexicon>,
}

/// Overrides object with the permissive capability spellings.
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct OverridesValue {
    speak: Option<SpeakValue>,
    lang: Option<bool>,
    p: Option<bool>,
    s: Option<bool>,
    say_as: Option<bool>,
    phoneme: Option<PhonemeValue>,
    prosody: Option<bool>,
    sub: Option<bool>,
    #[serde(rename = "break")]
    break_: Option<bool>,
    emphasis: Option<bool>,
    audio: Option<AudioValue>,
    w: Option<bool>,
    effect: Option<EffectValue>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SpeakValue {
    version: String,
    xmlns: String,
    lang: String,
    base: BaseValue,
}

/// `speak.base` is either a support flag or a URL string; only its
/// truthiness matters here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BaseValue {
    Flag(bool),
    Url(String),
}

impl Default for BaseValue {
    fn default() -> Self {
        BaseValue::Flag(false)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PhonemeValue {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AudioValue {
    Flag(bool),
    Shape {
        #[serde(default)]
        children: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EffectValue {
    Flag(bool),
    Tag(String),
}

impl From<SpeakValue> for SpeakAttrs {
    fn from(value: SpeakValue) -> Self {
        let base = match value.base {
            BaseValue::Flag(flag) => flag,
            BaseValue::Url(url) => !url.is_empty(),
        };
        SpeakAttrs {
            version: value.version,
            xmlns: value.xmlns,
            lang: value.lang,
            base,
        }
    }
}

impl From<PhonemeValue> for PhonemeSupport {
    fn from(value: PhonemeValue) -> Self {
        match value {
            PhonemeValue::Flag(true) => PhonemeSupport::Ipa,
            PhonemeValue::Flag(false) => PhonemeSupport::Disabled,
            PhonemeValue::One(alphabet) => PhonemeSupport::Alphabets(vec![alphabet]),
            PhonemeValue::Many(alphabets) => PhonemeSupport::Alphabets(alphabets),
        }
    }
}

impl From<AudioValue> for AudioSupport {
    fn from(value: AudioValue) -> Self {
        match value {
            AudioValue::Flag(false) => AudioSupport::Disabled,
            // A bare `true` enables the element without nested content.
            AudioValue::Flag(true) => AudioSupport::Enabled { children: false },
            AudioValue::Shape { children } => AudioSupport::Enabled { children },
        }
    }
}

impl From<EffectValue> for EffectSupport {
    fn from(value: EffectValue) -> Self {
        match value {
            EffectValue::Flag(false) => EffectSupport::Disabled,
            EffectValue::Flag(true) => EffectSupport::Enabled,
            EffectValue::Tag(tag) => EffectSupport::Tag(tag),
        }
    }
}

impl From<OverridesValue> for FeatureOverrides {
    fn from(value: OverridesValue) -> Self {
        FeatureOverrides {
            speak: value.speak.map(SpeakAttrs::from),
            lang: value.lang,
            p: value.p,
            s: value.s,
            say_as: value.say_as,
            phoneme: value.phoneme.map(PhonemeSupport::from),
            prosody: value.prosody,
            sub: value.sub,
            break_: value.break_,
            emphasis: value.emphasis,
            audio: value.audio.map(AudioSupport::from),
            w: value.w,
            effect: value.effect.map(EffectSupport::from),
        }
    }
}

/// Resolve a features value: a preset name string, an overrides object, or
/// anything else (the full baseline).
fn resolve_features(value: Value) -> Result<Features> {
    match value {
        Value::String(name) => Ok(Options::preset(&name).features().clone()),
        Value::Object(_) => {
            let overrides: OverridesValue = serde_json::from_value(value)?;
            Ok(resolve_overrides(&overrides.into()))
        }
        other => {
            if !other.is_null() {
                warn!(?other, "unrecognized features value, using full baseline");
            }
            Ok(Features::full())
        }
    }
}

/// Resolve a full configuration value into [`Options`].
///
/// An object with a `features` key is a settings object; any other object
/// is taken as feature overrides.
pub(crate) fn options_from_value(value: Value) -> Result<Options> {
    match value {
        Value::Object(ref map) if map.contains_key("features") => {
            let settings: Settings = serde_json::from_value(value)?;
            let features = match settings.features {
                Some(features) => resolve_features(features)?,
                None => Features::full(),
            };
            let mut options = Options::from_features(features);
            if let Some(base) = settings.base {
                options = options.with_base(base);
            }
            if let Some(lang) = settings.lang {
                options = options.with_lang(lang);
            }
            if let Some(pretty) = settings.pretty {
                options = options.with_pretty(pretty);
            }
            if let Some(lexicon) = settings.lexicon {
                options = options.with_lexicon(lexicon);
            }
            Ok(options)
        }
        other => Ok(Options::from_features(resolve_features(other)?)),
    }
}

impl Options {
    /// Parse options from a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        options_from_value(value)
    }
}
