//! # voxml
//!
//! Capability-aware SSML generation with graceful per-platform fallbacks.
//!
//! Speech platforms support different subsets of SSML, with different tag
//! spellings. voxml lets you describe the speech you want once; every
//! operation checks the target platform's capability profile at call time
//! and emits the native tag, an alternate construct, or plain text — no
//! per-platform branching in caller code, and no errors for unsupported
//! features.
//!
//! ## Quick Start
//!
//! ```
//! use voxml::speak;
//!
//! // Full SSML 1.0 baseline
//! let mut ssml = speak("default");
//! ssml.add("Hello").emphasis("world");
//! assert_eq!(
//!     ssml.to_string(),
//!     "<speak>Hello<emphasis>world</emphasis></speak>"
//! );
//!
//! // Same composition, platform without emphasis support
//! let mut ssml = speak("cortana");
//! ssml.add("I mean").emphasis("wow!");
//! assert!(!ssml.to_string().contains("emphasis"));
//! assert_eq!(ssml.to_plain_text(), "I mean wow!");
//! ```
//!
//! ## Configuration
//!
//! Profiles come from [`Platform`] presets, typed [`FeatureOverrides`], or
//! JSON via [`Options::from_json`]. Session options (base URL, language,
//! pretty-printing, a pronunciation [`Lexicon`]) ride along on [`Options`]:
//!
//! ```
//! use voxml::{speak, Lexicon, Options};
//!
//! let lexicon: Lexicon = [("sewage", "ˈsuːɪdʒ")].into_iter().collect();
//! let mut ssml = speak(Options::preset("alexa").with_lexicon(lexicon));
//! ssml.add("the sewage plant");
//! assert_eq!(
//!     ssml.to_string(),
//!     "<speak>the <phoneme alphabet=\"ipa\" ph=\"ˈsuːɪdʒ\">sewage</phoneme> plant</speak>"
//! );
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod features;
pub mod lexicon;
pub mod options;
pub mod plain;
pub mod variations;
pub mod xml;

pub use builder::{AudioSource, Nested, PauseTime, Prosody, Scope, Speech, SpeechBuilder, nest, speak};
pub use error::{Error, Result};
pub use features::{
    AudioSupport, EffectSupport, FeatureOverrides, Features, PhonemeSupport, Platform, SpeakAttrs,
    resolve_overrides,
};
pub use lexicon::{Lexicon, Pronunciation};
pub use options::Options;
