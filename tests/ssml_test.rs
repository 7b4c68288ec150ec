//! End-to-end builder tests: per-platform tag emission and every
//! degradation path.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use voxml::{
    AudioSource, FeatureOverrides, Options, Platform, Prosody, SpeakAttrs, nest, speak,
};

// ============================================================================
// Root element
// ============================================================================

#[test]
fn empty_default_document() {
    assert_eq!(speak("default").to_string(), "<speak/>");
}

#[test]
fn version_override() {
    let overrides = FeatureOverrides {
        speak: Some(SpeakAttrs {
            version: "1.1".to_string(),
            ..SpeakAttrs::default()
        }),
        ..FeatureOverrides::default()
    };
    let ssml = speak(&overrides);
    assert_eq!(ssml.to_string(), "<speak version=\"1.1\"/>");
}

#[test]
fn required_root_attributes() {
    assert_eq!(
        speak("cortana").to_string(),
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" xml:lang=\"en-US\"/>"
    );
}

#[test]
fn lang_option_applies_to_root() {
    let ssml = speak(Options::platform(Platform::Google).with_lang("de"));
    assert_eq!(ssml.to_string(), "<speak xml:lang=\"de\"/>");
}

#[test]
fn lang_option_overrides_profile_default() {
    let ssml = speak(Options::platform(Platform::Cortana).with_lang("de"));
    assert_eq!(
        ssml.to_string(),
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" xml:lang=\"de\"/>"
    );
}

// ============================================================================
// add: tokens and spacing
// ============================================================================

#[test]
fn add_string() {
    let mut ssml = speak("default");
    ssml.add("hello");
    assert_eq!(ssml.to_string(), "<speak>hello</speak>");
}

#[test]
fn successive_tokens_joined_by_one_space() {
    let mut ssml = speak("default");
    ssml.add("hello").add("world");
    assert_eq!(ssml.to_string(), "<speak>hello world</speak>");
}

#[test]
fn explicit_boundary_whitespace_is_preserved() {
    let mut ssml = speak("default");
    ssml.add("hello ").add("world");
    assert_eq!(ssml.to_string(), "<speak>hello world</speak>");

    let mut ssml = speak("default");
    ssml.add("hello").add(" world");
    assert_eq!(ssml.to_string(), "<speak>hello world</speak>");
}

#[test]
fn add_number() {
    let mut ssml = speak("default");
    ssml.add(42);
    assert_eq!(ssml.to_string(), "<speak>42</speak>");
}

#[test]
fn add_sequence() {
    let mut ssml = speak("default");
    ssml.add(vec!["knock", "knock"]);
    assert_eq!(ssml.to_string(), "<speak>knock knock</speak>");
}

#[test]
fn add_nested_closure() {
    let mut ssml = speak("default");
    ssml.add(nest(|s| {
        s.add("hi");
    }));
    assert_eq!(ssml.to_string(), "<speak>hi</speak>");
}

#[test]
fn add_none_is_ignored() {
    let mut ssml = speak("default");
    ssml.add(None::<&str>);
    assert_eq!(ssml.to_string(), "<speak/>");
}

// ============================================================================
// sub
// ============================================================================

#[test]
fn sub_supported() {
    let mut ssml = speak("default");
    ssml.sub("kg", "Kilo");
    assert_eq!(ssml.to_string(), "<speak><sub alias=\"Kilo\">kg</sub></speak>");
}

#[test]
fn sub_unsupported_uses_alias_as_text() {
    let mut ssml = speak(&FeatureOverrides {
        sub: Some(false),
        ..FeatureOverrides::default()
    });
    ssml.sub("kg", "Kilo");
    assert_eq!(ssml.to_string(), "<speak>Kilo</speak>");
}

// ============================================================================
// phoneme
// ============================================================================

#[test]
fn phoneme_with_explicit_alphabet() {
    let mut ssml = speak("alexa");
    ssml.phoneme(
        "Quote",
        HashMap::from([("x-sampa".to_string(), "\"kvo:t@".to_string())]),
    );
    assert_eq!(
        ssml.to_string(),
        "<speak><phoneme alphabet=\"x-sampa\" ph=\"&quot;kvo:t@\">Quote</phoneme></speak>"
    );
}

#[test]
fn phoneme_default_alphabet_is_ipa() {
    let mut ssml = speak("alexa");
    ssml.phoneme("Quote", "ˈkvoːtə");
    assert_eq!(
        ssml.to_string(),
        "<speak><phoneme alphabet=\"ipa\" ph=\"ˈkvoːtə\">Quote</phoneme></speak>"
    );
}

#[test]
fn phoneme_unsupported_keeps_text() {
    let mut ssml = speak("google");
    ssml.phoneme("Quote", "ˈkvoːtə");
    assert_eq!(ssml.to_string(), "<speak>Quote</speak>");
}

#[test]
fn phoneme_falls_back_to_sub_alphabet() {
    let mut ssml = speak("google");
    ssml.phoneme(
        "Quote",
        HashMap::from([
            ("ipa".to_string(), "ˈkvoːtə".to_string()),
            ("sub".to_string(), "Kwote".to_string()),
        ]),
    );
    assert_eq!(
        ssml.to_string(),
        "<speak><sub alias=\"Kwote\">Quote</sub></speak>"
    );
}

// ============================================================================
// break
// ============================================================================

#[test]
fn pause_without_attributes() {
    let mut ssml = speak("default");
    ssml.add("take a ").pause();
    assert_eq!(ssml.to_string(), "<speak>take a <break/></speak>");
}

#[test]
fn pause_with_duration_string() {
    let mut ssml = speak("default");
    ssml.pause_for("2s");
    assert_eq!(ssml.to_string(), "<speak><break time=\"2s\"/></speak>");
}

#[test]
fn pause_with_milliseconds() {
    let mut ssml = speak("default");
    ssml.pause_for(250);
    assert_eq!(ssml.to_string(), "<speak><break time=\"250ms\"/></speak>");
}

#[test]
fn pause_with_strength() {
    let mut ssml = speak("default");
    ssml.pause_for("x-strong");
    assert_eq!(
        ssml.to_string(),
        "<speak><break strength=\"x-strong\"/></speak>"
    );
}

#[test]
fn pause_unsupported_is_a_no_op() {
    let mut ssml = speak(&FeatureOverrides {
        break_: Some(false),
        ..FeatureOverrides::default()
    });
    ssml.add("wait").pause_for(250).add("done");
    assert_eq!(ssml.to_string(), "<speak>wait done</speak>");
}

// ============================================================================
// audio
// ============================================================================

#[test]
fn audio_with_nested_alt_text() {
    let mut ssml = speak("google");
    ssml.audio(AudioSource::new("welcome.mp3").with_alt("Hello!"));
    assert_eq!(
        ssml.to_string(),
        "<speak><audio src=\"welcome.mp3\">Hello!</audio></speak>"
    );
}

#[test]
fn audio_resolves_relative_source_against_base() {
    let mut ssml = speak(Options::platform(Platform::Alexa).with_base("https://example.com/"));
    ssml.audio("welcome.mp3");
    assert_eq!(
        ssml.to_string(),
        "<speak><audio src=\"https://example.com/welcome.mp3\"/></speak>"
    );
}

#[test]
fn audio_keeps_relative_source_with_native_base_support() {
    let options = Options::from_json(r#"{
        "features": {"speak": {"base": true}, "audio": true},
        "base": "https://example.com"
    }"#)
    .unwrap();
    let mut ssml = speak(options);
    ssml.audio("welcome.mp3");
    assert_eq!(
        ssml.to_string(),
        "<speak xml:base=\"https://example.com\"><audio src=\"welcome.mp3\"/></speak>"
    );
}

#[test]
fn audio_unsupported_uses_alt_as_sibling_text() {
    let mut ssml = speak(&FeatureOverrides {
        audio: Some(voxml::AudioSupport::Disabled),
        ..FeatureOverrides::default()
    });
    ssml.audio(AudioSource::new("welcome.mp3").with_alt("Hello!"));
    assert_eq!(ssml.to_string(), "<speak>Hello!</speak>");
}

#[test]
fn audio_without_children_support_drops_alt_entirely() {
    // Distinct from the disabled path: the tag is emitted, the alt text is
    // neither nested nor reinserted as sibling text.
    let mut ssml = speak("alexa");
    ssml.audio(AudioSource::new("welcome.mp3").with_alt("Hello!"));
    assert_eq!(
        ssml.to_string(),
        "<speak><audio src=\"welcome.mp3\"/></speak>"
    );
}

#[test]
fn audio_with_empty_source_degrades_to_alt() {
    let mut ssml = speak("default");
    ssml.audio(AudioSource::new("").with_alt("Hello!"));
    assert_eq!(ssml.to_string(), "<speak>Hello!</speak>");
}

// ============================================================================
// emphasis
// ============================================================================

#[test]
fn emphasis_supported() {
    let mut ssml = speak("default");
    ssml.add("I mean ").emphasis("wow!");
    assert_eq!(
        ssml.to_string(),
        "<speak>I mean <emphasis>wow!</emphasis></speak>"
    );
}

#[test]
fn emphasis_with_level() {
    let mut ssml = speak("default");
    ssml.add("I mean ").emphasis_with("strong", "wow!");
    assert_eq!(
        ssml.to_string(),
        "<speak>I mean <emphasis level=\"strong\">wow!</emphasis></speak>"
    );
}

#[test]
fn emphasis_unsupported_flattens_to_text() {
    let mut ssml = speak(&FeatureOverrides {
        emphasis: Some(false),
        ..FeatureOverrides::default()
    });
    ssml.add("I mean ").emphasis("wow!");
    assert_eq!(ssml.to_string(), "<speak>I mean wow!</speak>");
}

// ============================================================================
// structure: p, s, nesting, chaining
// ============================================================================

#[test]
fn paragraph_and_sentence_nesting() {
    let mut ssml = speak("default");
    ssml.add("hello ")
        .p(nest(|p| {
            p.s("one").s("two");
        }))
        .add("three");
    assert_eq!(
        ssml.to_string(),
        "<speak>hello <p><s>one</s><s>two</s></p>three</speak>"
    );
}

#[test]
fn chaining_after_a_scope_stays_at_the_outer_node() {
    let mut ssml = speak("default");
    ssml.s("inner").add("outer");
    assert_eq!(ssml.to_string(), "<speak><s>inner</s>outer</speak>");
}

#[test]
fn unsupported_scope_still_runs_nested_content_flat() {
    let mut ssml = speak(&FeatureOverrides {
        p: Some(false),
        ..FeatureOverrides::default()
    });
    ssml.p(nest(|p| {
        p.add("one").add("two");
    }));
    assert_eq!(ssml.to_string(), "<speak>one two</speak>");
}

// ============================================================================
// lang
// ============================================================================

#[test]
fn lang_on_a_sentence_scope() {
    let mut ssml = speak("default");
    ssml.s(nest(|s| {
        s.lang("de").add("hi");
    }));
    assert_eq!(ssml.to_string(), "<speak><s xml:lang=\"de\">hi</s></speak>");
}

#[test]
fn lang_unsupported_is_a_no_op() {
    let mut ssml = speak("alexa");
    ssml.s(nest(|s| {
        s.lang("de").add("hi");
    }));
    assert_eq!(ssml.to_string(), "<speak><s>hi</s></speak>");
}

#[test]
fn profile_default_lang_carries_into_scopes() {
    let mut ssml = speak("cortana");
    ssml.p("hi");
    assert_eq!(
        ssml.to_string(),
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" xml:lang=\"en-US\"><p xml:lang=\"en-US\">hi</p></speak>"
    );
}

// ============================================================================
// w
// ============================================================================

#[test]
fn word_role_supported() {
    let mut ssml = speak("alexa");
    ssml.add("read, ").w("amazon:VBD", "read");
    assert_eq!(
        ssml.to_string(),
        "<speak>read, <w role=\"amazon:VBD\">read</w></speak>"
    );
}

#[test]
fn word_role_unsupported_flattens_to_text() {
    let mut ssml = speak("default");
    ssml.add("read, ").w("amazon:VBD", "read");
    assert_eq!(ssml.to_string(), "<speak>read, read</speak>");
}

// ============================================================================
// effect
// ============================================================================

#[test]
fn effect_uses_renamed_tag() {
    let mut ssml = speak("alexa");
    ssml.effect("whispered", "psst");
    assert_eq!(
        ssml.to_string(),
        "<speak><amazon:effect name=\"whispered\">psst</amazon:effect></speak>"
    );
}

#[test]
fn effect_unsupported_flattens_to_text() {
    let mut ssml = speak("default");
    ssml.effect("whispered", "psst");
    assert_eq!(ssml.to_string(), "<speak>psst</speak>");
}

// ============================================================================
// say-as
// ============================================================================

#[test]
fn say_as_ordinal() {
    let mut ssml = speak("default");
    ssml.say_as("ordinal", 1).add(" try");
    assert_eq!(
        ssml.to_string(),
        "<speak><say-as interpret-as=\"ordinal\">1</say-as> try</speak>"
    );
}

#[test]
fn say_as_with_format() {
    let mut ssml = speak("default");
    ssml.say_as_with("date", "2018-01-01", Some("y"), None);
    assert_eq!(
        ssml.to_string(),
        "<speak><say-as interpret-as=\"date\" format=\"y\">2018-01-01</say-as></speak>"
    );
}

#[test]
fn say_as_unsupported_keeps_text() {
    let mut ssml = speak(&FeatureOverrides {
        say_as: Some(false),
        ..FeatureOverrides::default()
    });
    ssml.say_as("ordinal", 1).add(" try");
    assert_eq!(ssml.to_string(), "<speak>1 try</speak>");
}

// ============================================================================
// prosody
// ============================================================================

#[test]
fn prosody_supported() {
    let mut ssml = speak("default");
    ssml.add("hey ")
        .prosody(Prosody::new().pitch("low").rate("slow"), "ho");
    assert_eq!(
        ssml.to_string(),
        "<speak>hey <prosody pitch=\"low\" rate=\"slow\">ho</prosody></speak>"
    );
}

#[test]
fn prosody_unsupported_keeps_text() {
    let mut ssml = speak("google");
    ssml.add("hey ")
        .prosody(Prosody::new().pitch("low").rate("slow"), "ho");
    assert_eq!(ssml.to_string(), "<speak>hey ho</speak>");
}

// ============================================================================
// lexicon
// ============================================================================

#[test]
fn lexicon_routes_graphemes_through_phoneme_and_sub() {
    let options = Options::from_json(r#"{
        "features": "alexa",
        "lexicon": {"foo": "fu", "bar": {"sub": "ba"}}
    }"#)
    .unwrap();
    let mut ssml = speak(options);
    ssml.add("foo bar");
    assert_eq!(
        ssml.to_string(),
        "<speak><phoneme alphabet=\"ipa\" ph=\"fu\">foo</phoneme> <sub alias=\"ba\">bar</sub></speak>"
    );
}

#[test]
fn lexicon_entry_without_acceptable_alphabet_stays_text() {
    let mut lexicon = voxml::Lexicon::new();
    lexicon.insert(
        "foo",
        HashMap::from([("x-sampa".to_string(), "fu".to_string())]),
    );
    // Google accepts no phoneme alphabet; sub is still on, but the entry
    // has no sub alias either.
    let options = Options::platform(Platform::Google).with_lexicon(lexicon);
    let mut ssml = speak(options);
    ssml.add("say foo now");
    assert_eq!(ssml.to_string(), "<speak>say foo now</speak>");
}

// ============================================================================
// plain text rendering
// ============================================================================

#[test]
fn plain_text_of_structured_document() {
    let mut ssml = speak("default");
    ssml.p(nest(|p| {
        p.s("one").s("two");
    }))
    .p("three")
    .add("four");
    assert_eq!(ssml.to_plain_text(), "one two\n\nthree\n\nfour");
}

#[test]
fn pretty_printing_indents_structure() {
    let mut ssml = speak(Options::platform(Platform::Default).with_pretty(true));
    ssml.p(nest(|p| {
        p.s("one").s("two");
    }));
    assert_eq!(
        ssml.to_string(),
        "<speak>\n  <p>\n    <s>one</s>\n    <s>two</s>\n  </p>\n</speak>"
    );
}
