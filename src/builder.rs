//! The feature-gated speech markup builder.
//!
//! [`SpeechBuilder`] owns one output document and the resolved [`Options`];
//! every composition operation consults the capability profile at call time
//! and either emits the native tag, an alternate construct, or degrades to
//! plain text. Nested scopes ([`Scope`]) are lightweight contexts over a
//! child node of the same tree, created only when the profile actually
//! supports the scope's element — unsupported scopes stay flat.
//!
//! ```
//! use voxml::speak;
//!
//! let mut ssml = speak("alexa");
//! ssml.add("I mean").emphasis("wow!");
//! assert_eq!(
//!     ssml.to_string(),
//!     "<speak>I mean<emphasis>wow!</emphasis></speak>"
//! );
//! ```

use std::fmt;

use url::Url;

use crate::features::ScopeTag;
use crate::lexicon::{Pronunciation, Segment};
use crate::options::Options;
use crate::plain;
use crate::xml::{Document, NodeId};

/// Content that can be composed into a scope.
///
/// Implemented for strings, numbers, sequences, `Option` (where `None` is
/// silently ignored), and [`nest`] closures for nested composition.
pub trait Speech {
    fn add_to(self, scope: &mut Scope<'_>);
}

impl Speech for &str {
    fn add_to(self, scope: &mut Scope<'_>) {
        scope.add_token(self);
    }
}

impl Speech for String {
    fn add_to(self, scope: &mut Scope<'_>) {
        scope.add_token(&self);
    }
}

impl Speech for &String {
    fn add_to(self, scope: &mut Scope<'_>) {
        scope.add_token(self);
    }
}

macro_rules! numeric_speech {
    ($($t:ty),*) => {$(
        impl Speech for $t {
            fn add_to(self, scope: &mut Scope<'_>) {
                scope.add_token(&self.to_string());
            }
        }
    )*};
}

numeric_speech!(i32, i64, u32, u64, f32, f64);

impl<T: Speech> Speech for Vec<T> {
    fn add_to(self, scope: &mut Scope<'_>) {
        for item in self {
            scope.add(item);
        }
    }
}

impl<T: Speech, const N: usize> Speech for [T; N] {
    fn add_to(self, scope: &mut Scope<'_>) {
        for item in self {
            scope.add(item);
        }
    }
}

impl<T: Speech> Speech for Option<T> {
    fn add_to(self, scope: &mut Scope<'_>) {
        if let Some(item) = self {
            scope.add(item);
        }
    }
}

/// Nested composition content; see [`nest`].
pub struct Nested<F>(F);

/// Wrap a closure as [`Speech`] content. The closure runs synchronously
/// against the scope it is added to, before `add` returns.
///
/// ```
/// use voxml::{nest, speak};
///
/// let mut ssml = speak("google");
/// ssml.p(nest(|p| {
///     p.s("one").s("two");
/// }));
/// assert_eq!(ssml.to_string(), "<speak><p><s>one</s><s>two</s></p></speak>");
/// ```
pub fn nest<F>(f: F) -> Nested<F>
where
    F: for<'a> FnOnce(&mut Scope<'a>),
{
    Nested(f)
}

impl<F> Speech for Nested<F>
where
    F: for<'a> FnOnce(&mut Scope<'a>),
{
    fn add_to(self, scope: &mut Scope<'_>) {
        (self.0)(scope);
    }
}

/// Break duration or strength value.
///
/// Numbers are milliseconds; strings containing a digit emit a `time`
/// attribute, strings without one a `strength` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseTime(String);

impl From<&str> for PauseTime {
    fn from(value: &str) -> Self {
        PauseTime(value.to_string())
    }
}

impl From<String> for PauseTime {
    fn from(value: String) -> Self {
        PauseTime(value)
    }
}

macro_rules! millis_pause {
    ($($t:ty),*) => {$(
        impl From<$t> for PauseTime {
            fn from(millis: $t) -> Self {
                PauseTime(format!("{millis}ms"))
            }
        }
    )*};
}

millis_pause!(i32, u32, u64);

/// An audio insertion source: a URL plus optional fallback alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub src: String,
    pub alt: Option<String>,
}

impl AudioSource {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

impl From<&str> for AudioSource {
    fn from(src: &str) -> Self {
        AudioSource::new(src)
    }
}

impl From<String> for AudioSource {
    fn from(src: String) -> Self {
        AudioSource::new(src)
    }
}

/// Prosody attributes, emitted in SSML's documented order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prosody {
    pub pitch: Option<String>,
    pub contour: Option<String>,
    pub range: Option<String>,
    pub rate: Option<String>,
    pub duration: Option<String>,
    pub volume: Option<String>,
}

impl Prosody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pitch(mut self, value: impl Into<String>) -> Self {
        self.pitch = Some(value.into());
        self
    }

    pub fn contour(mut self, value: impl Into<String>) -> Self {
        self.contour = Some(value.into());
        self
    }

    pub fn range(mut self, value: impl Into<String>) -> Self {
        self.range = Some(value.into());
        self
    }

    pub fn rate(mut self, value: impl Into<String>) -> Self {
        self.rate = Some(value.into());
        self
    }

    pub fn duration(mut self, value: impl Into<String>) -> Self {
        self.duration = Some(value.into());
        self
    }

    pub fn volume(mut self, value: impl Into<String>) -> Self {
        self.volume = Some(value.into());
        self
    }

    fn attrs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("pitch", &self.pitch),
            ("contour", &self.contour),
            ("range", &self.range),
            ("rate", &self.rate),
            ("duration", &self.duration),
            ("volume", &self.volume),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }
}

/// A composition context over one node of the output tree.
///
/// The root builder and every nested scope expose the same operations; a
/// scope created for an unsupported feature never exists — content lands in
/// the parent node instead.
pub struct Scope<'a> {
    doc: &'a mut Document,
    opts: &'a Options,
    node: NodeId,
}

impl<'a> Scope<'a> {
    /// Add content: text is tokenized, sequences recurse, [`nest`] closures
    /// run against this scope.
    pub fn add(&mut self, content: impl Speech) -> &mut Self {
        content.add_to(self);
        self
    }

    /// Set `xml:lang` on the current element.
    ///
    /// No-op unless the tag is non-empty, the profile supports `lang`, and
    /// the current element is one of the scope-bearing names.
    pub fn lang(&mut self, tag: &str) -> &mut Self {
        if !tag.is_empty() && self.opts.features().lang {
            if let Some(name) = self.doc.name(self.node) {
                if matches!(name, "speak" | "p" | "s" | "voice") {
                    self.doc.set_attr(self.node, "xml:lang", tag);
                }
            }
        }
        self
    }

    /// Language initialization for a freshly created scope element: the
    /// explicit options language, else the profile default. Root attribute
    /// emission never re-runs below the root; this rule does.
    pub(crate) fn init_lang(&mut self) {
        let opts = self.opts;
        let lang = opts
            .lang()
            .filter(|l| !l.is_empty())
            .unwrap_or(&opts.features().speak.lang);
        let lang = lang.to_string();
        self.lang(&lang);
    }

    fn add_text(&mut self, text: &str) {
        self.doc.append_text(self.node, text);
    }

    /// Append text with single-space joining: one space is inserted first
    /// iff the text has no leading whitespace and the current last child is
    /// a text node without trailing whitespace. With a lexicon configured,
    /// the text is scanned and known graphemes route through [`phoneme`].
    ///
    /// [`phoneme`]: Scope::phoneme
    fn add_token(&mut self, text: &str) {
        let opts = self.opts;
        let starts_with_space = text.chars().next().is_some_and(char::is_whitespace);
        if !starts_with_space {
            if let Some(last) = self.doc.last_child(self.node) {
                if let Some(value) = self.doc.text(last) {
                    if value.chars().next_back().is_some_and(|c| !c.is_whitespace()) {
                        self.add_text(" ");
                    }
                }
            }
        }
        match (opts.lexicon(), opts.matcher()) {
            (Some(lexicon), Some(matcher)) => {
                for segment in matcher.segments(text) {
                    match segment {
                        Segment::Grapheme(grapheme) => match lexicon.get(grapheme) {
                            Some(pronunciation) => self.phoneme_in(grapheme, pronunciation),
                            None => self.add_text(grapheme),
                        },
                        Segment::Literal(literal) => self.add_text(literal),
                    }
                }
            }
            _ => self.add_text(text),
        }
    }

    /// Add a `sub` substitution. Without `sub` support the alias is added
    /// as ordinary tokenized content instead.
    pub fn sub(&mut self, text: &str, alias: &str) -> &mut Self {
        if self.opts.features().sub {
            let el = self.doc.append_element(self.node, "sub");
            self.doc.set_attr(el, "alias", alias);
            self.doc.append_text(el, text);
        } else {
            self.add(alias);
        }
        self
    }

    /// Add a `phoneme` pronunciation.
    ///
    /// When the pronunciation carries multiple alphabets, the first one the
    /// profile accepts wins. The pseudo-alphabet `sub` (acceptable whenever
    /// the `sub` feature is on) degrades to a substitution; with no
    /// acceptable alphabet at all, the plain text is kept.
    pub fn phoneme(&mut self, text: &str, pronunciation: impl Into<Pronunciation>) -> &mut Self {
        let pronunciation = pronunciation.into();
        self.phoneme_in(text, &pronunciation);
        self
    }

    fn phoneme_in(&mut self, text: &str, pronunciation: &Pronunciation) {
        let features = self.opts.features();
        let mut alphabets = features.phoneme.alphabets();
        if features.sub {
            alphabets.push("sub");
        }
        let supported = alphabets
            .iter()
            .find_map(|alphabet| pronunciation.get(alphabet).map(|ph| (*alphabet, ph)));
        match supported {
            // Plain append, not a token: re-tokenizing here would send the
            // text back through the lexicon scan.
            None => self.add_text(text),
            Some(("sub", alias)) => {
                self.sub(text, alias);
            }
            Some((alphabet, ph)) => {
                let el = self.doc.append_element(self.node, "phoneme");
                self.doc.set_attr(el, "alphabet", alphabet);
                self.doc.set_attr(el, "ph", ph);
                self.doc.append_text(el, text);
            }
        }
    }

    /// Add a bare `break`. No-op when unsupported.
    pub fn pause(&mut self) -> &mut Self {
        if self.opts.features().break_ {
            self.doc.append_element(self.node, "break");
        }
        self
    }

    /// Add a `break` with a duration (milliseconds or a duration string)
    /// or a named strength level. No-op when unsupported.
    pub fn pause_for(&mut self, time: impl Into<PauseTime>) -> &mut Self {
        if !self.opts.features().break_ {
            return self;
        }
        let PauseTime(value) = time.into();
        let attr = if value.contains(|c: char| c.is_ascii_digit()) {
            "time"
        } else {
            "strength"
        };
        let el = self.doc.append_element(self.node, "break");
        self.doc.set_attr(el, attr, &value);
        self
    }

    /// Add an `audio` element.
    ///
    /// Without audio support (or without a source URL) the alt text is
    /// added as ordinary content. With support, the source resolves against
    /// the options base unless the platform handles `xml:base` natively,
    /// and alt text nests inside the element only when the profile allows
    /// audio children — otherwise it is dropped, not reinserted as sibling
    /// text.
    pub fn audio(&mut self, source: impl Into<AudioSource>) -> &mut Self {
        let AudioSource { src, alt } = source.into();
        let opts = self.opts;
        if src.is_empty() || !opts.features().audio.is_enabled() {
            self.add(alt);
            return self;
        }
        let resolved = self.resolve(&src);
        let el = self.doc.append_element(self.node, "audio");
        self.doc.set_attr(el, "src", &resolved);
        if let Some(alt) = alt {
            if opts.features().audio.allows_children() {
                self.doc.append_text(el, &alt);
            }
        }
        self
    }

    /// Resolve a href against the configured base. Platforms with native
    /// `xml:base` support get the href unchanged; unparseable bases fall
    /// back to the raw href.
    fn resolve(&self, href: &str) -> String {
        if self.opts.features().speak.base {
            return href.to_string();
        }
        match self.opts.base() {
            Some(base) => Url::parse(base)
                .and_then(|base| base.join(href))
                .map(|url| url.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => href.to_string(),
        }
    }

    /// Add a `say-as` with an `interpret-as` attribute.
    pub fn say_as(&mut self, interpret_as: &str, text: impl ToString) -> &mut Self {
        self.say_as_with(interpret_as, text, None, None)
    }

    /// [`say_as`](Scope::say_as) with optional `format` and `detail`
    /// attributes, emitted only when non-empty.
    pub fn say_as_with(
        &mut self,
        interpret_as: &str,
        text: impl ToString,
        format: Option<&str>,
        detail: Option<&str>,
    ) -> &mut Self {
        let text = text.to_string();
        if !self.opts.features().say_as {
            self.add_token(&text);
            return self;
        }
        let el = self.doc.append_element(self.node, "say-as");
        self.doc.set_attr(el, "interpret-as", interpret_as);
        if let Some(format) = format.filter(|f| !f.is_empty()) {
            self.doc.set_attr(el, "format", format);
        }
        if let Some(detail) = detail.filter(|d| !d.is_empty()) {
            self.doc.set_attr(el, "detail", detail);
        }
        self.doc.append_text(el, &text);
        self
    }

    /// Add a `prosody` element; degrades to the bare text when unsupported.
    pub fn prosody(&mut self, attrs: Prosody, text: impl ToString) -> &mut Self {
        let text = text.to_string();
        if !self.opts.features().prosody {
            self.add_token(&text);
            return self;
        }
        let el = self.doc.append_element(self.node, "prosody");
        for (name, value) in attrs.attrs() {
            self.doc.set_attr(el, name, value);
        }
        self.doc.append_text(el, &text);
        self
    }

    /// Shared nested-scope machinery: supported scopes get one child
    /// element and a child context; unsupported content stays flat in the
    /// current node. Chaining always continues at the outer scope.
    fn wrap(&mut self, content: impl Speech, scope: ScopeTag, attrs: &[(&str, &str)]) {
        let opts = self.opts;
        match opts.features().scope_tag(scope) {
            Some(tag) => {
                let el = self.doc.append_element(self.node, tag);
                for (name, value) in attrs {
                    self.doc.set_attr(el, name, value);
                }
                let mut child = Scope {
                    doc: &mut *self.doc,
                    opts,
                    node: el,
                };
                child.init_lang();
                child.add(content);
            }
            None => {
                self.add(content);
            }
        }
    }

    /// Wrap content in an `emphasis` element.
    pub fn emphasis(&mut self, content: impl Speech) -> &mut Self {
        self.wrap(content, ScopeTag::Emphasis, &[]);
        self
    }

    /// Wrap content in an `emphasis` element with a level.
    pub fn emphasis_with(&mut self, level: &str, content: impl Speech) -> &mut Self {
        self.wrap(content, ScopeTag::Emphasis, &[("level", level)]);
        self
    }

    /// Wrap content in a paragraph.
    pub fn p(&mut self, content: impl Speech) -> &mut Self {
        self.wrap(content, ScopeTag::Paragraph, &[]);
        self
    }

    /// Wrap content in a sentence.
    pub fn s(&mut self, content: impl Speech) -> &mut Self {
        self.wrap(content, ScopeTag::Sentence, &[]);
        self
    }

    /// Wrap content in a word annotation with the given role.
    pub fn w(&mut self, role: &str, content: impl Speech) -> &mut Self {
        self.wrap(content, ScopeTag::Word, &[("role", role)]);
        self
    }

    /// Wrap content in a named effect. Platforms may rename the emitted
    /// element (e.g. `amazon:effect`).
    pub fn effect(&mut self, name: &str, content: impl Speech) -> &mut Self {
        self.wrap(content, ScopeTag::Effect, &[("name", name)]);
        self
    }
}

/// Builds one speech markup document against a capability profile.
pub struct SpeechBuilder {
    opts: Options,
    doc: Document,
}

impl SpeechBuilder {
    /// Builder over the full SSML 1.0 baseline.
    pub fn new() -> Self {
        Self::with_options(Options::new())
    }

    /// Builder over resolved options.
    ///
    /// Emits the root element's required attributes (version, namespace),
    /// an `xml:base` when a base URL is configured and natively supported,
    /// and the document language.
    pub fn with_options(opts: Options) -> Self {
        let mut doc = Document::new("speak");
        let root = doc.root();
        let speak = &opts.features().speak;
        if !speak.version.is_empty() {
            doc.set_attr(root, "version", &speak.version);
        }
        if !speak.xmlns.is_empty() {
            doc.set_attr(root, "xmlns", &speak.xmlns);
        }
        if speak.base {
            if let Some(base) = opts.base() {
                doc.set_attr(root, "xml:base", base);
            }
        }
        let mut builder = Self { opts, doc };
        builder.scope().init_lang();
        builder
    }

    fn scope(&mut self) -> Scope<'_> {
        let node = self.doc.root();
        Scope {
            doc: &mut self.doc,
            opts: &self.opts,
            node,
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// The underlying markup tree.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Render the document as plain text instead of markup.
    pub fn to_plain_text(&self) -> String {
        plain::render(&self.doc)
    }

    pub fn add(&mut self, content: impl Speech) -> &mut Self {
        self.scope().add(content);
        self
    }

    pub fn lang(&mut self, tag: &str) -> &mut Self {
        self.scope().lang(tag);
        self
    }

    pub fn sub(&mut self, text: &str, alias: &str) -> &mut Self {
        self.scope().sub(text, alias);
        self
    }

    pub fn phoneme(&mut self, text: &str, pronunciation: impl Into<Pronunciation>) -> &mut Self {
        self.scope().phoneme(text, pronunciation);
        self
    }

    pub fn pause(&mut self) -> &mut Self {
        self.scope().pause();
        self
    }

    pub fn pause_for(&mut self, time: impl Into<PauseTime>) -> &mut Self {
        self.scope().pause_for(time);
        self
    }

    pub fn audio(&mut self, source: impl Into<AudioSource>) -> &mut Self {
        self.scope().audio(source);
        self
    }

    pub fn say_as(&mut self, interpret_as: &str, text: impl ToString) -> &mut Self {
        self.scope().say_as(interpret_as, text);
        self
    }

    pub fn say_as_with(
        &mut self,
        interpret_as: &str,
        text: impl ToString,
        format: Option<&str>,
        detail: Option<&str>,
    ) -> &mut Self {
        self.scope().say_as_with(interpret_as, text, format, detail);
        self
    }

    pub fn prosody(&mut self, attrs: Prosody, text: impl ToString) -> &mut Self {
        self.scope().prosody(attrs, text);
        self
    }

    pub fn emphasis(&mut self, content: impl Speech) -> &mut Self {
        self.scope().emphasis(content);
        self
    }

    pub fn emphasis_with(&mut self, level: &str, content: impl Speech) -> &mut Self {
        self.scope().emphasis_with(level, content);
        self
    }

    pub fn p(&mut self, content: impl Speech) -> &mut Self {
        self.scope().p(content);
        self
    }

    pub fn s(&mut self, content: impl Speech) -> &mut Self {
        self.scope().s(content);
        self
    }

    pub fn w(&mut self, role: &str, content: impl Speech) -> &mut Self {
        self.scope().w(role, content);
        self
    }

    pub fn effect(&mut self, name: &str, content: impl Speech) -> &mut Self {
        self.scope().effect(name, content);
        self
    }
}

impl Default for SpeechBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SpeechBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.doc.render(self.opts.pretty()))
    }
}

/// Create a builder from any option source: a preset name, a [`Platform`],
/// resolved [`Features`], or full [`Options`].
///
/// [`Platform`]: crate::Platform
/// [`Features`]: crate::Features
pub fn speak(options: impl Into<Options>) -> SpeechBuilder {
    SpeechBuilder::with_options(options.into())
}
