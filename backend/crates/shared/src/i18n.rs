//! Translatable messages
//!
//! User-facing text is never hard-coded in error or success paths. Instead a
//! [`Message`] carries a dotted translation key (`error.USER.NOT_FOUND`) and
//! named arguments, and is rendered once at the response boundary.
//!
//! Rendering uses the language negotiated for the current request (see
//! [`with_language`]). Keys missing from that catalog fall back to English.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use serde_json::Value;

/// Fallback language, always present in [`SUPPORTED_LANGUAGES`]
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages with an embedded catalog
pub const SUPPORTED_LANGUAGES: &[&str] = &[DEFAULT_LANGUAGE];

/// Embedded English catalog, nested by key segment.
const EN_CATALOG_SOURCE: &str = include_str!("../locales/en.json");

static EN_CATALOG: LazyLock<Value> =
    LazyLock::new(|| serde_json::from_str(EN_CATALOG_SOURCE).unwrap_or(Value::Null));

fn catalog(language: &str) -> Option<&'static Value> {
    match language {
        "en" => Some(&EN_CATALOG),
        _ => None,
    }
}

/// A translation key plus named arguments
///
/// ## Examples
/// ```rust
/// use kernel::i18n::Message;
///
/// let msg = Message::new("error.VALIDATION.MAX_LENGTH")
///     .with_arg("key", "name")
///     .with_arg("length", 250);
/// assert_eq!(msg.translate(), "name must be at most 250 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    key: Cow<'static, str>,
    args: BTreeMap<Cow<'static, str>, String>,
}

impl Message {
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            args: BTreeMap::new(),
        }
    }

    /// Attach a named argument for placeholder substitution
    pub fn with_arg(mut self, name: impl Into<Cow<'static, str>>, value: impl ToString) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// Render in the current request's language
    pub fn translate(&self) -> String {
        self.translate_for(current_language())
    }

    /// Render in `language`, falling back to English
    ///
    /// Unknown keys render as the key itself so a missing catalog entry is
    /// visible rather than silently empty.
    pub fn translate_for(&self, language: &str) -> String {
        let template = catalog(language)
            .and_then(|c| lookup(c, &self.key))
            .or_else(|| lookup(&EN_CATALOG, &self.key));

        match template {
            Some(template) => self.interpolate(template),
            None => self.key.to_string(),
        }
    }

    fn interpolate(&self, template: &str) -> String {
        self.args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}

impl From<&'static str> for Message {
    fn from(key: &'static str) -> Self {
        Message::new(key)
    }
}

impl From<String> for Message {
    fn from(key: String) -> Self {
        Message::new(key)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self
                .args
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            write!(f, " ({})", args.join(", "))?;
        }
        Ok(())
    }
}

/// Pick the best supported language for an `Accept-Language` header
pub fn negotiate(accept_language: Option<&str>) -> &'static str {
    accept_language
        .and_then(|header| negotiate_from(header, SUPPORTED_LANGUAGES))
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Highest-weighted entry of `header` that matches one of `supported`
///
/// `en-US` matches `en`. Entries with `q=0` and `*` never match.
pub fn negotiate_from(header: &str, supported: &[&'static str]) -> Option<&'static str> {
    let mut best: Option<(f32, &'static str)> = None;

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        let weight = parts
            .filter_map(|p| p.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        if tag.is_empty() || tag == "*" || weight <= 0.0 {
            continue;
        }

        let primary = tag.split('-').next().unwrap_or(tag);
        let Some(language) = supported
            .iter()
            .copied()
            .find(|lang| lang.eq_ignore_ascii_case(tag) || lang.eq_ignore_ascii_case(primary))
        else {
            continue;
        };

        // Ties keep the earlier entry
        if best.is_none_or(|(w, _)| weight > w) {
            best = Some((weight, language));
        }
    }

    best.map(|(_, language)| language)
}

#[cfg(feature = "axum")]
tokio::task_local! {
    static LANGUAGE: &'static str;
}

/// Run `fut` with `language` as the rendering language
#[cfg(feature = "axum")]
pub async fn with_language<F: std::future::Future>(language: &'static str, fut: F) -> F::Output {
    LANGUAGE.scope(language, fut).await
}

/// Language for the task being rendered; English outside [`with_language`]
pub fn current_language() -> &'static str {
    #[cfg(feature = "axum")]
    {
        LANGUAGE.try_with(|language| *language).unwrap_or(DEFAULT_LANGUAGE)
    }
    #[cfg(not(feature = "axum"))]
    {
        DEFAULT_LANGUAGE
    }
}

/// Walk a nested catalog along the dot-separated key
fn lookup<'a>(catalog: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(catalog, |node, segment| node.get(segment))?
        .as_str()
}
