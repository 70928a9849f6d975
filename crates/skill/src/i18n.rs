//! Localized strings and the translation function handed to handlers.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

/// Locales the skill ships strings for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    EnUs,
    DeDe,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
        }
    }

    /// Resolves a request locale tag. An exact tag wins, then a shared
    /// language (`de-AT` → `de-DE`), then the default locale.
    pub fn resolve(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Locale::default();
        };

        let all = [Locale::EnUs, Locale::DeDe];
        if let Some(exact) = all.iter().find(|l| l.as_str().eq_ignore_ascii_case(tag)) {
            return *exact;
        }

        let language = tag.split(['-', '_']).next().unwrap_or_default();
        all.iter()
            .find(|l| {
                l.as_str()
                    .split('-')
                    .next()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
            })
            .copied()
            .unwrap_or_default()
    }
}

/// Message keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strings {
    ErrorMsg,
    ErrorUnexpectedMsg,
    FallbackMsg,
    FallbackReprompt,
    GoodbyeMsg,
    HelloMsg,
    HelpMsg,
    WelcomeMsg,
}

impl Strings {
    pub fn key(&self) -> &'static str {
        match self {
            Strings::ErrorMsg => "ERROR_MSG",
            Strings::ErrorUnexpectedMsg => "ERROR_UNEXPECTED_MSG",
            Strings::FallbackMsg => "FALLBACK_MSG",
            Strings::FallbackReprompt => "FALLBACK_REPROMPT",
            Strings::GoodbyeMsg => "GOODBYE_MSG",
            Strings::HelloMsg => "HELLO_MSG",
            Strings::HelpMsg => "HELP_MSG",
            Strings::WelcomeMsg => "WELCOME_MSG",
        }
    }
}

impl AsRef<str> for Strings {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

type ResourceTable = HashMap<&'static str, &'static str>;

static RESOURCES: Lazy<HashMap<Locale, ResourceTable>> = Lazy::new(|| {
    let en_us = HashMap::from([
        ("ERROR_MSG", "Sorry, I can't understand the command. Please say again."),
        (
            "ERROR_UNEXPECTED_MSG",
            "Sorry, an unexpected error has occured. Please try again later.",
        ),
        ("FALLBACK_MSG", "This skill can't help you with that."),
        ("FALLBACK_REPROMPT", "What can I help you with?"),
        ("GOODBYE_MSG", "Goodbye!"),
        ("HELLO_MSG", "Hello world!"),
        ("HELP_MSG", "You can say hello to me!"),
        (
            "WELCOME_MSG",
            "Welcome to the Alexa Skills Kit, you can say hello!",
        ),
    ]);

    let de_de = HashMap::from([
        (
            "ERROR_MSG",
            "Sorry, Ich kann den Befehl nicht verstehen. Bitte sag es noch einmal.",
        ),
        (
            "ERROR_UNEXPECTED_MSG",
            "Sorry, ein unerwarteter Fehler ist aufgetreten. Bitte versuche es später erneut.",
        ),
        ("FALLBACK_MSG", "Dieser Skill kann dir damit nicht helfen."),
        ("FALLBACK_REPROMPT", "Wie kann ich dir helfen?"),
        ("GOODBYE_MSG", "Tschüss!"),
        ("HELLO_MSG", "Hallo Welt!"),
        ("HELP_MSG", "Du kannst Hallo zu mir sagen!"),
        (
            "WELCOME_MSG",
            "Willkommen zum Alexa Skill Kit, du kannst hallo sagen!",
        ),
    ]);

    HashMap::from([(Locale::EnUs, en_us), (Locale::DeDe, de_de)])
});

/// Translation function bound to one locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Looks up `key` for the bound locale, falling back to the default
    /// locale and then to the key itself. Each `%s` in the string is replaced
    /// by the next argument.
    pub fn t<K: AsRef<str>>(&self, key: K, args: &[&str]) -> String {
        let key = key.as_ref();
        let template = lookup(self.locale, key)
            .or_else(|| lookup(Locale::default(), key))
            .unwrap_or_else(|| {
                warn!(key, locale = self.locale.as_str(), "Missing translation");
                key
            });

        interpolate(template, args)
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    RESOURCES.get(&locale)?.get(key).copied()
}

fn interpolate(template: &str, args: &[&str]) -> String {
    let mut args = args.iter();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
