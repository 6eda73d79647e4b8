// SPDX-License-Identifier: MPL-2.0
use crate::config::{LightboxConfig, DEFAULT_LOCALE};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fmt;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &LightboxConfig::default())
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish_non_exhaustive()
    }
}

impl I18n {
    pub fn new(explicit_lang: Option<&str>, config: &LightboxConfig) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = filename
                .strip_suffix(".ftl")
                .and_then(|stem| stem.parse::<LanguageIdentifier>().ok())
            else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((_, errors)) => {
                    tracing::warn!(%filename, count = errors.len(), "skipping unparsable translation file");
                    continue;
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            // Readouts end up in plain text, not bidi-aware markup.
            bundle.set_use_isolating(false);
            if bundle.add_resource(resource).is_err() {
                tracing::warn!(%filename, "translation file redefines messages");
                continue;
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let default_locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap_or_default();
        let current_locale = resolve_locale(
            explicit_lang,
            config.general.language.as_deref(),
            &available_locales,
        )
        .unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates a message with string arguments, e.g. `("reason", "404")`.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.to_string());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn resolve_locale(
    explicit_lang: Option<&str>,
    config_lang: Option<&str>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let pick = |lang_str: &str| {
        lang_str
            .parse::<LanguageIdentifier>()
            .ok()
            .filter(|lang| available.contains(lang))
    };

    // 1. Explicit language (CLI or host)
    if let Some(lang) = explicit_lang.and_then(pick) {
        return Some(lang);
    }

    // 2. Config file
    if let Some(lang) = config_lang.and_then(pick) {
        return Some(lang);
    }

    // 3. OS locale
    sys_locale::get_locale().as_deref().and_then(pick)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn test_resolve_locale_explicit() {
        let lang = resolve_locale(Some("fr"), Some("en-US"), &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_config() {
        let lang = resolve_locale(None, Some("fr"), &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_unknown_falls_through() {
        let lang = resolve_locale(Some("de"), None, &available());
        // System dependent: whatever comes back must be one we ship.
        if let Some(l) = lang {
            assert!(available().contains(&l));
        }
    }

    #[test]
    fn embedded_locales_are_loaded() {
        let i18n = I18n::new(Some("en-US"), &LightboxConfig::default());
        assert!(i18n.available_locales.contains(&"en-US".parse().unwrap()));
        assert!(i18n.available_locales.contains(&"fr".parse().unwrap()));
        assert_eq!(i18n.current_locale().to_string(), "en-US");
    }

    #[test]
    fn error_placeholder_includes_reason() {
        let i18n = I18n::new(Some("en-US"), &LightboxConfig::default());
        assert_eq!(
            i18n.tr_with_args("lightbox-load-error", &[("reason", "404")]),
            "Unable to load content (404)"
        );
    }

    #[test]
    fn config_language_selects_french() {
        let mut config = LightboxConfig::default();
        config.general.language = Some("fr".to_string());
        let i18n = I18n::new(None, &config);
        assert_eq!(i18n.tr("lightbox-loading"), "Chargement…");
        assert_eq!(
            i18n.tr_with_args("lightbox-pagination", &[("current", "2"), ("total", "5")]),
            "2 / 5"
        );
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::new(Some("en-US"), &LightboxConfig::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn set_locale_ignores_unknown() {
        let mut i18n = I18n::new(Some("en-US"), &LightboxConfig::default());
        i18n.set_locale("de".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "en-US");
        i18n.set_locale("fr".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "fr");
    }
}
