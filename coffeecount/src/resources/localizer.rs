use crate::errors::CoffeeError;
use crate::resources::random::RandomChoice;
use handlebars::Handlebars;
use std::collections::HashMap;
use std::sync::Arc;
use toml::Value;

pub const WELCOME_MESSAGE: &str = "WELCOME_MESSAGE";
pub const WELCOME_REPROMPT: &str = "WELCOME_REPROMPT";
pub const COFFEE_RECORDED: &str = "COFFEE_RECORDED";
pub const COFFEE_COUNT: &str = "COFFEE_COUNT";
pub const MAINTENANCE_RECORDED: &str = "MAINTENANCE_RECORDED";
pub const CLEAN_NOW: &str = "CLEAN_NOW";
pub const COFFEES_LEFT: &str = "COFFEES_LEFT";
pub const STORE_ERROR_MESSAGE: &str = "STORE_ERROR_MESSAGE";
pub const STORE_ERROR_REPROMPT: &str = "STORE_ERROR_REPROMPT";
pub const HELP_MESSAGE: &str = "HELP_MESSAGE";
pub const HELP_REPROMPT: &str = "HELP_REPROMPT";
pub const FALLBACK_MESSAGE: &str = "FALLBACK_MESSAGE";
pub const FALLBACK_REPROMPT: &str = "FALLBACK_REPROMPT";
pub const STOP_MESSAGE: &str = "STOP_MESSAGE";
pub const ERROR_MESSAGE: &str = "ERROR_MESSAGE";

pub const REQUIRED_KEYS: [&str; 15] = [
    WELCOME_MESSAGE,
    WELCOME_REPROMPT,
    COFFEE_RECORDED,
    COFFEE_COUNT,
    MAINTENANCE_RECORDED,
    CLEAN_NOW,
    COFFEES_LEFT,
    STORE_ERROR_MESSAGE,
    STORE_ERROR_REPROMPT,
    HELP_MESSAGE,
    HELP_REPROMPT,
    FALLBACK_MESSAGE,
    FALLBACK_REPROMPT,
    STOP_MESSAGE,
    ERROR_MESSAGE,
];

const BUNDLED_LOCALES: [(&str, &str); 2] = [
    ("en-US", include_str!("./locales/en-US.toml")),
    ("de-DE", include_str!("./locales/de-DE.toml")),
];

/// Localized speech templates.
///
/// Each locale file maps a message key either to one Handlebars template or to an
/// array of variants, one of which is picked per call.
pub struct Localizer {
    templates: Handlebars<'static>,
    variants: HashMap<String, usize>,
    locales: Vec<String>,
    default_locale: String,
    chooser: Arc<dyn RandomChoice>,
}

impl Localizer {
    pub fn new(default_locale: &str, chooser: Arc<dyn RandomChoice>) -> Result<Self, CoffeeError> {
        Self::from_sources(&BUNDLED_LOCALES, default_locale, chooser)
    }

    pub fn from_sources(
        sources: &[(&str, &str)],
        default_locale: &str,
        chooser: Arc<dyn RandomChoice>,
    ) -> Result<Self, CoffeeError> {
        let mut templates = Handlebars::new();
        templates.set_strict_mode(true);
        templates.register_escape_fn(handlebars::no_escape);

        let mut variants = HashMap::new();
        let mut locales = Vec::with_capacity(sources.len());

        for (locale, source) in sources {
            let table = source
                .parse::<toml::Table>()
                .map_err(|e| CoffeeError::LocaleError(format!("Unable to parse locale {}: {}", locale, e)))?;

            if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !table.contains_key(**key)) {
                return Err(CoffeeError::LocaleError(format!(
                    "Locale {} is missing message {}",
                    locale, missing
                )));
            }

            for (key, value) in &table {
                let phrases = phrases(locale, key, value)?;

                for (idx, phrase) in phrases.iter().enumerate() {
                    templates.register_template_string(&template_name(locale, key, idx), *phrase)?;
                }

                variants.insert(variant_key(locale, key), phrases.len());
            }

            locales.push(locale.to_string());
        }

        if !locales.iter().any(|locale| locale == default_locale) {
            return Err(CoffeeError::LocaleError(format!(
                "Default locale {} is not bundled",
                default_locale
            )));
        }

        Ok(Self {
            templates,
            variants,
            locales,
            default_locale: default_locale.to_string(),
            chooser,
        })
    }

    /// Exact tag first, then any locale of the same language, then the default locale.
    pub fn resolve_locale(&self, requested: &str) -> &str {
        if let Some(locale) = self.locales.iter().find(|l| l.eq_ignore_ascii_case(requested)) {
            return locale;
        }

        let language = requested.split(['-', '_']).next().unwrap_or_default();

        self.locales
            .iter()
            .find(|l| {
                l.split('-')
                    .next()
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(language))
            })
            .unwrap_or(&self.default_locale)
    }

    pub fn translate(&self, locale: &str, key: &str, args: &serde_json::Value) -> Result<String, CoffeeError> {
        let locale = self.resolve_locale(locale);
        let count = *self.variants.get(&variant_key(locale, key)).ok_or_else(|| {
            CoffeeError::LocaleError(format!("Unknown message {} for locale {}", key, locale))
        })?;

        let idx = if count > 1 {
            self.chooser.choose(count).min(count - 1)
        } else {
            0
        };

        let message = self.templates.render(&template_name(locale, key, idx), args)?;

        Ok(message)
    }
}

fn phrases<'v>(locale: &str, key: &str, value: &'v Value) -> Result<Vec<&'v str>, CoffeeError> {
    let invalid = || CoffeeError::LocaleError(format!("Message {} of locale {} must be text", key, locale));

    let phrases = match value {
        Value::String(phrase) => vec![phrase.as_str()],
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(invalid()),
    };

    if phrases.is_empty() {
        return Err(CoffeeError::LocaleError(format!(
            "Message {} of locale {} has no variants",
            key, locale
        )));
    }

    Ok(phrases)
}

fn variant_key(locale: &str, key: &str) -> String {
    format!("{}:{}", locale, key)
}

fn template_name(locale: &str, key: &str, idx: usize) -> String {
    format!("{}:{}:{}", locale, key, idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixedChoice;
    use serde_json::json;

    fn localizer(choice: usize) -> Localizer {
        Localizer::new("en-US", Arc::new(FixedChoice(choice))).unwrap()
    }

    #[test]
    fn renders_arguments() {
        let message = localizer(0)
            .translate("en-US", COFFEES_LEFT, &json!({ "left": 1 }))
            .unwrap();

        assert_eq!(message, "1 coffees left before cleaning.");
    }

    #[test]
    fn resolves_locale_by_language() {
        let localizer = localizer(0);

        assert_eq!(localizer.resolve_locale("de-AT"), "de-DE");
        assert_eq!(localizer.resolve_locale("en-GB"), "en-US");
        assert_eq!(localizer.resolve_locale("fr-FR"), "en-US");
        assert_eq!(localizer.resolve_locale("DE-de"), "de-DE");
    }

    #[test]
    fn picks_variant_through_chooser() {
        let goodbye = localizer(1)
            .translate("en-US", STOP_MESSAGE, &serde_json::Value::Null)
            .unwrap();

        assert_eq!(goodbye, "Enjoy your coffee!");
    }

    #[test]
    fn out_of_range_choice_is_clamped() {
        let goodbye = localizer(99)
            .translate("en-US", STOP_MESSAGE, &serde_json::Value::Null)
            .unwrap();

        assert_eq!(goodbye, "See you at the next cup!");
    }

    #[test]
    fn unknown_key_is_an_error() {
        let res = localizer(0).translate("en-US", "PICTURE_URL", &serde_json::Value::Null);

        assert!(matches!(res, Err(CoffeeError::LocaleError(_))));
    }

    #[test]
    fn missing_argument_is_an_error() {
        let res = localizer(0).translate("en-US", COFFEE_COUNT, &json!({}));

        assert!(matches!(res, Err(CoffeeError::TemplateError(_))));
    }

    #[test]
    fn incomplete_locale_is_rejected() {
        let res = Localizer::from_sources(
            &[("en-US", r#"HELP_MESSAGE = "help""#)],
            "en-US",
            Arc::new(FixedChoice(0)),
        );

        assert!(matches!(res, Err(CoffeeError::LocaleError(_))));
    }

    #[test]
    fn unbundled_default_locale_is_rejected() {
        let res = Localizer::new("fr-FR", Arc::new(FixedChoice(0)));

        assert!(matches!(res, Err(CoffeeError::LocaleError(_))));
    }
}
