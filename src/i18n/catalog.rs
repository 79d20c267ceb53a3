//! Startup-loaded message catalog.
//!
//! Translations are keyed by `(message key, locale)` and baked in as static
//! bundles: English is the default locale's bundle, with Spanish and Chinese
//! translations alongside. Lookups fall back from the requested locale (full
//! tag, then primary subtag) to the default locale; a key missing everywhere
//! is a [`MessageError::NotFound`]. Result codes additionally degrade to
//! their built-in default message so a localized failure envelope can never
//! end up with an empty message.

use std::collections::HashMap;

use thiserror::Error;

use super::locale::Locale;
use crate::codes::ResultCode;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("no message for key '{key}' in locale '{locale}' or the default locale")]
    NotFound { key: String, locale: String },
}

/// English messages (default locale).
const EN_MESSAGES: &[(&str, &str)] = &[
    ("success", "success"),
    ("error", "error"),
    ("business.exception", "business exception"),
    ("username_not_empty", "username must not be empty"),
    ("password_not_empty", "password must not be empty"),
];

/// Spanish messages.
const ES_MESSAGES: &[(&str, &str)] = &[
    ("success", "éxito"),
    ("error", "error interno"),
    ("business.exception", "excepción de negocio"),
    ("username_not_empty", "el nombre de usuario no puede estar vacío"),
    ("password_not_empty", "la contraseña no puede estar vacía"),
];

/// Chinese messages.
const ZH_MESSAGES: &[(&str, &str)] = &[
    ("success", "成功"),
    ("error", "系统错误"),
    ("business.exception", "业务异常"),
    ("username_not_empty", "用户名不能为空"),
    ("password_not_empty", "密码不能为空"),
];

/// Read-only mapping from `(message key, locale)` to a message template.
///
/// Built once at process start; concurrent reads need no synchronization.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    bundles: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    default_locale: Locale,
}

impl MessageCatalog {
    /// Build the catalog from the built-in bundles.
    pub fn builtin(default_locale: Locale) -> Self {
        let mut bundles = HashMap::new();
        bundles.insert("en", EN_MESSAGES.iter().copied().collect());
        bundles.insert("es", ES_MESSAGES.iter().copied().collect());
        bundles.insert("zh", ZH_MESSAGES.iter().copied().collect());
        Self {
            bundles,
            default_locale,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Template for `key` in `locale`: full tag first, then the primary
    /// subtag ("es-mx" finds the "es" bundle).
    fn template(&self, key: &str, locale: &Locale) -> Option<&'static str> {
        self.bundles
            .get(locale.tag())
            .and_then(|bundle| bundle.get(key))
            .or_else(|| {
                self.bundles
                    .get(locale.primary())
                    .and_then(|bundle| bundle.get(key))
            })
            .copied()
    }

    /// Resolve `key` for `locale`, substituting positional `{0}`, `{1}`, ...
    /// arguments into the template. Falls back to the default locale when
    /// the requested one has no entry; errors only when the key is unknown
    /// everywhere.
    pub fn resolve(&self, key: &str, locale: &Locale, args: &[&str]) -> Result<String, MessageError> {
        let template = self
            .template(key, locale)
            .or_else(|| self.template(key, &self.default_locale))
            .ok_or_else(|| MessageError::NotFound {
                key: key.to_string(),
                locale: locale.tag().to_string(),
            })?;
        Ok(substitute(template, args))
    }

    /// Localized message for a result code, never empty: catalog lookup
    /// first, the code's default message when the key is absent.
    pub fn resolve_code(&self, code: ResultCode, locale: &Locale) -> String {
        self.resolve(code.message_key(), locale, &[])
            .unwrap_or_else(|_| code.default_message().to_string())
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::builtin(Locale::new("en"))
    }

    #[test]
    fn test_resolve_default_locale() {
        let message = catalog()
            .resolve("business.exception", &Locale::new("en"), &[])
            .expect("resolve");
        assert_eq!(message, "business exception");
    }

    #[test]
    fn test_resolve_spanish() {
        let message = catalog()
            .resolve("business.exception", &Locale::new("es"), &[])
            .expect("resolve");
        assert_eq!(message, "excepción de negocio");
    }

    #[test]
    fn test_resolve_chinese() {
        let message = catalog()
            .resolve("business.exception", &Locale::new("zh"), &[])
            .expect("resolve");
        assert_eq!(message, "业务异常");
    }

    #[test]
    fn test_resolve_region_tag_falls_back_to_primary_subtag() {
        let message = catalog()
            .resolve("error", &Locale::new("es-MX"), &[])
            .expect("resolve");
        assert_eq!(message, "error interno");
    }

    #[test]
    fn test_unsupported_locale_falls_back_to_default() {
        let message = catalog()
            .resolve("error", &Locale::new("fr"), &[])
            .expect("resolve");
        assert_eq!(message, "error");
    }

    #[test]
    fn test_unknown_key_errors() {
        let result = catalog().resolve("no.such.key", &Locale::new("en"), &[]);
        assert!(matches!(result, Err(MessageError::NotFound { .. })));
    }

    #[test]
    fn test_positional_argument_substitution() {
        assert_eq!(substitute("hello {0}, from {1}", &["a", "b"]), "hello a, from b");
        assert_eq!(substitute("{0} and {0}", &["x"]), "x and x");
        assert_eq!(substitute("no placeholders", &["x"]), "no placeholders");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let catalog = catalog();
        let locale = Locale::new("es");
        let first = catalog.resolve("success", &locale, &[]).expect("resolve");
        let second = catalog.resolve("success", &locale, &[]).expect("resolve");
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_result_code_resolves_non_empty_in_every_locale() {
        let catalog = catalog();
        for code in ResultCode::ALL {
            for tag in ["en", "es", "zh", "fr", "es-MX", "klingon"] {
                let message = catalog.resolve_code(code, &Locale::new(tag));
                assert!(!message.is_empty(), "{code:?} in {tag} must not be empty");
            }
        }
    }

    #[test]
    fn test_resolve_code_degrades_to_default_message() {
        // A catalog whose default locale has no bundle at all still yields
        // the code's built-in default message.
        let catalog = MessageCatalog {
            bundles: HashMap::new(),
            default_locale: Locale::new("en"),
        };
        let message = catalog.resolve_code(ResultCode::BusinessException, &Locale::new("en"));
        assert_eq!(message, "business exception");
    }
}
