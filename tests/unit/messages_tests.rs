/*!
 * Tests for interface string catalogs
 */

use std::collections::HashSet;

use fusionn::messages::{BuiltinCatalog, Locale, MessageCatalog, MessageKey};
use fusionn::workflow::OperationKind;

fn every_key() -> Vec<MessageKey> {
    let mut keys = vec![MessageKey::Title];
    for kind in OperationKind::ALL {
        keys.push(kind.tab_label());
        let (idle, busy) = kind.button_labels();
        keys.push(idle);
        keys.push(busy);
        for slot in kind.slots() {
            let (label, placeholder) = slot.labels();
            keys.push(label);
            keys.push(placeholder);
        }
    }
    keys
}

#[test]
fn test_catalogs_withEveryKey_shouldReturnTranslatedText() {
    for locale in [Locale::En, Locale::Zh] {
        let catalog = BuiltinCatalog::new(locale);
        assert_eq!(catalog.locale(), locale);
        for key in every_key() {
            let text = catalog.text(key);
            assert!(!text.is_empty());
            assert_ne!(text, key.id(), "{:?} untranslated in {}", key, locale);
        }
    }
}

#[test]
fn test_messageKey_ids_shouldBeUnique() {
    let keys = every_key();
    let unique: HashSet<&str> = keys.iter().map(|k| k.id()).collect();
    let distinct_keys: HashSet<MessageKey> = keys.iter().copied().collect();
    assert_eq!(unique.len(), distinct_keys.len());
}

#[test]
fn test_locale_parse() {
    assert_eq!("ZH".parse::<Locale>().unwrap(), Locale::Zh);
    assert_eq!("en".parse::<Locale>().unwrap().code(), "en");
    assert!("fr".parse::<Locale>().is_err());
}
