//! Tests for language code parsing.

use translate::{Error, Lang};

#[test]
fn parses_supported_codes() {
    assert_eq!("en".parse::<Lang>().unwrap(), Lang::En);
    assert_eq!("es".parse::<Lang>().unwrap(), Lang::Es);
    assert_eq!("de".parse::<Lang>().unwrap(), Lang::De);
    assert_eq!("pt".parse::<Lang>().unwrap(), Lang::Pt);
    assert_eq!("it".parse::<Lang>().unwrap(), Lang::It);
}

#[test]
fn parses_region_variants_to_primary_subtag() {
    assert_eq!("es-ES".parse::<Lang>().unwrap(), Lang::Es);
    assert_eq!("pt_BR".parse::<Lang>().unwrap(), Lang::Pt);
    assert_eq!("DE".parse::<Lang>().unwrap(), Lang::De);
}

#[test]
fn rejects_unsupported_codes() {
    let err = "fr".parse::<Lang>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedLanguage(code) if code == "fr"));
    assert!("".parse::<Lang>().is_err());
    assert!("zz-ZZ".parse::<Lang>().is_err());
}

#[test]
fn source_language_is_english() {
    assert_eq!(Lang::SOURCE, Lang::En);
    assert_eq!(Lang::SOURCE.code(), "en");
}

#[test]
fn display_matches_code() {
    for lang in Lang::ALL {
        assert_eq!(lang.to_string(), lang.code());
    }
}
