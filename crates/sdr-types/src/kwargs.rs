//! Keyword arguments and their markup form.
//!
//! Markup is a comma separated list of `key=value` pairs, for example
//! `"driver=rtlsdr, serial=00000001"`. Whitespace around keys and values is
//! ignored. A token without `=` is a key with an empty value.

use std::collections::BTreeMap;

/// Map of text keys to text values. Iteration is in key order.
pub type Kwargs = BTreeMap<String, String>;

/// One `Kwargs` per enumerated device or candidate.
pub type KwargsList = Vec<Kwargs>;

/// Parse a markup string into keyword arguments.
///
/// Empty tokens are skipped and later duplicates replace earlier ones.
pub fn from_markup(markup: &str) -> Kwargs {
    let mut out = Kwargs::new();
    for token in markup.split(',') {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (token.trim(), ""),
        };
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_owned(), value.to_owned());
    }
    out
}

/// Format keyword arguments as markup. Inverse of [`from_markup`] for
/// keys and values that contain neither `,` nor `=` and carry no
/// surrounding whitespace.
pub fn to_markup(args: &Kwargs) -> String {
    args.iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use proptest::collection::btree_map;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn parses_pairs_and_trims() {
        let args = from_markup(" driver = rtlsdr ,serial=00000001");
        assert_eq!(args.len(), 2);
        assert_eq!(args["driver"], "rtlsdr");
        assert_eq!(args["serial"], "00000001");
    }

    #[test]
    fn bare_key_has_empty_value() {
        let args = from_markup("remote, driver=airspy");
        assert_eq!(args["remote"], "");
        assert_eq!(args["driver"], "airspy");
    }

    #[test]
    fn empty_tokens_are_skipped() {
        assert!(from_markup("").is_empty());
        assert!(from_markup(" , ,").is_empty());
        assert!(from_markup("=orphan").is_empty());
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let args = from_markup("uri=tcp://host:1234/?a=b");
        assert_eq!(args["uri"], "tcp://host:1234/?a=b");
    }

    #[test]
    fn later_duplicate_wins() {
        let args = from_markup("rate=1000000, rate=2000000");
        assert_eq!(args.len(), 1);
        assert_eq!(args["rate"], "2000000");
    }

    #[test]
    fn formats_in_key_order() {
        let mut args = Kwargs::new();
        args.insert("rate".into(), "2000000".into());
        args.insert("format".into(), "CF32".into());
        assert_eq!(to_markup(&args), "format=CF32, rate=2000000");
        assert_eq!(to_markup(&Kwargs::new()), "");
    }

    #[proptest]
    fn markup_roundtrips(
        #[strategy(btree_map("[a-z][a-z0-9_]{0,8}", "[A-Za-z0-9_.:]{0,12}", 0..8))] args: Kwargs,
    ) {
        prop_assert_eq!(from_markup(&to_markup(&args)), args);
    }
}
