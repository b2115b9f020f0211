// =============================================================================
// Symbol Normalisation — exchange heuristics for raw user tickers
// =============================================================================
//
// Rules, in strict priority order:
//   1. Already exchange-qualified (`.NS` / `.BO` anywhere)  => unchanged
//   2. Upper-cased symbol is on the allow-list              => unchanged
//   3. Short (<= 10 chars) and contains no `.`              => append `.NS`
//   4. Anything else                                        => unchanged
//
// This is a heuristic classifier, not a registry lookup: it is pure and never
// touches the network. Because rule 3 produces a `.NS` symbol, which rule 1
// then leaves alone, normalisation is idempotent.
// =============================================================================

use std::fmt;

/// Suffixes that mark a symbol as listed on an Indian exchange.
const INDIAN_SUFFIXES: [&str; 2] = [".NS", ".BO"];

/// Default suffix for unqualified short symbols (National Stock Exchange).
const DEFAULT_SUFFIX: &str = ".NS";

/// Longest unqualified symbol that still receives the default suffix.
const MAX_UNQUALIFIED_LEN: usize = 10;

/// Exchange a symbol is assumed to trade on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Us,
    India,
    Unknown,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Us => write!(f, "US"),
            Self::India => write!(f, "INDIA"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

fn is_exchange_qualified(raw: &str) -> bool {
    INDIAN_SUFFIXES.iter().any(|suffix| raw.contains(suffix))
}

fn is_allow_listed(raw: &str, allow_list: &[String]) -> bool {
    let upper = raw.to_uppercase();
    allow_list.iter().any(|s| *s == upper)
}

/// Map a raw ticker to a provider-queryable symbol. Never fails; in the worst
/// case the input comes back unchanged.
pub fn normalize(raw: &str, allow_list: &[String]) -> String {
    if is_exchange_qualified(raw) || is_allow_listed(raw, allow_list) {
        return raw.to_string();
    }

    if raw.chars().count() <= MAX_UNQUALIFIED_LEN && !raw.contains('.') {
        return format!("{raw}{DEFAULT_SUFFIX}");
    }

    raw.to_string()
}

/// Classify a raw ticker by the same heuristics [`normalize`] applies.
pub fn classify(raw: &str, allow_list: &[String]) -> Exchange {
    if is_allow_listed(raw, allow_list) && !is_exchange_qualified(raw) {
        return Exchange::Us;
    }
    if is_exchange_qualified(&normalize(raw, allow_list)) {
        Exchange::India
    } else {
        Exchange::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MarketCatalog;
    use proptest::prelude::*;

    fn allow_list() -> Vec<String> {
        MarketCatalog::default().allow_list
    }

    #[test]
    fn allow_listed_symbols_are_unchanged() {
        let list = allow_list();
        assert_eq!(normalize("AAPL", &list), "AAPL");
        assert_eq!(normalize("aapl", &list), "aapl");
        assert_eq!(normalize("BTC-USD", &list), "BTC-USD");
    }

    #[test]
    fn short_unqualified_symbols_get_nse_suffix() {
        assert_eq!(normalize("TCS", &allow_list()), "TCS.NS");
        assert_eq!(normalize("HDFCBANK", &allow_list()), "HDFCBANK.NS");
    }

    #[test]
    fn qualified_symbols_are_unchanged() {
        assert_eq!(normalize("RELIANCE.NS", &allow_list()), "RELIANCE.NS");
        assert_eq!(normalize("SBIN.BO", &allow_list()), "SBIN.BO");
    }

    #[test]
    fn long_or_dotted_symbols_are_unchanged() {
        assert_eq!(normalize("VERYLONGSYMBOL", &allow_list()), "VERYLONGSYMBOL");
        assert_eq!(normalize("BRK.B", &allow_list()), "BRK.B");
    }

    #[test]
    fn ten_characters_is_still_short() {
        assert_eq!(normalize("ABCDEFGHIJ", &allow_list()), "ABCDEFGHIJ.NS");
        assert_eq!(normalize("ABCDEFGHIJK", &allow_list()), "ABCDEFGHIJK");
    }

    #[test]
    fn classify_by_heuristics() {
        let list = allow_list();
        assert_eq!(classify("MSFT", &list), Exchange::Us);
        assert_eq!(classify("TCS", &list), Exchange::India);
        assert_eq!(classify("INFY.BO", &list), Exchange::India);
        assert_eq!(classify("BRK.B", &list), Exchange::Unknown);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[A-Za-z0-9.\\-]{0,16}") {
            let list = allow_list();
            let once = normalize(&raw, &list);
            prop_assert_eq!(normalize(&once, &list), once.clone());
        }
    }
}
