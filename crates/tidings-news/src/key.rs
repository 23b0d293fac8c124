//! Cache key construction and reversal.

use super::*;

/// Key for the no-preference (top headlines) query.
pub const TOP_HEADLINES_KEY: &str = "__top_headlines__";

/// Namespace prefix for keyword search keys. Keeps search entries from ever
/// colliding with preference entries.
pub const SEARCH_KEY_PREFIX: &str = "__search__";

const TOPIC_DELIMITER: &str = "|";

/// Build the cache key for a list of preferred topics.
///
/// Topics are lowercased and sorted before joining, so the key is
/// case- and order-insensitive. An empty list maps to the top-headlines key.
pub fn preference_key(preferences: &[String]) -> String {
    if preferences.is_empty() {
        return TOP_HEADLINES_KEY.to_string();
    }
    let mut topics: Vec<String> =
        preferences.iter().map(|topic| topic.to_lowercase()).collect();
    topics.sort();
    topics.join(TOPIC_DELIMITER)
}

/// Build the cache key for a search keyword.
pub fn search_key(keyword: &str) -> String {
    format!("{}{}", SEARCH_KEY_PREFIX, keyword.to_lowercase())
}

/// The family a cache key belongs to, recovered from the key itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// The top-headlines key.
    TopHeadlines,
    /// A preference key, with the topics it was built from.
    Preferences(Vec<String>),
    /// A search key, with the keyword it was built from.
    Search(String),
}

impl KeyKind {
    /// Reverse the key-construction rule.
    pub fn parse(key: &str) -> Self {
        if key == TOP_HEADLINES_KEY {
            return KeyKind::TopHeadlines;
        }
        if let Some(keyword) = key.strip_prefix(SEARCH_KEY_PREFIX) {
            return KeyKind::Search(keyword.to_string());
        }
        KeyKind::Preferences(
            key.split(TOPIC_DELIMITER).map(str::to_string).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_keys_are_order_and_case_insensitive() {
        let a = preference_key(&["Tech".into(), "World".into()]);
        let b = preference_key(&["world".into(), "tech".into()]);
        assert_eq!(a, b);
        assert_eq!(a, "tech|world");
    }

    #[test]
    fn empty_preferences_map_to_top_headlines() {
        assert_eq!(preference_key(&[]), TOP_HEADLINES_KEY);
    }

    #[test]
    fn search_keys_are_namespaced_and_lowercased() {
        assert_eq!(search_key("Tech"), "__search__tech");
        assert_ne!(search_key("tech"), preference_key(&["tech".into()]));
    }

    #[test]
    fn keys_reverse_to_their_kind() {
        assert_eq!(KeyKind::parse(TOP_HEADLINES_KEY), KeyKind::TopHeadlines);
        assert_eq!(
            KeyKind::parse("tech|world"),
            KeyKind::Preferences(vec!["tech".into(), "world".into()])
        );
        assert_eq!(
            KeyKind::parse("__search__rust"),
            KeyKind::Search("rust".into())
        );
    }

    #[test]
    fn single_topic_keys_round_trip() {
        let key = preference_key(&["Science".into()]);
        assert_eq!(
            KeyKind::parse(&key),
            KeyKind::Preferences(vec!["science".into()])
        );
    }
}
