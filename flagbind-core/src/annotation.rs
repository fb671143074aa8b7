//! Parser for field annotations.
//!
//! An annotation has the form `name[,opt1[,opt2...]]` where every option is
//! either a bare word (`flag`) or a `key=value` pair. Options are separated by
//! commas with no escaping, so a value can never contain a comma.

/// Value of an option found in an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOption<'t> {
    /// Bare word without `=`
    Flag,
    /// `key=value`, the value may be empty
    Value(&'t str),
}

/// A parsed annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<'t> {
    /// Canonical option name
    pub name: &'t str,

    /// Options in the order they were written
    pub options: Vec<(&'t str, TagOption<'t>)>,
}

impl<'t> Annotation<'t> {
    /// Parse an annotation string.
    pub fn parse(tag: &'t str) -> Self {
        let (name, rest) = tag.split_once(',').unwrap_or((tag, ""));

        let options = rest
            .split(',')
            .filter(|option| !option.is_empty())
            .map(|option| match option.split_once('=') {
                Some((key, value)) => (key, TagOption::Value(value)),
                None => (option, TagOption::Flag),
            })
            .collect();

        Self { name, options }
    }

    /// Look up an option by key. The leftmost occurrence wins.
    pub fn option(&self, key: &str) -> Option<TagOption<'t>> {
        self.options
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    /// Keys that are not in `known`.
    pub fn unknown_keys(&self, known: &[&str]) -> Vec<&'t str> {
        self.options
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| known.iter().all(|k| k != key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only() {
        let tag = Annotation::parse("verbose");
        assert_eq!(tag.name, "verbose");
        assert!(tag.options.is_empty());
        assert_eq!(tag.option("short"), None);
    }

    #[test]
    fn key_value_options() {
        let tag = Annotation::parse("debug,short=d,default=true");
        assert_eq!(tag.name, "debug");
        assert_eq!(tag.option("short"), Some(TagOption::Value("d")));
        assert_eq!(tag.option("default"), Some(TagOption::Value("true")));
    }

    #[test]
    fn bare_flags_and_empty_values() {
        let tag = Annotation::parse("name,short,default=");
        assert_eq!(tag.option("short"), Some(TagOption::Flag));
        assert_eq!(tag.option("default"), Some(TagOption::Value("")));
    }

    #[test]
    fn value_splits_on_first_equals_only() {
        let tag = Annotation::parse("expr,default=a=b");
        assert_eq!(tag.option("default"), Some(TagOption::Value("a=b")));
    }

    #[test]
    fn value_keeps_spaces() {
        let tag = Annotation::parse("description,default=This is a test");
        assert_eq!(tag.option("default"), Some(TagOption::Value("This is a test")));
    }

    #[test]
    fn leftmost_option_wins() {
        let tag = Annotation::parse("level,short=l,short=v");
        assert_eq!(tag.option("short"), Some(TagOption::Value("l")));
    }

    #[test]
    fn unknown_keys_are_reported() {
        let tag = Annotation::parse("rate,required,short=r,hidden=yes");
        let unknown = tag.unknown_keys(&["short", "default"]);
        assert_eq!(unknown, vec!["required", "hidden"]);
    }
}
