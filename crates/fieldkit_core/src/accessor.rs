//! Accessor naming conventions.
//!
//! Callers that address fields through method-style names (`getTitle`,
//! `setVoteCount`) go through these helpers. The mapping is explicit: a
//! name is parsed into an [`Accessor`] and resolved against the entity's
//! data, never synthesized at runtime.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// A parsed accessor name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Read of the named field.
    Get(String),
    /// Write of the named field.
    Set(String),
}

impl Accessor {
    /// The field name this accessor addresses.
    pub fn field(&self) -> &str {
        match self {
            Accessor::Get(field) | Accessor::Set(field) => field,
        }
    }
}

/// Converts a camelCase or PascalCase name to snake_case.
///
/// ```
/// use fieldkit_core::accessor::underscore;
///
/// assert_eq!(underscore("MyProperty"), "my_property");
/// assert_eq!(underscore("voteCount"), "vote_count");
/// ```
pub fn underscore(name: &str) -> String {
    name.to_snake_case()
}

/// Parses a `getX` / `setX` method name.
///
/// The prefix is matched case-insensitively. Names containing an
/// underscore are module calls, not accessors.
pub fn parse(method: &str) -> Option<Accessor> {
    if method.contains('_') || method.len() <= 3 || !method.is_char_boundary(3) {
        return None;
    }
    let (prefix, rest) = method.split_at(3);
    let field = underscore(rest);
    if field.is_empty() {
        return None;
    }
    if prefix.eq_ignore_ascii_case("get") {
        Some(Accessor::Get(field))
    } else if prefix.eq_ignore_ascii_case("set") {
        Some(Accessor::Set(field))
    } else {
        None
    }
}

/// Builds the getter name for a field: `vote_count` → `getVoteCount`.
pub fn getter_name(field: &str) -> String {
    format!("get{}", field.to_upper_camel_case())
}

/// Builds the setter name for a field: `vote_count` → `setVoteCount`.
pub fn setter_name(field: &str) -> String {
    format!("set{}", field.to_upper_camel_case())
}

/// Mapping key for a serializable getter.
///
/// Only plain getters qualify: `get` followed by a letter and then letters
/// or digits. The key splits only where a lowercase letter meets an
/// uppercase one, then lowercases: `getVoteCount` → `vote_count`,
/// `getHTMLTitle` → `htmltitle`. `get_raw` and `fetchAll` do not qualify.
pub fn mapping_key(method: &str) -> Option<String> {
    if method.len() <= 3 || !method.is_char_boundary(3) {
        return None;
    }
    let (prefix, rest) = method.split_at(3);
    if !prefix.eq_ignore_ascii_case("get") {
        return None;
    }
    let mut chars = rest.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(split_lower_upper(rest))
}

fn split_lower_upper(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    out
}

/// Derives a module prefix from a class-like entity name.
///
/// The prefix is the run of characters after the first `Entity` that is
/// followed by at least one non-underscore character, underscored:
/// `ModuleTopic_EntityTopic` → `topic`.
pub fn module_prefix(class_name: &str) -> Option<String> {
    class_name.match_indices("Entity").find_map(|(at, marker)| {
        let tail = &class_name[at + marker.len()..];
        let run: &str = tail.split('_').next().unwrap_or_default();
        (!run.is_empty()).then(|| underscore(run))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_getters_and_setters() {
        assert_eq!(parse("getTitle"), Some(Accessor::Get("title".into())));
        assert_eq!(
            parse("setVoteCount"),
            Some(Accessor::Set("vote_count".into()))
        );
        assert_eq!(parse("GetTitle"), Some(Accessor::Get("title".into())));
        assert_eq!(parse("getTitle2"), Some(Accessor::Get("title2".into())));
    }

    #[test]
    fn parse_rejects_non_accessors() {
        assert_eq!(parse("get"), None);
        assert_eq!(parse("fetchTitle"), None);
        assert_eq!(parse("Topic_GetById"), None);
        assert_eq!(parse("get_title"), None);
    }

    #[test]
    fn getter_and_setter_names() {
        assert_eq!(getter_name("vote_count"), "getVoteCount");
        assert_eq!(setter_name("title"), "setTitle");
        assert_eq!(parse(&getter_name("blog_id")), Some(Accessor::Get("blog_id".into())));
    }

    #[test]
    fn mapping_keys() {
        assert_eq!(mapping_key("getVoteCount"), Some("vote_count".into()));
        assert_eq!(mapping_key("getUrl"), Some("url".into()));
        assert_eq!(mapping_key("getHTMLTitle"), Some("htmltitle".into()));
        assert_eq!(mapping_key("getTitle2Name"), Some("title2name".into()));
        assert_eq!(mapping_key("getTopicURLSlug"), Some("topic_urlslug".into()));
        assert_eq!(mapping_key("get_raw"), None);
        assert_eq!(mapping_key("get2fa"), None);
        assert_eq!(mapping_key("setTitle"), None);
        assert_eq!(mapping_key("get"), None);
    }

    #[test]
    fn module_prefix_from_class_name() {
        assert_eq!(
            module_prefix("ModuleTopic_EntityTopic"),
            Some("topic".into())
        );
        assert_eq!(
            module_prefix("ModuleBlog_EntityBlogUser"),
            Some("blog_user".into())
        );
        assert_eq!(
            module_prefix("PluginX_ModuleUser_EntityUser_Ext"),
            Some("user".into())
        );
        assert_eq!(module_prefix("Entity_"), None);
        assert_eq!(module_prefix("Topic"), None);
    }
}
