use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Which tags survive HTML sanitization, and with which attributes.
///
/// Keys are lower-case tag names without angle brackets. A value of `None`
/// means the tag takes no attributes; `Some(list)` names the attributes it
/// may carry. Whether the attribute lists are enforced is decided by the
/// sanitizer's [`AttributeMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<Vec<String>>>",
    into = "BTreeMap<String, Option<Vec<String>>>"
)]
pub struct HtmlPolicy {
    tags: BTreeMap<String, Option<Vec<String>>>,
}

impl HtmlPolicy {
    /// An empty policy: every tag is stripped
    pub fn new() -> Self {
        Self::default()
    }

    /// `b` without attributes, `a` with `href`, `img` with `src` and `alt`
    pub fn basic() -> Self {
        Self::new()
            .allow_tag("b")
            .allow_tag_with_attributes("a", ["href"])
            .allow_tag_with_attributes("img", ["src", "alt"])
    }

    /// Allow a tag that takes no attributes
    pub fn allow_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into().to_ascii_lowercase(), None);
        self
    }

    /// Allow a tag together with its permitted attributes
    pub fn allow_tag_with_attributes<I, S>(mut self, tag: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = attributes
            .into_iter()
            .map(|a| a.into().to_ascii_lowercase())
            .collect();
        self.tags
            .insert(tag.into().to_ascii_lowercase(), Some(attributes));
        self
    }

    pub fn is_tag_allowed(&self, tag: &str) -> bool {
        self.tags.contains_key(&tag.to_ascii_lowercase())
    }

    /// Attribute list for `tag`; `None` if the tag is unknown or takes none
    pub fn allowed_attributes(&self, tag: &str) -> Option<&[String]> {
        self.tags
            .get(&tag.to_ascii_lowercase())
            .and_then(|attrs| attrs.as_deref())
    }

    pub fn is_attribute_allowed(&self, tag: &str, attribute: &str) -> bool {
        self.allowed_attributes(tag)
            .is_some_and(|attrs| attrs.iter().any(|a| a.eq_ignore_ascii_case(attribute)))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<Vec<String>>)> for HtmlPolicy {
    fn from_iter<T: IntoIterator<Item = (K, Option<Vec<String>>)>>(iter: T) -> Self {
        let tags = iter
            .into_iter()
            .map(|(tag, attrs)| {
                let attrs =
                    attrs.map(|list| list.into_iter().map(|a| a.to_ascii_lowercase()).collect());
                (tag.into().to_ascii_lowercase(), attrs)
            })
            .collect();
        Self { tags }
    }
}

impl From<HashMap<String, Option<Vec<String>>>> for HtmlPolicy {
    fn from(map: HashMap<String, Option<Vec<String>>>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Option<Vec<String>>>> for HtmlPolicy {
    fn from(map: BTreeMap<String, Option<Vec<String>>>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HtmlPolicy> for BTreeMap<String, Option<Vec<String>>> {
    fn from(policy: HtmlPolicy) -> Self {
        policy.tags
    }
}

/// How the attribute lists of an [`HtmlPolicy`] are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeMode {
    /// Allowed tags are kept verbatim, attributes included
    #[default]
    Passthrough,
    /// Attributes outside the tag's list are dropped, and link attributes
    /// must use an allow-listed protocol
    Enforce,
}
