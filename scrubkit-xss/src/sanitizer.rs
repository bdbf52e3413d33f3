use crate::policy::{AttributeMode, HtmlPolicy};
use crate::protocol::{ProtocolAllowList, extract_scheme};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

// Control characters other than \t, \n and \r
static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap());

// Backslash-escaped nulls: \0, \\0, \00 ...
static SLASH_ZERO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\+0+").unwrap());

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?[a-zA-Z][^>]*)>").unwrap());

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

static BASIC_POLICY: Lazy<HtmlPolicy> = Lazy::new(HtmlPolicy::basic);

static HTML_PROTOCOLS: Lazy<ProtocolAllowList> = Lazy::new(ProtocolAllowList::html_default);

/// Filter passes before leftover markup is escaped instead of removed
const MAX_PASSES: usize = 4;

/// Attributes whose value is followed as a link
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "cite", "poster"];

/// Tag-filtering HTML sanitizer.
///
/// This is a filter, not a parser: there is no DOM and no nesting check.
/// Disallowed tag markup is deleted while the text between tags is kept,
/// so the output may contain unbalanced tags.
#[derive(Debug, Clone)]
pub struct HtmlSanitizer {
    policy: HtmlPolicy,
    protocols: ProtocolAllowList,
    attribute_mode: AttributeMode,
}

impl HtmlSanitizer {
    /// Create a sanitizer with the basic policy and the broad protocol list
    pub fn new() -> Self {
        Self {
            policy: HtmlPolicy::basic(),
            protocols: ProtocolAllowList::html_default(),
            attribute_mode: AttributeMode::default(),
        }
    }

    /// Set the tag policy
    pub fn with_policy(mut self, policy: HtmlPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the protocols accepted in link attributes
    pub fn with_protocols(mut self, protocols: ProtocolAllowList) -> Self {
        self.protocols = protocols;
        self
    }

    /// Set whether attribute lists are enforced
    pub fn with_attribute_mode(mut self, mode: AttributeMode) -> Self {
        self.attribute_mode = mode;
        self
    }

    pub fn policy(&self) -> &HtmlPolicy {
        &self.policy
    }

    pub fn protocols(&self) -> &ProtocolAllowList {
        &self.protocols
    }

    pub fn attribute_mode(&self) -> AttributeMode {
        self.attribute_mode
    }

    /// Sanitize an HTML fragment. Never fails; bad input is degraded.
    pub fn sanitize(&self, content: &str) -> String {
        sanitize_with(content, &self.policy, &self.protocols, self.attribute_mode)
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize `content` keeping only the tags present in `policy`.
///
/// Attributes of allowed tags are passed through unchanged; use
/// [`HtmlSanitizer`] with [`AttributeMode::Enforce`] to filter them.
pub fn sanitize_html(content: &str, policy: &HtmlPolicy) -> String {
    sanitize_with(content, policy, &HTML_PROTOCOLS, AttributeMode::Passthrough)
}

/// Sanitize `content` with [`HtmlPolicy::basic`]
pub fn html_sanitize_basic(content: &str) -> String {
    sanitize_html(content, &BASIC_POLICY)
}

fn sanitize_with(
    content: &str,
    policy: &HtmlPolicy,
    protocols: &ProtocolAllowList,
    mode: AttributeMode,
) -> String {
    // Deleting markup can join fragments into a new tag ("<<i>script>")
    // or a new "\0" sequence, so repeat until nothing changes
    let mut current = content.to_string();
    for _ in 0..MAX_PASSES {
        // Nulls go first, otherwise "<scr\0ipt>" slips past the tag filter
        let stripped = remove_control_chars(&current);
        let next = filter_tags(&normalize_entities(&stripped), policy, protocols, mode);
        if next == current {
            return next;
        }
        current = next;
    }

    debug!(passes = MAX_PASSES, "tag filtering did not settle, escaping remaining markup");
    escape_markup(&current)
}

/// Turn every `<` into `&lt;` so nothing left can be read as a tag
fn escape_markup(content: &str) -> String {
    normalize_entities(&remove_control_chars(content)).replace('<', "&lt;")
}

/// Strip control characters (keeping `\t`, `\n`, `\r`) and backslash-zero sequences
pub fn remove_control_chars(content: &str) -> String {
    let content = CONTROL_CHARS.replace_all(content, "");
    SLASH_ZERO.replace_all(&content, "").into_owned()
}

enum EntityState {
    Text,
    /// Byte offset of the `&` that opened the candidate entity
    Entity(usize),
}

/// Rewrite every `&` that does not start a well-formed entity to `&amp;`.
///
/// A well-formed entity is `&` followed by one or more ASCII alphanumerics
/// or `#`, terminated by `;`. Existing entities are left alone so they are
/// not escaped twice.
pub fn normalize_entities(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut state = EntityState::Text;

    for (i, c) in content.char_indices() {
        if let EntityState::Entity(start) = state {
            if c.is_ascii_alphanumeric() || c == '#' {
                continue;
            }
            if c == ';' && i > start + 1 {
                out.push_str(&content[start..=i]);
                state = EntityState::Text;
                continue;
            }
            out.push_str("&amp;");
            out.push_str(&content[start + 1..i]);
            state = EntityState::Text;
        }

        if c == '&' {
            state = EntityState::Entity(i);
        } else {
            out.push(c);
        }
    }

    if let EntityState::Entity(start) = state {
        out.push_str("&amp;");
        out.push_str(&content[start + 1..]);
    }

    out
}

/// First whitespace-delimited token once `<`, `>` and `/` are trimmed
fn tag_name(tag: &str) -> &str {
    tag.trim_matches(|c: char| matches!(c, '<' | '>' | '/'))
        .split_whitespace()
        .next()
        .unwrap_or("")
}

fn filter_tags(
    content: &str,
    policy: &HtmlPolicy,
    protocols: &ProtocolAllowList,
    mode: AttributeMode,
) -> String {
    TAG.replace_all(content, |caps: &Captures| {
        let tag = &caps[0];
        let name = tag_name(tag);

        if !policy.is_tag_allowed(name) {
            trace!(tag = name, "stripped disallowed tag");
            return String::new();
        }

        match mode {
            AttributeMode::Passthrough => tag.to_string(),
            AttributeMode::Enforce => rebuild_tag(&caps[1], name, policy, protocols),
        }
    })
    .into_owned()
}

fn rebuild_tag(
    inner: &str,
    name: &str,
    policy: &HtmlPolicy,
    protocols: &ProtocolAllowList,
) -> String {
    let name = name.to_ascii_lowercase();

    if inner.starts_with('/') {
        return format!("</{}>", name);
    }

    // The regex guarantees `inner` starts with the tag name
    let attributes = inner.get(name.len()..).unwrap_or("");
    let self_closing = attributes.trim_end().ends_with('/');

    let mut out = format!("<{}", name);
    for attr in ATTRIBUTE.captures_iter(attributes) {
        let attr_name = attr[1].to_ascii_lowercase();
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map(|m| m.as_str());

        if !policy.is_attribute_allowed(&name, &attr_name) {
            debug!(tag = %name, attribute = %attr_name, "dropped attribute outside policy");
            continue;
        }

        if URL_ATTRIBUTES.contains(&attr_name.as_str()) {
            let scheme = value.and_then(extract_scheme);
            if let Some(scheme) = scheme.filter(|s| !protocols.is_allowed(s)) {
                debug!(tag = %name, attribute = %attr_name, scheme = %scheme, "dropped link with disallowed protocol");
                continue;
            }
        }

        out.push(' ');
        out.push_str(&attr_name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;").replace('<', "&lt;"));
            out.push('"');
        }
    }

    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}
