use std::fmt;
use std::ops::Range;

use decen_fetch::core::{asset_url, join_origin};
use decen_verify::Digest;
use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};
use serde::Serialize;

static LINK_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(href|src)=["']([^"']+)["']"#).expect("link attribute pattern is valid")
});

const NON_FETCHABLE_PREFIXES: [&str; 4] = ["data:", "javascript:", "mailto:", "#"];
const NAVIGATIONAL_SUFFIXES: [&str; 2] = [".html", ".htm"];

/// Which attribute a reference was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `href`: navigational unless it points at a non-page resource.
    Href,
    /// `src`: always asset-bearing.
    Src,
}

impl LinkKind {
    fn from_attribute(name: &str) -> Self {
        if name.eq_ignore_ascii_case("src") {
            Self::Src
        } else {
            Self::Href
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Href => "href",
            Self::Src => "src",
        })
    }
}

/// How a reference relates to the origin, in rule order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkClass {
    /// `data:`, `javascript:`, `mailto:` or a fragment.
    NonFetchable,
    /// An `href` to another page (`.html` / `.htm`).
    Navigational,
    /// `http://`, `https://` or protocol-relative `//`.
    Absolute,
    /// Starts with `/`; hangs off the origin root.
    RootRelative,
    /// Anything else; lives beside the digest's own document.
    PathRelative,
}

impl LinkClass {
    pub fn classify(kind: LinkKind, raw: &str) -> Self {
        if NON_FETCHABLE_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            return Self::NonFetchable;
        }

        let lower = raw.to_ascii_lowercase();
        if kind == LinkKind::Href && NAVIGATIONAL_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return Self::Navigational;
        }

        if is_absolute(raw) {
            Self::Absolute
        } else if raw.starts_with('/') {
            Self::RootRelative
        } else {
            Self::PathRelative
        }
    }
}

/// One `href=`/`src=` occurrence in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReference {
    pub kind: LinkKind,
    /// Attribute name as written, e.g. `SRC`.
    pub attribute: String,
    /// Attribute value as written.
    pub raw: String,
    pub class: LinkClass,
    /// Absolute form of `raw` against the origin it was extracted for.
    pub resolved: String,
    /// Byte range of the whole `attr="value"` match.
    pub span: Range<usize>,
}

impl LinkReference {
    /// Whether the asset pipeline should try to mirror this reference.
    pub fn is_asset(&self) -> bool {
        matches!(
            self.class,
            LinkClass::Absolute | LinkClass::RootRelative | LinkClass::PathRelative
        )
    }
}

/// Resolves reference values against one origin and digest.
#[derive(Clone, Copy, Debug)]
pub struct LinkResolver<'a> {
    origin: &'a str,
    digest: &'a Digest,
}

impl<'a> LinkResolver<'a> {
    /// `origin` may be empty, in which case relative references stay
    /// origin-less (`/x`, `/data/<digest>/x`) and will not fetch.
    pub fn new(origin: &'a str, digest: &'a Digest) -> Self { Self { origin, digest } }

    /// [`LinkClass::classify`], except that a fetch-free suffix under this
    /// digest's document directory stays non-fetchable. Rewriting turns `#top`
    /// into `<origin>/data/<digest>/#top`; a cached document must classify it
    /// the same way the fetched one did.
    pub fn classify(&self, kind: LinkKind, raw: &str) -> LinkClass {
        let class = LinkClass::classify(kind, raw);
        if class != LinkClass::Absolute || self.origin.is_empty() {
            return class;
        }
        match raw.strip_prefix(&asset_url(self.origin, self.digest, "")) {
            Some(rest) if LinkClass::classify(kind, rest) == LinkClass::NonFetchable => {
                LinkClass::NonFetchable
            }
            _ => class,
        }
    }

    pub fn resolve(&self, raw: &str) -> String {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else if let Some(rest) = raw.strip_prefix("//") {
            format!("{}://{rest}", self.scheme())
        } else if raw.starts_with('/') {
            join_origin(self.origin, raw)
        } else {
            asset_url(self.origin, self.digest, raw)
        }
    }

    /// Every reference in `html`, in document order. The document itself may
    /// be in any ASCII-compatible encoding; values that are not UTF-8 never
    /// match.
    pub fn extract<'h>(&self, html: &'h [u8]) -> impl Iterator<Item = LinkReference> + use<'h, 'a> {
        let resolver = *self;
        LINK_ATTR.captures_iter(html).map(move |caps| {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let attribute = String::from_utf8_lossy(&caps[1]).into_owned();
            let raw = String::from_utf8_lossy(&caps[2]).into_owned();
            let kind = LinkKind::from_attribute(&attribute);
            LinkReference {
                kind,
                class: resolver.classify(kind, &raw),
                resolved: resolver.resolve(&raw),
                attribute,
                raw,
                span: whole,
            }
        })
    }

    /// Point every reference that is neither absolute nor a `data:` URI at
    /// the origin, in place. Rewritten attributes are double-quoted; every
    /// other byte of `html` is copied through unchanged.
    pub fn rewrite(&self, html: &[u8]) -> Vec<u8> {
        LINK_ATTR
            .replace_all(html, |caps: &Captures<'_>| {
                let value = String::from_utf8_lossy(&caps[2]);
                if is_absolute(&value) || value.starts_with("data:") {
                    return caps[0].to_vec();
                }
                let mut out = caps[1].to_vec();
                out.extend_from_slice(b"=\"");
                out.extend_from_slice(self.resolve(&value).as_bytes());
                out.push(b'"');
                out
            })
            .into_owned()
    }

    fn scheme(&self) -> &str {
        self.origin
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .filter(|scheme| !scheme.is_empty())
            .unwrap_or("https")
    }
}

/// References in `html` resolved against `origin` and `digest`.
pub fn extract<'h>(
    html: &'h [u8],
    origin: &'h str,
    digest: &'h Digest,
) -> impl Iterator<Item = LinkReference> + 'h {
    LinkResolver::new(origin, digest).extract(html)
}

/// Shorthand for [`LinkResolver::rewrite`].
pub fn rewrite(html: &[u8], origin: &str, digest: &Digest) -> Vec<u8> {
    LinkResolver::new(origin, digest).rewrite(html)
}

fn is_absolute(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("//")
}
