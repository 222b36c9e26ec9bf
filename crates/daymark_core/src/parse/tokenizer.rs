//! Note body tokenization for rendering.
//!
//! # Responsibility
//! - Split a body into an ordered sequence of text, tag-reference and
//!   image-reference segments.
//! - Keep the transform lossless: concatenated raw text reconstructs the
//!   input byte for byte.
//!
//! # Invariants
//! - Adjacent plain characters coalesce into one `Text` segment.
//! - The scan is a single left-to-right pass; the earliest match of either
//!   grammar wins, so tag and image spans never overlap.
//! - No tag index is consulted or mutated; the tokenizer holds no state.

use crate::parse::tags::{tag_path, TAG_RE};
use once_cell::sync::Lazy;
use regex::{Match, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Inline image grammar: alt text is any run without `]`, url any non-empty
/// run without `)`.
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image regex"));

/// One typed unit of a tokenized note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ContentSegment {
    /// A run of plain characters, whitespace and line breaks included.
    Text { value: String },
    /// A hierarchical tag token: raw matched text plus its ordered path.
    TagRef { raw: String, path: Vec<String> },
    /// An inline image reference. The url is not validated or fetched here;
    /// resolution belongs to the rendering layer.
    ImageRef { url: String, alt_text: String },
}

impl ContentSegment {
    /// The exact source text this segment was matched from.
    pub fn raw_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text { value } => Cow::Borrowed(value),
            Self::TagRef { raw, .. } => Cow::Borrowed(raw),
            Self::ImageRef { url, alt_text } => Cow::Owned(format!("![{alt_text}]({url})")),
        }
    }

    /// Delivers the click action of a tag segment: `on_tag` runs once per
    /// path component, left to right, so activating `#a/b` selects `a` then
    /// `b`. Non-tag segments deliver nothing.
    pub fn click_tags(&self, mut on_tag: impl FnMut(&str)) {
        if let Self::TagRef { path, .. } = self {
            for component in path {
                on_tag(component);
            }
        }
    }
}

/// Tokenizes a note body into render-ready segments.
pub fn tokenize(body: &str) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < body.len() {
        let Some(found) = next_token(body, cursor) else {
            break;
        };
        if found.start() > cursor {
            segments.push(ContentSegment::Text {
                value: body[cursor..found.start()].to_string(),
            });
        }
        cursor = found.end();
        segments.push(found.into_segment());
    }

    if cursor < body.len() {
        segments.push(ContentSegment::Text {
            value: body[cursor..].to_string(),
        });
    }

    segments
}

enum Token<'t> {
    Tag(Match<'t>),
    Image(Match<'t>),
}

impl Token<'_> {
    fn start(&self) -> usize {
        match self {
            Self::Tag(m) | Self::Image(m) => m.start(),
        }
    }

    fn end(&self) -> usize {
        match self {
            Self::Tag(m) | Self::Image(m) => m.end(),
        }
    }

    fn into_segment(self) -> ContentSegment {
        match self {
            Self::Tag(m) => ContentSegment::TagRef {
                raw: m.as_str().to_string(),
                path: tag_path(m.as_str()),
            },
            Self::Image(m) => image_segment(m.as_str()),
        }
    }
}

/// Finds the earliest token of either grammar at or after `cursor`.
///
/// A tag starts with `#` and an image with `!`, so the two matches can never
/// begin at the same byte.
fn next_token(body: &str, cursor: usize) -> Option<Token<'_>> {
    let tag = TAG_RE.find_at(body, cursor);
    let image = IMAGE_RE.find_at(body, cursor);
    match (tag, image) {
        (None, None) => None,
        (Some(t), None) => Some(Token::Tag(t)),
        (None, Some(i)) => Some(Token::Image(i)),
        (Some(t), Some(i)) => Some(if i.start() < t.start() {
            Token::Image(i)
        } else {
            Token::Tag(t)
        }),
    }
}

fn image_segment(raw: &str) -> ContentSegment {
    // `raw` has the exact `![alt](url)` shape guaranteed by IMAGE_RE: the
    // first `](` closes the alt text because alt contains no `]`.
    let inner = &raw[2..raw.len() - 1];
    let (alt_text, url) = inner.split_once("](").unwrap_or((inner, ""));
    ContentSegment::ImageRef {
        url: url.to_string(),
        alt_text: alt_text.to_string(),
    }
}
