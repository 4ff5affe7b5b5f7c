//! Bookmark tokens: `menu/path[=filter](:model-id)*`.

use serde::Serialize;

/// Serialized navigation location. Immutable once created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    token: String,
    segments: Vec<String>,
}

impl Bookmark {
    pub fn from_token(token: &str) -> Self {
        let token = token.trim().trim_start_matches('#');
        let segments = if token.is_empty() {
            Vec::new()
        } else {
            token.split(':').map(|s| s.to_string()).collect()
        };
        Self {
            token: token.to_string(),
            segments,
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self {
            token: segments.join(":"),
            segments,
        }
    }

    /// A bookmark for `menu_path` followed by percent-encoded model ids.
    pub fn with_model_ids(menu_path: &str, ids: &[String]) -> Self {
        let mut segments = vec![menu_path.to_string()];
        segments.extend(ids.iter().map(|id| encode_segment(id)));
        Self::from_segments(segments)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The menu path, without the optional `=filter` suffix.
    pub fn path(&self) -> &str {
        let first = self.segment(0).unwrap_or("");
        match first.find('=') {
            Some(i) => &first[..i],
            None => first,
        }
    }

    pub fn filter(&self) -> Option<&str> {
        let first = self.segment(0)?;
        first.find('=').map(|i| &first[i + 1..])
    }

    /// Decoded drilldown model ids (segments after the first).
    pub fn model_ids(&self) -> Vec<String> {
        self.segments.iter().skip(1).map(|s| decode_segment(s)).collect()
    }
}

impl std::fmt::Display for Bookmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

/// Normalizes a feature path into its registry / bookmark key:
/// slashes trimmed, whitespace removed, lowercased.
pub fn bookmark_key(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            seg.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|seg| !seg.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn encode_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

pub fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
#[path = "tests/bookmarks_tests.rs"]
mod tests;
