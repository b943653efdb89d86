// SPDX-License-Identifier: GPL-3.0

use serde::{Deserialize, Deserializer, Serialize};

/// A single vocabulary item of a deck catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    /// Display text
    pub text: String,
    /// URL-safe slug, used to build media urls
    pub slug: String,
    pub meaning_en: Option<String>,
    pub meaning_kr: Option<String>,
}

impl Word {
    /// Builds the stable id of the word at `index` of the catalog
    pub fn id_for_index(index: usize) -> String {
        format!("word-{index}")
    }

    /// Preferred meaning for compact displays, korean first
    pub fn meaning(&self) -> Option<&str> {
        self.meaning_kr
            .as_deref()
            .or(self.meaning_en.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Case-insensitive substring match over the text and both translations.
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        self.text.to_lowercase().contains(needle)
            || self
                .meaning_en
                .as_ref()
                .is_some_and(|m| m.to_lowercase().contains(needle))
            || self
                .meaning_kr
                .as_ref()
                .is_some_and(|m| m.to_lowercase().contains(needle))
    }
}

/// One illustration of a word, as returned by the vocab api
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub style_id: String,
    pub style_name: String,
    pub path: String,
    #[serde(default)]
    pub variation: Option<u32>,
}

impl MediaItem {
    /// Last segment of the returned path
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Style ids may arrive as strings or as numbers
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// A word together with its media descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct WordDetail {
    pub text: String,
    pub slug: String,
    pub meaning_en: Option<String>,
    pub meaning_kr: Option<String>,
    pub images: Vec<MediaItem>,
}

/// Builds the url of a media file: `{base}/images/v3/{slug}/{filename}`
pub fn media_url(base: &str, slug: &str, path: &str) -> String {
    let filename = path.rsplit('/').next().unwrap_or(path);
    format!("{}/images/v3/{}/{}", base.trim_end_matches('/'), slug, filename)
}
