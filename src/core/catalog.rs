// SPDX-License-Identifier: GPL-3.0

use log::debug;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::core::errors::CatalogError;
use crate::core::models::{MediaItem, Word, WordDetail, media_url};

/// Where the canonical word list comes from
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch the whole catalog in server order. A partial list is never returned.
    async fn load_catalog(&self) -> Result<Vec<Word>, CatalogError>;

    /// Fetch a single word with its media descriptors
    async fn load_word_detail(&self, word: &str) -> Result<WordDetail, CatalogError>;
}

/// Item of `GET /api/vocab`
#[derive(Debug, Deserialize)]
struct ApiWord {
    word: String,
    slug: String,
    #[serde(default)]
    meaning_en: Option<String>,
    #[serde(default)]
    meaning_kr: Option<String>,
}

/// Body of `GET /api/vocab/{word}`
#[derive(Debug, Deserialize)]
struct ApiWordDetail {
    word: String,
    slug: String,
    #[serde(default)]
    meaning_en: Option<String>,
    #[serde(default)]
    meaning_kr: Option<String>,
    #[serde(default)]
    images: Vec<MediaItem>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses a vocab list body into catalog words, ids follow the server order
pub fn parse_catalog(body: &str) -> Result<Vec<Word>, CatalogError> {
    let api_words: Vec<ApiWord> = serde_json::from_str(body)?;
    if api_words.is_empty() {
        return Err(CatalogError::Empty);
    }

    Ok(api_words
        .into_iter()
        .enumerate()
        .map(|(index, w)| Word {
            id: Word::id_for_index(index),
            text: w.word,
            slug: w.slug,
            meaning_en: non_empty(w.meaning_en),
            meaning_kr: non_empty(w.meaning_kr),
        })
        .collect())
}

/// Parses a single word body
pub fn parse_word_detail(body: &str) -> Result<WordDetail, CatalogError> {
    let detail: ApiWordDetail = serde_json::from_str(body)?;

    Ok(WordDetail {
        text: detail.word,
        slug: detail.slug,
        meaning_en: non_empty(detail.meaning_en),
        meaning_kr: non_empty(detail.meaning_kr),
        images: detail.images,
    })
}

/// [`CatalogSource`] backed by the Word Shorts http api
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base: String,
}

impl HttpCatalog {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full url of one media item of the word with `slug`
    pub fn media_url(&self, slug: &str, item: &MediaItem) -> String {
        media_url(&self.base, slug, &item.path)
    }

    async fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::request(url, e))
    }
}

impl CatalogSource for HttpCatalog {
    async fn load_catalog(&self) -> Result<Vec<Word>, CatalogError> {
        let url = format!("{}/api/vocab", self.base);
        let body = self.get_text(&url).await?;
        parse_catalog(&body)
    }

    async fn load_word_detail(&self, word: &str) -> Result<WordDetail, CatalogError> {
        let url = format!(
            "{}/api/vocab/{}",
            self.base,
            utf8_percent_encode(word, NON_ALPHANUMERIC)
        );
        let body = self.get_text(&url).await?;
        parse_word_detail(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_server_order() {
        let body = r#"[
            {"word": "abandon", "slug": "abandon", "meaning_en": "to leave", "meaning_kr": "버리다"},
            {"word": "ability", "slug": "ability", "meaning_en": "", "meaning_kr": null},
            {"word": "able", "slug": "able"}
        ]"#;

        let words = parse_catalog(body).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].id, "word-0");
        assert_eq!(words[0].meaning_kr.as_deref(), Some("버리다"));
        assert_eq!(words[1].id, "word-1");
        assert_eq!(words[1].meaning_en, None);
        assert_eq!(words[2].text, "able");
        assert_eq!(words[2].meaning_kr, None);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn malformed_catalog_is_rejected_whole() {
        let body = r#"[{"word": "abandon", "slug": "abandon"}, {"slug": "missing-word"}]"#;
        assert!(matches!(parse_catalog(body), Err(CatalogError::Malformed(_))));
        assert!(matches!(
            parse_catalog("<html>502</html>"),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn word_detail_with_images() {
        let body = r#"{
            "word": "abandon",
            "slug": "abandon",
            "meaning_en": "to leave",
            "meaning_kr": "버리다",
            "images": [
                {"style_id": 3, "style_name": "Watercolor", "path": "v3/abandon/watercolor_1.webp", "variation": 1},
                {"style_id": "anime", "style_name": "Anime", "path": "anime_2.webp"}
            ]
        }"#;

        let detail = parse_word_detail(body).unwrap();
        assert_eq!(detail.images.len(), 2);
        assert_eq!(detail.images[0].style_id, "3");
        assert_eq!(detail.images[0].filename(), "watercolor_1.webp");
        assert_eq!(detail.images[1].variation, None);

        let catalog = HttpCatalog::new("https://api.example.com/");
        assert_eq!(
            catalog.media_url(&detail.slug, &detail.images[0]),
            "https://api.example.com/images/v3/abandon/watercolor_1.webp"
        );
    }
}
