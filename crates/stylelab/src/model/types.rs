use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Fallback locale for descriptions.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Per-model metadata from `model_info.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub title: String,
    /// Identity key; unique across the collection.
    pub model_name: String,
    pub description: LocalizedText,
    #[serde(default)]
    pub huggingface_url: Option<String>,
    #[serde(default)]
    pub civitai_url: Option<String>,
    pub cover_image: String,
    #[serde(default)]
    pub sample_images: Vec<String>,
    /// Ordered category names used for column badges.
    #[serde(default)]
    pub prompt_order: Option<Vec<String>>,
}

impl ModelInfo {
    /// External links present on the model, Hugging Face first.
    pub fn links(&self) -> Vec<ExternalLink<'_>> {
        let mut out = Vec::new();
        if let Some(url) = self.huggingface_url.as_deref().filter(|u| !u.trim().is_empty()) {
            out.push(ExternalLink {
                kind: LinkKind::HuggingFace,
                url,
            });
        }
        if let Some(url) = self.civitai_url.as_deref().filter(|u| !u.trim().is_empty()) {
            out.push(ExternalLink {
                kind: LinkKind::Civitai,
                url,
            });
        }
        out
    }
}

/// Description text keyed by locale. `en_US` and `zh_CN` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(rename = "en_US")]
    pub en_us: String,
    #[serde(rename = "zh_CN")]
    pub zh_cn: String,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

impl LocalizedText {
    /// Text for `locale`, falling back to English.
    pub fn get(&self, locale: &str) -> &str {
        match locale {
            "en_US" => &self.en_us,
            "zh_CN" => &self.zh_cn,
            other => self
                .other
                .get(other)
                .map(String::as_str)
                .unwrap_or(self.en_us.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    HuggingFace,
    Civitai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExternalLink<'a> {
    pub kind: LinkKind,
    pub url: &'a str,
}

/// One generated image from `image_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub index: i64,
    pub image_url: String,
    #[serde(default)]
    pub parameters: JsonMap<String, JsonValue>,
    /// Opaque generation info, usually JSON-encoded.
    #[serde(default)]
    pub info: String,
}

/// Style table: header labels plus prompt rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Raw rows of `common_prompts.csv`; row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPrompts {
    pub rows: Vec<Vec<String>>,
}

impl CommonPrompts {
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Data row aligned to a grid column (row 0 is the header).
    pub fn row_for_column(&self, column: usize) -> Option<&[String]> {
        self.rows.get(column + 1).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = r#"{
        "title": "Anything XL",
        "model_name": "anything_xl",
        "description": { "en_US": "An anime model", "zh_CN": "动漫模型", "ja_JP": "アニメモデル" },
        "civitai_url": "https://civitai.com/models/1",
        "cover_image": "https://img.example/cover.png",
        "sample_images": ["https://img.example/1.png"]
    }"#;

    #[test]
    fn description_falls_back_to_english() {
        let info: ModelInfo = serde_json::from_str(INFO).expect("parse ok");
        assert_eq!(info.description.get("zh_CN"), "动漫模型");
        assert_eq!(info.description.get("ja_JP"), "アニメモデル");
        assert_eq!(info.description.get("fr_FR"), "An anime model");
        assert!(info.prompt_order.is_none());
    }

    #[test]
    fn links_skip_absent_and_blank() {
        let mut info: ModelInfo = serde_json::from_str(INFO).expect("parse ok");
        info.huggingface_url = Some("  ".into());
        let links = info.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind, LinkKind::Civitai);
    }

    #[test]
    fn missing_locale_is_rejected() {
        let bad = r#"{"title":"t","model_name":"m","description":{"en_US":"x"},"cover_image":"c"}"#;
        assert!(serde_json::from_str::<ModelInfo>(bad).is_err());
    }

    #[test]
    fn common_prompt_rows_are_offset_by_header() {
        let cp = CommonPrompts {
            rows: vec![
                vec!["Quality".into()],
                vec!["masterpiece,".into()],
                vec!["best quality".into()],
            ],
        };
        assert_eq!(cp.header(), ["Quality".to_string()]);
        assert_eq!(cp.row_for_column(0).unwrap()[0], "masterpiece,");
        assert_eq!(cp.row_for_column(1).unwrap()[0], "best quality");
        assert!(cp.row_for_column(2).is_none());
    }
}
