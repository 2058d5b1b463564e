//! Parser for `model_info.json`.

use std::path::Path;

use anyhow::Context as _;

use crate::model::ModelInfo;

use super::ContentParser;

pub struct ModelInfoParser;

impl ContentParser for ModelInfoParser {
    type Output = ModelInfo;

    const FILE_NAME: &'static str = "model_info.json";

    fn parse(content: &str, path: &Path) -> anyhow::Result<ModelInfo> {
        let info: ModelInfo = serde_json::from_str(content)
            .with_context(|| format!("invalid model info JSON in {}", path.display()))?;
        if info.model_name.trim().is_empty() {
            anyhow::bail!("empty 'model_name' in {}", path.display());
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prompt_order() {
        let content = r#"{
            "title": "Anything XL",
            "model_name": "anything_xl",
            "description": {"en_US": "e", "zh_CN": "z"},
            "huggingface_url": "https://huggingface.co/x",
            "cover_image": "cover.png",
            "sample_images": ["a.png", "b.png"],
            "prompt_order": ["Quality", "Style tags"]
        }"#;
        let path = Path::new("/tmp/anything_xl/model_info.json");
        let info = ModelInfoParser::parse(content, path).expect("parse ok");
        assert_eq!(info.model_name, "anything_xl");
        assert_eq!(info.sample_images.len(), 2);
        assert_eq!(
            info.prompt_order.as_deref(),
            Some(&["Quality".to_string(), "Style tags".to_string()][..])
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let path = Path::new("/tmp/x/model_info.json");
        let err = ModelInfoParser::parse(r#"{"title": "t","#, path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid model info JSON"));
    }

    #[test]
    fn rejects_blank_model_name() {
        let content = r#"{"title":"t","model_name":" ","description":{"en_US":"e","zh_CN":"z"},"cover_image":"c"}"#;
        let path = Path::new("/tmp/x/model_info.json");
        assert!(ModelInfoParser::parse(content, path).is_err());
    }
}
