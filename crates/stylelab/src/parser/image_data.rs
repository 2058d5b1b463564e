//! Parser for `image_data.json`, a JSON array of image records.

use std::path::Path;

use anyhow::Context as _;

use crate::model::ImageRecord;

use super::ContentParser;

pub struct ImageDataParser;

impl ContentParser for ImageDataParser {
    type Output = Vec<ImageRecord>;

    const FILE_NAME: &'static str = "image_data.json";

    fn parse(content: &str, path: &Path) -> anyhow::Result<Vec<ImageRecord>> {
        serde_json::from_str(content)
            .with_context(|| format!("invalid image data JSON in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_file_order_and_parameters() {
        let content = r#"[
            {"index": 7, "image_url": "https://img.example/7.png",
             "parameters": {"steps": 28, "sampler": "Euler a"},
             "info": "{\"seed\": 1}"},
            {"index": 2, "image_url": "https://img.example/2.png"}
        ]"#;
        let path = Path::new("/tmp/m/image_data.json");
        let records = ImageDataParser::parse(content, path).expect("parse ok");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 7);
        assert_eq!(records[0].parameters["steps"], 28);
        assert_eq!(records[0].info, "{\"seed\": 1}");
        assert_eq!(records[1].index, 2);
        assert!(records[1].parameters.is_empty());
    }

    #[test]
    fn strict_on_malformed_entries() {
        let path = Path::new("/tmp/m/image_data.json");
        // One bad entry fails the whole file.
        let content = r#"[{"index": 1, "image_url": "a"}, {"index": "x", "image_url": "b"}]"#;
        assert!(ImageDataParser::parse(content, path).is_err());
        assert!(ImageDataParser::parse("not json", path).is_err());
    }
}
