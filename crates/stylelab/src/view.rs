//! JSON views of the landing collection and a model detail page.

use serde_json::{Value as JsonValue, json};

use crate::grid::Grid;
use crate::loader::ModelEntry;
use crate::model::ModelBundle;
use crate::scroll::ScrollTarget;

/// One card per model, in enumeration order.
pub fn landing(entries: &[ModelEntry], locale: &str) -> JsonValue {
    let cards: Vec<JsonValue> = entries
        .iter()
        .map(|m| {
            json!({
                "id": m.id,
                "title": m.info.title,
                "model_name": m.info.model_name,
                "description": m.info.description.get(locale),
                "cover_image": m.info.cover_image,
                "sample_images": m.info.sample_images,
                "links": m.info.links(),
            })
        })
        .collect();
    JsonValue::Array(cards)
}

/// Headers with badges, then one entry per prompt row with its cells.
pub fn model_page(bundle: &ModelBundle, locale: &str, scroll: Option<ScrollTarget>) -> JsonValue {
    let grid = Grid::new(bundle);
    let headers: Vec<JsonValue> = (0..grid.columns())
        .filter_map(|col| grid.header(col))
        .map(|h| json!(h))
        .collect();
    let rows: Vec<JsonValue> = (0..grid.rows())
        .map(|row| {
            json!({
                "rank": row + 1,
                "prompt": grid.prompt(row).unwrap_or(""),
                "cells": grid.row_cells(row),
            })
        })
        .collect();
    json!({
        "model_id": bundle.model_id,
        "title": bundle.info.title,
        "description": bundle.info.description.get(locale),
        "links": bundle.info.links(),
        "columns": grid.columns(),
        "rows_count": grid.rows(),
        "total_cells": grid.total_cells(),
        "headers": headers,
        "rows": rows,
        "scroll": scroll.map(|t| json!({
            "index": t.index,
            "align": t.align,
            "row_start": t.row_start(grid.columns()),
        })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommonPrompts, ImageRecord, ModelInfo, StyleTable};
    use crate::scroll::Align;

    fn bundle() -> ModelBundle {
        let info: ModelInfo = serde_json::from_str(
            r#"{"title":"T","model_name":"m","description":{"en_US":"hello","zh_CN":"你好"},
                "cover_image":"c.png","prompt_order":["Style tags"]}"#,
        )
        .unwrap();
        let table = StyleTable {
            headers: vec!["Prompt".into(), "A".into()],
            rows: vec![vec!["x, y".into(), "1".into()], vec!["z".into(), "2".into()]],
        };
        let images = vec![ImageRecord {
            index: 1,
            image_url: "u1".into(),
            parameters: Default::default(),
            info: String::new(),
        }];
        ModelBundle::new("m", info, table, images, CommonPrompts::default())
    }

    #[test]
    fn page_lists_rows_and_missing_cells() {
        let b = bundle();
        let target = ScrollTarget {
            index: 3,
            align: Align::Start,
        };
        let page = model_page(&b, "zh_CN", Some(target));
        assert_eq!(page["description"], "你好");
        assert_eq!(page["total_cells"], 4);
        assert_eq!(page["rows"][0]["prompt"], "x, y");
        assert_eq!(page["rows"][0]["cells"][0]["kind"], "image");
        assert_eq!(page["rows"][0]["cells"][0]["image"]["image_url"], "u1");
        assert_eq!(page["rows"][1]["cells"][0]["kind"], "missing");
        // No common prompts: even the fixed style-tags badge is omitted.
        assert_eq!(page["headers"][1]["label"], "A");
        assert_eq!(page["headers"][1]["badges"], serde_json::json!([]));
        assert_eq!(page["scroll"]["row_start"], 2);
        assert_eq!(page["scroll"]["align"], "start");
    }

    #[test]
    fn page_without_scroll_has_null() {
        let b = bundle();
        assert!(model_page(&b, "en_US", None)["scroll"].is_null());
    }
}
