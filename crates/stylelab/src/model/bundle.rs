//! Fully loaded per-model data, ready for grid assembly.

use super::images::ImageIndex;
use super::types::{CommonPrompts, ImageRecord, ModelInfo, StyleTable};
use crate::grid::BadgeIndex;

/// Everything the detail page needs for one model.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub model_id: String,
    pub info: ModelInfo,
    pub images: ImageIndex,
    pub table: StyleTable,
    pub prompt_order: Vec<String>,
    pub common_prompts: CommonPrompts,
    badges: BadgeIndex,
}

impl ModelBundle {
    pub fn new(
        model_id: impl Into<String>,
        info: ModelInfo,
        table: StyleTable,
        images: Vec<ImageRecord>,
        common_prompts: CommonPrompts,
    ) -> Self {
        let prompt_order = info.prompt_order.clone().unwrap_or_default();
        let badges = BadgeIndex::build(&common_prompts);
        Self {
            model_id: model_id.into(),
            info,
            images: ImageIndex::from_records(images),
            table,
            prompt_order,
            common_prompts,
            badges,
        }
    }

    pub fn badge_index(&self) -> &BadgeIndex {
        &self.badges
    }
}
