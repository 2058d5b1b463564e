//! Column badges resolved from the common prompt table.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::CommonPrompts;

/// Category that is rendered with a fixed label instead of a lookup.
pub const STYLE_TAGS_CATEGORY: &str = "Style tags";
/// Display label for [`STYLE_TAGS_CATEGORY`].
pub const STYLE_TAGS_LABEL: &str = "画师风格";

/// Visual variant of a badge, cycled by category position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl BadgeVariant {
    const CYCLE: [BadgeVariant; 4] = [
        BadgeVariant::Default,
        BadgeVariant::Secondary,
        BadgeVariant::Outline,
        BadgeVariant::Destructive,
    ];

    pub fn for_position(position: usize) -> Self {
        Self::CYCLE[position % Self::CYCLE.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub category: String,
    pub content: String,
    pub variant: BadgeVariant,
}

/// Lower-cased common prompt header → column offset. First occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct BadgeIndex {
    offsets: HashMap<String, usize>,
}

impl BadgeIndex {
    pub fn build(common: &CommonPrompts) -> Self {
        let mut offsets = HashMap::new();
        for (offset, header) in common.header().iter().enumerate() {
            offsets
                .entry(header.trim().to_lowercase())
                .or_insert(offset);
        }
        Self { offsets }
    }

    pub fn offset_of(&self, category: &str) -> Option<usize> {
        self.offsets.get(&category.trim().to_lowercase()).copied()
    }

    /// Badges for grid column `column`, one per resolvable category.
    ///
    /// An empty common prompt table yields no badges at all.
    pub fn resolve(
        &self,
        column: usize,
        prompt_order: &[String],
        common: &CommonPrompts,
    ) -> Vec<Badge> {
        if common.rows.is_empty() {
            return Vec::new();
        }
        let row = common.row_for_column(column);
        prompt_order
            .iter()
            .enumerate()
            .filter_map(|(position, category)| {
                let content = if category == STYLE_TAGS_CATEGORY {
                    STYLE_TAGS_LABEL.to_string()
                } else {
                    let offset = self.offset_of(category)?;
                    badge_text(row?.get(offset)?)?
                };
                Some(Badge {
                    category: category.clone(),
                    content,
                    variant: BadgeVariant::for_position(position),
                })
            })
            .collect()
    }
}

fn badge_text(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    let text = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
