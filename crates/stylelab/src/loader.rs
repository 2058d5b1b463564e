//! Model loader and landing collection enumeration.
//!
//! Responsibilities:
//! - Read the four per-model files concurrently and parse them into a
//!   `ModelBundle`; any failure fails the whole model.
//! - Turn a failed load into a not-found page outcome.
//! - Enumerate model directories under the content root, skipping the ones
//!   that are incomplete or carry an unparsable data file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::LoadError;
use crate::model::{ModelBundle, ModelInfo};
use crate::parser::{
    CommonPromptsParser, ContentParser, ImageDataParser, MODEL_FILES, ModelInfoParser,
    StyleTableParser,
};

/// A model directory that qualified for the landing collection.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    /// Directory name; the routing identifier for `load_model`.
    pub id: String,
    pub path: PathBuf,
    pub info: ModelInfo,
}

/// Result of loading a model detail page.
#[derive(Debug)]
pub enum PageOutcome {
    Found(Box<ModelBundle>),
    NotFound,
}

/// Load and normalize every data file of one model.
pub async fn load_model(content_dir: &Path, model_id: &str) -> Result<ModelBundle, LoadError> {
    validate_model_id(model_id)?;
    let dir = content_dir.join(model_id);
    tracing::debug!("loading model '{}' from {}", model_id, dir.display());

    let (info_src, table_src, images_src, common_src) = tokio::try_join!(
        read_file(model_id, dir.join(ModelInfoParser::FILE_NAME)),
        read_file(model_id, dir.join(StyleTableParser::FILE_NAME)),
        read_file(model_id, dir.join(ImageDataParser::FILE_NAME)),
        read_file(model_id, dir.join(CommonPromptsParser::FILE_NAME)),
    )?;

    let info = parse::<ModelInfoParser>(model_id, &dir, &info_src)?;
    let table = parse::<StyleTableParser>(model_id, &dir, &table_src)?;
    let images = parse::<ImageDataParser>(model_id, &dir, &images_src)?;
    let common = parse::<CommonPromptsParser>(model_id, &dir, &common_src)?;

    tracing::info!(
        "loaded model '{}': {} rows x {} columns, {} images, {} common prompt rows",
        model_id,
        table.rows.len(),
        table.headers.len(),
        images.len(),
        common.rows.len()
    );
    Ok(ModelBundle::new(model_id, info, table, images, common))
}

/// Load a model for its detail page; failures become `NotFound`.
pub async fn load_page(content_dir: &Path, model_id: &str) -> PageOutcome {
    match load_model(content_dir, model_id).await {
        Ok(bundle) => PageOutcome::Found(Box::new(bundle)),
        Err(e) => {
            tracing::warn!("failed to load model data for '{}': {}", model_id, e);
            PageOutcome::NotFound
        }
    }
}

/// Enumerate qualifying model directories in directory order.
pub fn list_models(content_dir: &Path) -> anyhow::Result<Vec<ModelEntry>> {
    let mut out = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    tracing::debug!("scanning content dir {}", content_dir.display());
    for entry in fs::read_dir(content_dir)
        .with_context(|| format!("read_dir {}", content_dir.display()))?
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", content_dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(id) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!("skipping non UTF-8 directory {}", path.display());
            continue;
        };

        let info_path = path.join(ModelInfoParser::FILE_NAME);
        let content = match fs::read_to_string(&info_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!("skipping {}: failed to read: {}", info_path.display(), e);
                continue;
            }
        };
        let info = match ModelInfoParser::parse(&content, &info_path) {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
                continue;
            }
        };

        let missing: Vec<&str> = MODEL_FILES
            .iter()
            .copied()
            .filter(|f| !path.join(f).is_file())
            .collect();
        if !missing.is_empty() {
            tracing::debug!("skipping {}: missing {}", path.display(), missing.join(", "));
            continue;
        }
        let checked = check_parses::<StyleTableParser>(&path)
            .and_then(|()| check_parses::<ImageDataParser>(&path))
            .and_then(|()| check_parses::<CommonPromptsParser>(&path));
        if let Err(e) = checked {
            tracing::warn!("skipping {}: {:#}", path.display(), e);
            continue;
        }

        if info.model_name != id {
            tracing::warn!(
                "model_name '{}' differs from directory '{}'",
                info.model_name,
                id
            );
        }
        if !seen.insert(info.model_name.clone()) {
            tracing::warn!(
                "skipping {}: duplicate model_name '{}'",
                path.display(),
                info.model_name
            );
            continue;
        }
        out.push(ModelEntry { id, path, info });
    }
    tracing::info!("found {} model(s) in {}", out.len(), content_dir.display());
    Ok(out)
}

fn check_parses<P: ContentParser>(dir: &Path) -> anyhow::Result<()> {
    let path = dir.join(P::FILE_NAME);
    let content =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    P::parse(&content, &path).map(|_| ())
}

fn validate_model_id(model_id: &str) -> Result<(), LoadError> {
    let bad = model_id.trim().is_empty()
        || model_id == "."
        || model_id == ".."
        || model_id.contains(['/', '\\'])
        || model_id.contains(std::path::MAIN_SEPARATOR);
    if bad {
        return Err(LoadError::InvalidId(model_id.to_string()));
    }
    Ok(())
}

async fn read_file(model: &str, path: PathBuf) -> Result<String, LoadError> {
    match tokio::fs::read_to_string(&path).await {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound {
            model: model.to_string(),
            path,
        }),
        Err(e) => Err(LoadError::Io {
            model: model.to_string(),
            path,
            source: e,
        }),
    }
}

fn parse<P: ContentParser>(model: &str, dir: &Path, content: &str) -> Result<P::Output, LoadError> {
    let path = dir.join(P::FILE_NAME);
    P::parse(content, &path).map_err(|e| LoadError::Parse {
        model: model.to_string(),
        path,
        message: format!("{e:#}"),
    })
}
