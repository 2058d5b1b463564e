use std::sync::Arc;
use std::time::Duration;

use env_flags::env_flags;

use stylelab::config::{GallerySettings, env_set, load_user_config, resolve_home};
use stylelab::grid::Grid;
use stylelab::logging::{init_tracing, log_options};
use stylelab::scroll::{FileStore, ScrollTracker, VisibleRange};
use stylelab::{PageOutcome, list_models, load_page, view};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_flags! {
        /// Stylelab home directory (absolute). Defaults to $HOME/.stylelab
        STYLELAB_HOME: &str = "";
        /// Content root whose subdirectories are models. Defaults to <cwd>/public/data
        CONTENT_DIR: &str = "";
        /// Model to render. If empty, the landing collection is listed.
        MODEL: &str = "";
        /// Description locale (en_US, zh_CN, ...)
        LOCALE: &str = "";
        /// Record this flat index as the model's first visible cell.
        SCROLL_TO: &str = "";
        /// Debounce window for scroll position writes
        SCROLL_DEBOUNCE_MS: u64 = 500;
        /// Scroll state file. Defaults to <STYLELAB_HOME>/scroll-state.json
        SCROLL_STATE_FILE: &str = "";
    }

    let home = resolve_home(&STYLELAB_HOME);
    let user_cfg = load_user_config(&home);
    init_tracing(&log_options(&home, user_cfg.as_ref().ok().and_then(|c| c.as_ref())));
    let user_cfg = match user_cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("ignoring invalid config in {}: {:#}", home.display(), e);
            None
        }
    };
    tracing::info!("stylelab_home={}", home.display());

    let workspace_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let mut settings = GallerySettings::defaults(&home, &workspace_dir)
        .merge(user_cfg.as_ref().and_then(|c| c.gallery.as_ref()));
    if env_set("CONTENT_DIR") {
        settings.content_dir = stylelab::config::expand_home(&CONTENT_DIR);
    }
    if env_set("LOCALE") {
        settings.locale = (*LOCALE).to_string();
    }
    if env_set("SCROLL_STATE_FILE") {
        settings.scroll_state_file = stylelab::config::expand_home(&SCROLL_STATE_FILE);
    }
    if env_set("SCROLL_DEBOUNCE_MS") {
        settings.scroll_debounce = Duration::from_millis(*SCROLL_DEBOUNCE_MS);
    }
    tracing::info!("content_dir={}", settings.content_dir.display());

    if (*MODEL).is_empty() {
        let models = match list_models(&settings.content_dir) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("failed to read model data: {:#}", e);
                Vec::new()
            }
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&view::landing(&models, &settings.locale))?
        );
        return Ok(());
    }

    let model_id = (*MODEL).to_string();
    let bundle = match load_page(&settings.content_dir, &model_id).await {
        PageOutcome::Found(b) => b,
        PageOutcome::NotFound => anyhow::bail!("model '{}' not found", model_id),
    };

    let store = Arc::new(FileStore::new(&settings.scroll_state_file));
    let tracker = ScrollTracker::new(&model_id, store).with_debounce(settings.scroll_debounce);
    if !(*SCROLL_TO).is_empty() {
        let grid = Grid::new(&bundle);
        match (*SCROLL_TO).trim().parse::<usize>() {
            Ok(index) if index < grid.total_cells() => {
                tracker.range_changed(VisibleRange {
                    start_index: index,
                    end_index: (index + grid.columns()).min(grid.total_cells()),
                });
                tracker.settle().await;
            }
            Ok(index) => tracing::warn!(
                "SCROLL_TO={} is outside the grid ({} cells)",
                index,
                grid.total_cells()
            ),
            Err(e) => tracing::warn!("invalid SCROLL_TO '{}': {}", *SCROLL_TO, e),
        }
    }
    let scroll = tracker.restore().await;

    println!(
        "{}",
        serde_json::to_string_pretty(&view::model_page(&bundle, &settings.locale, scroll))?
    );
    Ok(())
}
