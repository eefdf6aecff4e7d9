use std::{
    fs,
    path::PathBuf,
};

use anyhow::Context;

const SNAKE_GAME_HTML: &str = include_str!("../../assets/snake.html");

/// A document to show in a host panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub id: String,
    pub title: String,
    pub html: String,
}

/// Host capability for showing static documents.
#[cfg_attr(test, mockall::automock)]
pub trait PanelHost: Send + Sync {
    fn open_panel(&self, panel: &PanelSpec) -> anyhow::Result<()>;
}

/// Writes each panel to `<dir>/<id>.html`.
#[derive(Debug, Clone)]
pub struct FilePanelHost {
    dir: PathBuf,
}

impl FilePanelHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, panel: &PanelSpec) -> PathBuf {
        self.dir.join(format!("{}.html", panel.id))
    }
}

impl PanelHost for FilePanelHost {
    fn open_panel(&self, panel: &PanelSpec) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create panel directory {}", self.dir.display()))?;
        let path = self.path_for(panel);
        fs::write(&path, &panel.html)
            .with_context(|| format!("Failed to write panel {}", path.display()))?;
        tracing::info!(id = %panel.id, title = %panel.title, path = %path.display(), "Opened panel");
        Ok(())
    }
}

pub fn snake_game_panel() -> PanelSpec {
    PanelSpec {
        id: "snakeGame".to_string(),
        title: "Snake Game".to_string(),
        html: SNAKE_GAME_HTML.to_string(),
    }
}

/// The "start snake game" action.
pub fn start_snake_game(host: &dyn PanelHost) -> anyhow::Result<PanelSpec> {
    let panel = snake_game_panel();
    host.open_panel(&panel)?;
    Ok(panel)
}
