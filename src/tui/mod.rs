// TUI module for the interactive archive browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;
pub(crate) use timestamps::format_full;

use self::terminal::TerminalManager;
use crate::viewer::Viewer;

/// Run the interactive TUI until the user quits
pub fn run_interactive(viewer: Viewer) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(viewer);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
