//! Terminal front end: the interactive console and the one-shot list commands.

pub mod command;
pub mod list;
pub mod router;
pub mod session;
pub mod terminal;

use std::io;
use std::sync::Arc;

use tokio::io::BufReader;

use crate::application::repos::ResourceApi;

pub use router::Route;
pub use session::Console;
pub use terminal::Terminal;

/// Run the interactive console on stdin/stdout, starting at `route`.
pub async fn run_stdio(api: Arc<dyn ResourceApi>, route: Route) -> io::Result<()> {
    let term = Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    Console::new(api, term).run(route).await
}
