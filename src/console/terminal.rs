//! Line-oriented terminal I/O and the dialogs built on top of it.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::warn;

use crate::application::dialogs::Dialogs;

/// Answer that cancels a prompt, like the cancel button of a browser dialog.
pub const CANCEL_INPUT: &str = "!";

pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Next input line, `None` at end of input.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    pub async fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }

    pub async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn ask(&mut self, question: &str) -> Option<String> {
        if let Err(err) = self.write(question).await {
            warn!(error = %err, "failed to write dialog");
            return None;
        }
        match self.read_line().await {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to read dialog answer");
                None
            }
        }
    }
}

#[async_trait]
impl<R, W> Dialogs for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&mut self, message: &str) -> bool {
        let answer = self.ask(&format!("{message} [y/N] ")).await;
        matches!(
            answer.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        )
    }

    /// An empty answer keeps `default`; `!` or end of input cancels.
    async fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.ask(&format!("{message} [{default}]: ")).await?;
        let answer = answer.trim();
        if answer == CANCEL_INPUT {
            return None;
        }
        if answer.is_empty() {
            return Some(default.to_string());
        }
        Some(answer.to_string())
    }

    async fn alert(&mut self, message: &str) {
        if let Err(err) = self.write_line(&format!("! {message}")).await {
            warn!(error = %err, "failed to write alert");
        }
    }
}
