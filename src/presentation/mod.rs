//! Text views rendered by the console and the one-shot list commands.

pub mod table;
pub mod views;
