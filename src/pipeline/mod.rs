//! Pipeline entry points for bot operations.
//!
//! - `fetch_and_report`: fetch one board and send it to chat
//! - `handle_line` / `execute`: chat command dispatch
//! - `run_poll_cycle` / `run_poll_loop`: periodic reporting of listed stations

pub mod commands;
pub mod context;
pub mod poll;
pub mod report;

pub use commands::{BotCommand, execute, handle_line};
pub use context::BotContext;
pub use poll::{
    PollSummary, restore_notified, run_poll_cycle, run_poll_loop, run_poll_loop_until,
};
pub use report::{ReportOutcome, fetch_and_report};
