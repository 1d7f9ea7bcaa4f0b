//! # duetask - personal task manager
//!
//! A command-line task manager: create, list, edit and delete tasks, cycle
//! their status, give them due dates and ask an AI service for a digest of
//! what is overdue or due soon.
//!
//! ## Features
//!
//! - **Task Management**: CRUD, status cycle (TODO → IN_PROGRESS → DONE), bulk
//!   removal of completed tasks
//! - **Due Dates**: day-granularity labels and severity badges, soonest-first
//!   ordering
//! - **Two Backends**: a local blob with cookie semantics or a REST service
//! - **AI Digest**: daily summary of overdue and upcoming tasks, and
//!   description suggestions for new tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use duetask::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
