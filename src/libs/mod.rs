//! Core library modules for duetask.
//!
//! ## Modules
//!
//! - **Tasks**: the task record and its validation (`task`), due-date
//!   classification and ordering (`due`)
//! - **AI**: digest and suggestion prompts and outcomes (`digest`),
//!   latest-wins bookkeeping for overlapping requests (`generation`)
//! - **Application**: shared state for command handlers (`app`)
//! - **Infrastructure**: configuration, data directory, logging, messages
//! - **Presentation**: table rendering (`view`)
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use duetask::libs::due::{days_until, due_label};
//! use duetask::libs::task::Task;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let task = Task::new("t1", "Pay rent").with_date("2024-03-09");
//! assert_eq!(due_label(days_until(task.date.as_deref(), today)), "Expired");
//! ```

pub mod app;
pub mod config;
pub mod data_storage;
pub mod digest;
pub mod due;
pub mod generation;
pub mod logging;
pub mod messages;
pub mod task;
pub mod view;
