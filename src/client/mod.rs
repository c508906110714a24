//! Task client.
//!
//! [`Board`] holds the view state (recent and full task lists, the add/edit
//! form, the filter) and talks to the task service through a [`TaskApi`].
//! Every write is followed by a refetch of both lists.

mod api;
mod board;
mod confirm;
pub mod quotes;
pub mod render;

pub use api::{ClientError, ClientResult, HttpTaskApi, TaskApi};
pub use board::{Board, TaskForm};
pub use confirm::{AlwaysConfirm, Confirm, PromptConfirm};
