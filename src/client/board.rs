//! Client view state and the actions that drive it.

use tracing::{debug, warn};

use super::api::{ClientError, ClientResult, TaskApi};
use super::confirm::Confirm;
use super::quotes;
use crate::types::{Task, TaskCounts, TaskFilter, TaskInput};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// The add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    fn to_input(&self) -> TaskInput {
        TaskInput::new(self.title.clone(), self.description.clone())
    }
}

/// View state of the task client.
///
/// Edit mode: idle -> editing (`start_edit`) -> `submit` or `cancel_edit` -> idle.
pub struct Board<A> {
    api: A,
    /// Most recent pending tasks.
    tasks: Vec<Task>,
    all_tasks: Vec<Task>,
    pub form: TaskForm,
    edit_task: Option<Task>,
    filter: TaskFilter,
    show_all: bool,
    quote: &'static str,
    /// Last failure, shown as a banner until the next successful refresh.
    error: Option<String>,
}

impl<A: TaskApi> Board<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            all_tasks: Vec::new(),
            form: TaskForm::default(),
            edit_task: None,
            filter: TaskFilter::All,
            show_all: false,
            quote: quotes::initial_quote(),
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn all_tasks(&self) -> &[Task] {
        &self.all_tasks
    }

    pub fn edit_task(&self) -> Option<&Task> {
        self.edit_task.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_task.is_some()
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn quote(&self) -> &'static str {
        self.quote
    }

    pub fn set_quote(&mut self, quote: &'static str) {
        self.quote = quote;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Initial fetch of both lists.
    pub async fn load(&mut self) -> ClientResult<()> {
        self.refresh().await
    }

    /// Refetch the recent and full lists.
    ///
    /// On failure the previous lists are kept and the error banner is set.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let recent = self.api.recent_tasks().await;
        let recent = self.track(recent)?;
        let all = self.api.all_tasks().await;
        let all = self.track(all)?;

        self.tasks = recent;
        self.all_tasks = all;
        self.error = None;
        Ok(())
    }

    /// Create a task from the form, or update the task being edited.
    ///
    /// A blank title is rejected before any request is made.
    pub async fn submit(&mut self) -> ClientResult<()> {
        if self.form.title.trim().is_empty() {
            return self.track(Err(ClientError::TitleRequired));
        }

        let input = self.form.to_input();
        match &self.edit_task {
            Some(task) => {
                let id = task.id;
                let result = self.api.update_task(id, &input).await;
                self.track(result)?;
                debug!(task_id = id, "Edit submitted");
                self.edit_task = None;
            }
            None => {
                let result = self.api.create_task(&input).await;
                self.track(result)?;
            }
        }

        self.form = TaskForm::default();
        self.refresh().await
    }

    /// Enter edit mode for `task`, loading it into the form.
    pub fn start_edit(&mut self, task: &Task) {
        self.form = TaskForm::new(
            task.title.clone(),
            task.description.clone().unwrap_or_default(),
        );
        self.edit_task = Some(task.clone());
    }

    /// Edit a listed task: load it into the form, replace the title and,
    /// when given, the description, then submit.
    ///
    /// Returns `false` without a request when `id` is not in the full list.
    pub async fn edit(
        &mut self,
        id: i64,
        title: impl Into<String>,
        description: Option<String>,
    ) -> ClientResult<bool> {
        let Some(task) = self.all_tasks.iter().find(|t| t.id == id).cloned() else {
            return Ok(false);
        };
        self.start_edit(&task);
        self.form.title = title.into();
        if let Some(description) = description {
            self.form.description = description;
        }
        self.submit().await?;
        Ok(true)
    }

    /// Leave edit mode and clear the form.
    pub fn cancel_edit(&mut self) {
        self.edit_task = None;
        self.form = TaskForm::default();
    }

    pub async fn mark_done(&mut self, id: i64) -> ClientResult<()> {
        let result = self.api.mark_done(id).await;
        self.track(result)?;
        self.refresh().await
    }

    /// Delete after confirmation. Returns `false` when the user declined.
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> ClientResult<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }
        let result = self.api.delete_task(id).await;
        self.track(result)?;
        self.refresh().await?;
        Ok(true)
    }

    /// Show the full list, refetching it first.
    pub async fn open_all(&mut self) -> ClientResult<()> {
        self.show_all = true;
        let result = self.api.all_tasks().await;
        self.all_tasks = self.track(result)?;
        Ok(())
    }

    pub fn close_all(&mut self) {
        self.show_all = false;
    }

    /// Change the full-list filter. Local only.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Full list narrowed by the current filter.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.all_tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn stats(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.all_tasks)
    }

    /// Record a failure in the banner before passing it on.
    fn track<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            warn!(error = %e, "Task request failed");
            self.error = Some(e.to_string());
        }
        result
    }
}
