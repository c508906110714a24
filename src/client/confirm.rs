//! Confirmation prompts for destructive actions.

use dialoguer::{Confirm as DialoguerConfirm, theme::ColorfulTheme};
use tracing::warn;

/// Asks the user to approve an action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Interactive terminal prompt. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match DialoguerConfirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Confirmation prompt failed, treating as declined");
                false
            }
        }
    }
}

/// Approves everything (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
