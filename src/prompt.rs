//! Interactive prompts.
//!
//! The workflow asks its questions through [`Prompter`] so that the terminal
//! implementation can be swapped for a scripted one in tests. Every call
//! blocks until the user answers.

use crate::core::Result;
use crate::validation::ValidationError;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// Checks a typed answer; a rejection makes the prompt ask again.
pub type Validator = fn(&str) -> std::result::Result<(), ValidationError>;

pub trait Prompter {
    /// Free-text answer. Empty answers are not accepted.
    fn input(&mut self, message: &str) -> Result<String>;

    /// Free-text answer that is asked again until `validate` accepts it.
    fn input_validated(&mut self, message: &str, validate: Validator) -> Result<String>;

    /// Index of the chosen entry in `items`.
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize>;

    /// Yes/no question.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Prompts rendered on the terminal with dialoguer.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    /// The answer is validated and returned exactly as typed.
    fn input_validated(&mut self, message: &str, validate: Validator) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .validate_with(move |input: &String| check_answer(validate, input))
            .interact_text()?;
        Ok(answer)
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<usize> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Runs `validate` on the raw answer, turning a rejection into the message
/// dialoguer shows before asking again.
fn check_answer(validate: Validator, input: &str) -> std::result::Result<(), String> {
    validate(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_salary;

    #[test]
    fn test_check_answer_uses_raw_input() {
        assert_eq!(check_answer(validate_salary, "$60,000"), Ok(()));
        for padded in [" 60000", "60000 ", "\t$60,000"] {
            assert_eq!(
                check_answer(validate_salary, padded),
                Err("Not a valid salary!".to_string()),
                "{:?} should be rejected",
                padded
            );
        }
    }
}
