//! Input validation for prompted values.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Optional dollar sign, a leading digit, then digits and thousands commas.
/// ASCII digits only; `\d` would also admit other Unicode digits.
static SALARY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[$]?[0-9][0-9,]*$").expect("salary pattern is a valid regex"));

/// Rejected prompt input. Reported back to the prompt, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Accepts salaries such as `60000`, `$60,000` or `1,000,000`.
pub fn validate_salary(input: &str) -> Result<(), ValidationError> {
    if SALARY_PATTERN.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError("Not a valid salary!".to_string()))
    }
}
