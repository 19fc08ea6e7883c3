//! Interactive collection of attributes and custom methods

mod attributes;
mod methods;

pub use attributes::AttributeCollector;
pub use methods::CustomMethodCollector;

use crate::error::{Result, ScaffoldError};
use crate::prompt::Prompter;

/// Single choice mapped back onto the value it labels
fn pick<T: Copy>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    values: &[T],
    labels: &[&str],
    default: usize,
) -> Result<T> {
    let index = prompter.select(prompt, labels, default)?;
    values
        .get(index)
        .copied()
        .ok_or_else(|| ScaffoldError::UnexpectedAnswer {
            prompt: prompt.to_string(),
            answer: index.to_string(),
        })
}
