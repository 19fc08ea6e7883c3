//! Interactive input
//!
//! Collectors and generators ask questions through [`Prompter`] so the same
//! code runs against a real terminal or a scripted answer list.

use std::collections::VecDeque;

use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::error::{Result, ScaffoldError};

static INVALID: Emoji<'_, '_> = Emoji("✗ ", "x ");

/// Source of answers to interactive questions
pub trait Prompter {
    /// Free text; may be empty
    ///
    /// # Errors
    ///
    /// Fails when no answer can be obtained.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Single choice; returns the chosen index
    ///
    /// # Errors
    ///
    /// Fails when no answer can be obtained.
    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Multiple choice; returns the chosen indices
    ///
    /// # Errors
    ///
    /// Fails when no answer can be obtained.
    fn multi_select(&mut self, prompt: &str, items: &[&str]) -> Result<Vec<usize>>;

    /// Yes / no
    ///
    /// # Errors
    ///
    /// Fails when no answer can be obtained.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Tell the user an answer was rejected before asking again
    fn invalid(&mut self, message: &str);
}

/// Terminal prompts backed by `dialoguer`
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    /// Prompter using the colorful theme
    #[must_use]
    pub fn new() -> Self {
        Self {
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
    fn input(&mut self, prompt: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn multi_select(&mut self, prompt: &str, items: &[&str]) -> Result<Vec<usize>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn invalid(&mut self, message: &str) {
        eprintln!("{INVALID}{}", style(message).red());
    }
}

#[derive(Debug, Clone)]
enum Answer {
    Text(String),
    Pick(String),
    PickMany(Vec<String>),
    Confirm(bool),
    Default,
}

/// Replays a fixed list of answers, in order
///
/// Choices are given by label rather than index so scripts stay readable.
///
/// # Examples
///
/// ```
/// use oneclick_cli_lib::prompt::{Prompter, ScriptedPrompter};
///
/// let mut prompter = ScriptedPrompter::new().text("title").pick("string");
/// assert_eq!(prompter.input("Column name").unwrap(), "title");
/// assert_eq!(prompter.select("Type", &["integer", "string"], 0).unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    rejections: Vec<String>,
}

impl ScriptedPrompter {
    /// Empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a free text answer
    #[must_use]
    pub fn text(mut self, answer: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Text(answer.into()));
        self
    }

    /// Queue a single choice, by label
    #[must_use]
    pub fn pick(mut self, label: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Pick(label.into()));
        self
    }

    /// Queue a multiple choice, by labels
    #[must_use]
    pub fn pick_many<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers
            .push_back(Answer::PickMany(labels.into_iter().map(Into::into).collect()));
        self
    }

    /// Queue a "yes" to a confirmation
    #[must_use]
    pub fn yes(mut self) -> Self {
        self.answers.push_back(Answer::Confirm(true));
        self
    }

    /// Queue a "no" to a confirmation
    #[must_use]
    pub fn no(mut self) -> Self {
        self.answers.push_back(Answer::Confirm(false));
        self
    }

    /// Queue acceptance of whatever default the prompt offers
    #[must_use]
    pub fn accept_default(mut self) -> Self {
        self.answers.push_back(Answer::Default);
        self
    }

    /// Messages passed to [`Prompter::invalid`]
    #[must_use]
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    /// Answers not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn take(&mut self, prompt: &str) -> Result<Answer> {
        self.answers.pop_front().ok_or_else(|| ScaffoldError::NoAnswer {
            prompt: prompt.to_string(),
        })
    }

    fn unexpected(prompt: &str, answer: &Answer) -> ScaffoldError {
        ScaffoldError::UnexpectedAnswer {
            prompt: prompt.to_string(),
            answer: format!("{answer:?}"),
        }
    }

    fn position(prompt: &str, items: &[&str], label: &str) -> Result<usize> {
        items
            .iter()
            .position(|item| *item == label)
            .ok_or_else(|| ScaffoldError::UnexpectedAnswer {
                prompt: prompt.to_string(),
                answer: label.to_string(),
            })
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        match self.take(prompt)? {
            Answer::Text(text) => Ok(text),
            Answer::Default => Ok(String::new()),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }

    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        match self.take(prompt)? {
            Answer::Pick(label) => Self::position(prompt, items, &label),
            Answer::Default => Ok(default),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }

    fn multi_select(&mut self, prompt: &str, items: &[&str]) -> Result<Vec<usize>> {
        match self.take(prompt)? {
            Answer::PickMany(labels) => labels
                .iter()
                .map(|label| Self::position(prompt, items, label))
                .collect(),
            Answer::Default => Ok(Vec::new()),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        match self.take(prompt)? {
            Answer::Confirm(answer) => Ok(answer),
            Answer::Default => Ok(default),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }

    fn invalid(&mut self, message: &str) {
        self.rejections.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new()
            .text("done")
            .pick_many(["nullable", "unique"])
            .no()
            .accept_default();

        assert_eq!(prompter.input("name").unwrap(), "done");
        assert_eq!(
            prompter
                .multi_select("mods", &["nullable", "unique", "default"])
                .unwrap(),
            vec![0, 1]
        );
        assert!(!prompter.confirm("sure?", true).unwrap());
        assert_eq!(prompter.select("type", &["a", "b"], 1).unwrap(), 1);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_exhausted_script_fails() {
        let mut prompter = ScriptedPrompter::new();
        let err = prompter.input("Enter column name").unwrap_err();
        assert!(err.is_prompt_failure());
    }

    #[test]
    fn test_unknown_label_fails() {
        let mut prompter = ScriptedPrompter::new().pick("blob");
        let err = prompter.select("type", &["string", "text"], 0).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnexpectedAnswer { .. }));
    }

    #[test]
    fn test_accepted_default_selects_default_index() {
        let mut prompter = ScriptedPrompter::new().accept_default();
        assert_eq!(prompter.select("type", &["mixed", "void"], 0).unwrap(), 0);
    }

    #[test]
    fn test_rejections_are_recorded() {
        let mut prompter = ScriptedPrompter::new();
        prompter.invalid("Column name cannot be empty.");
        assert_eq!(prompter.rejections(), ["Column name cannot be empty."]);
    }
}
