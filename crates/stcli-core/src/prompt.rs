//! Interactive prompting.
//!
//! Commands talk to the user through the [`Prompter`] trait so tests can
//! script answers. `Ok(None)` means the user cancelled (Esc/Ctrl-C), which
//! callers normally turn into [`CoreError::Cancelled`].

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::CoreError;

pub trait Prompter {
    /// Free-text input. Empty input returns an empty string.
    fn input(&mut self, message: &str) -> Result<Option<String>, CoreError>;

    /// Yes/no question with a default answer.
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>, CoreError>;

    /// Pick one of several choices; returns the selected index.
    fn choose(
        &mut self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<Option<usize>, CoreError>;
}

/// Terminal prompter backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&mut self, message: &str) -> Result<Option<String>, CoreError> {
        let result = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .allow_empty(true)
            .interact_text();
        map_dialoguer(result)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>, CoreError> {
        let result = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default)
            .interact_opt();
        flatten_dialoguer(result)
    }

    fn choose(
        &mut self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<Option<usize>, CoreError> {
        let result = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(choices)
            .default(default)
            .interact_opt();
        flatten_dialoguer(result)
    }
}

fn map_dialoguer<T>(result: dialoguer::Result<T>) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(dialoguer::Error::IO(err)) => Err(CoreError::Io(err)),
    }
}

fn flatten_dialoguer<T>(result: dialoguer::Result<Option<T>>) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(value),
        Err(dialoguer::Error::IO(err)) if err.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(dialoguer::Error::IO(err)) => Err(CoreError::Io(err)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::VecDeque;

    /// A single scripted answer.
    pub enum Answer {
        Input(Option<String>),
        Confirm(Option<bool>),
        Choose(Option<usize>),
    }

    /// Prompter that replays a fixed script and records the prompt messages
    /// it was asked.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub messages: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: answers.into(),
                messages: Vec::new(),
            }
        }

        fn next(&mut self, message: &str) -> Answer {
            self.messages.push(message.to_string());
            self.answers
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected prompt: {message}"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, message: &str) -> Result<Option<String>, CoreError> {
            match self.next(message) {
                Answer::Input(value) => Ok(value),
                _ => panic!("expected input answer for: {message}"),
            }
        }

        fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>, CoreError> {
            match self.next(message) {
                Answer::Confirm(value) => Ok(value),
                _ => panic!("expected confirm answer for: {message}"),
            }
        }

        fn choose(
            &mut self,
            message: &str,
            _choices: &[&str],
            _default: usize,
        ) -> Result<Option<usize>, CoreError> {
            match self.next(message) {
                Answer::Choose(value) => Ok(value),
                _ => panic!("expected choose answer for: {message}"),
            }
        }
    }
}
