//! Interactive prompting over line-oriented input.

use colored::Colorize;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("input closed")]
    Closed,
    #[error("no choices available for '{0}'")]
    NoChoices(String),
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text.
    Input,
    /// Free text expected to be a number; validation is left to the caller.
    Number,
    /// Exactly one of the listed choices.
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: &'static str,
    pub message: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn input(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: QuestionKind::Input,
        }
    }

    pub fn number(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: QuestionKind::Number,
        }
    }

    pub fn list(name: &'static str, message: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: QuestionKind::List(choices),
        }
    }
}

/// Answers keyed by question name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(HashMap<&'static str, String>);

impl Answers {
    pub fn insert(&mut self, name: &'static str, value: String) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn take(&mut self, name: &str) -> String {
        self.0.remove(name).unwrap_or_default()
    }
}

pub trait Prompter {
    /// Pick one entry from `choices`.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<String, PromptError>;

    /// Read one line of free text.
    fn input(&mut self, message: &str) -> Result<String, PromptError>;

    /// Ask each question in turn.
    fn ask(&mut self, questions: &[Question]) -> Result<Answers, PromptError> {
        let mut answers = Answers::default();
        for question in questions {
            let value = match &question.kind {
                QuestionKind::Input | QuestionKind::Number => self.input(&question.message)?,
                QuestionKind::List(choices) => self.select(&question.message, choices)?,
            };
            answers.insert(question.name, value);
        }
        Ok(answers)
    }
}

/// Numbered-list prompter reading answers one line at a time.
///
/// A list answer may be given either as the 1-based position or as the exact
/// choice text; anything else re-asks.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn question(&mut self, message: &str) -> Result<(), PromptError> {
        write!(self.output, "{} {} ", "?".green().bold(), message.bold())?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<String, PromptError> {
        if choices.is_empty() {
            return Err(PromptError::NoChoices(message.to_string()));
        }

        writeln!(self.output, "{} {}", "?".green().bold(), message.bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, choice)?;
        }

        loop {
            write!(self.output, "{} ", ">".cyan())?;
            self.output.flush()?;
            let answer = self.read_line()?;

            if let Some(choice) = choices.iter().find(|c| **c == answer) {
                return Ok(choice.clone());
            }
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(choices[n - 1].clone());
                }
            }
            writeln!(
                self.output,
                "{}",
                format!("Please enter a number between 1 and {}", choices.len()).yellow()
            )?;
        }
    }

    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        self.question(message)?;
        self.read_line()
    }
}
