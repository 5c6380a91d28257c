//! Scripted `Prompt` for command tests: canned answers, recorded questions.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use super::{Context, Prompt};
use crate::net::mock::MockTransport;

#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<bool>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        let prompt = Self::default();
        prompt.answers.lock().unwrap().extend(answers);
        prompt
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    /// Unscripted questions are answered no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.asked.lock().unwrap().push(question.to_owned());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}

/// A table-mode context over `mock` whose prompt answers `answers` in order.
pub fn context(mock: MockTransport, answers: &[bool]) -> (Context, Arc<MockTransport>, ScriptedPrompt) {
    let (api, mock) = mock.into_client();
    let prompt = ScriptedPrompt::answering(answers);
    (Context::new(api, false, Box::new(prompt.clone())), mock, prompt)
}
