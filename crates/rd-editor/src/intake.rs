//! External command intake.
//!
//! Outside collaborators (a chat assistant, a scripting console) do not get
//! a handle on the engine. They push [`ExternalCommand`]s into a port the
//! engine was given, and the engine drains it from its own event loop.
//! Type tokens arrive as raw strings and are validated only on the engine
//! side.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A request from an outside command source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum ExternalCommand {
    /// `{"command":"add-furniture","type":"sofa"}`
    AddFurniture {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl ExternalCommand {
    pub fn add_furniture(kind: impl Into<String>) -> Self {
        ExternalCommand::AddFurniture { kind: kind.into() }
    }
}

/// A port the engine polls for pending external commands.
pub trait CommandIntake {
    /// Next pending command, oldest first.
    fn poll(&mut self) -> Option<ExternalCommand>;
}

/// In-process FIFO intake. Clones share the same queue, so one clone goes
/// to the producer and another to the engine.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Rc<RefCell<VecDeque<ExternalCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: ExternalCommand) {
        self.inner.borrow_mut().push_back(command);
    }

    /// Decode a JSON command and enqueue it.
    ///
    /// # Errors
    /// Returns the decode error; nothing is enqueued.
    pub fn push_json(&self, text: &str) -> Result<(), serde_json::Error> {
        let command = serde_json::from_str(text)?;
        self.push(command);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl CommandIntake for CommandQueue {
    fn poll(&mut self) -> Option<ExternalCommand> {
        self.inner.borrow_mut().pop_front()
    }
}
