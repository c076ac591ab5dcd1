//! Selection stack
//!
//! LIFO history of context/namespace selections. Index 0 is the top (the most
//! recent selection). The persisted form is a bare JSON array in stack order.

use crate::error::StackError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One context/namespace selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub context: String,
    pub namespace: String,
}

impl Element {
    pub fn new(context: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            namespace: namespace.into(),
        }
    }
}

/// Ordered selection history, top first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    data: VecDeque<Element>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Insert at the top. Duplicates are kept.
    pub fn push(&mut self, element: Element) {
        self.data.push_front(element);
    }

    pub fn pop(&mut self) -> Result<Element, StackError> {
        self.data.pop_front().ok_or(StackError::Empty)
    }

    pub fn peek(&self) -> Result<&Element, StackError> {
        self.data.front().ok_or(StackError::Empty)
    }

    /// Element directly below the top.
    pub fn peek_second(&self) -> Result<&Element, StackError> {
        self.data.get(1).ok_or_else(|| self.insufficient(2))
    }

    /// Exchange the top two elements. Fails rather than no-ops on short stacks.
    pub fn swap(&mut self) -> Result<(), StackError> {
        if self.data.len() < 2 {
            return Err(self.insufficient(2));
        }
        self.data.swap(0, 1);
        Ok(())
    }

    /// Elements from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.data.iter()
    }

    fn insufficient(&self, required: usize) -> StackError {
        StackError::Insufficient {
            required,
            actual: self.data.len(),
        }
    }
}

impl FromIterator<Element> for Stack {
    /// Builds a stack whose top is the first item yielded.
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// Serialize a stack to its JSON array form, top first.
pub fn encode(stack: &Stack) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&stack.data)
}

/// Parse the JSON array form back into a stack, preserving order.
pub fn decode(bytes: &[u8]) -> Result<Stack, serde_json::Error> {
    let data: VecDeque<Element> = serde_json::from_slice(bytes)?;
    Ok(Stack { data })
}
