//! Action execution seam

use corridor_section::ActionSpec;

/// Receives the actions of a firing event, one at a time, in authored order.
///
/// Implementations carry out the effect (animation, audio, dialog UI).
/// Execution is synchronous: `execute` returns before the next action is
/// handed over.
pub trait ActionSink {
    /// Run `action` on behalf of `entity_id`
    fn execute(&mut self, entity_id: &str, action: &ActionSpec);
}

impl<F> ActionSink for F
where
    F: FnMut(&str, &ActionSpec),
{
    fn execute(&mut self, entity_id: &str, action: &ActionSpec) {
        self(entity_id, action)
    }
}

/// Sink that records everything it is handed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionRecorder {
    pub executed: Vec<(String, ActionSpec)>,
}

impl ActionRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded actions
    pub fn len(&self) -> usize {
        self.executed.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }

    /// Forget recorded actions
    pub fn clear(&mut self) {
        self.executed.clear();
    }
}

impl ActionSink for ActionRecorder {
    fn execute(&mut self, entity_id: &str, action: &ActionSpec) {
        self.executed.push((entity_id.to_string(), action.clone()));
    }
}
