//! Logging action sink

use corridor_section::ActionSpec;
use corridor_triggers::ActionSink;

/// Executes actions by logging them.
///
/// Headless stand-in for the animation, audio and dialog systems.
#[derive(Debug, Default)]
pub struct LogActionSink {
    executed: u64,
}

impl LogActionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions executed so far
    pub fn executed(&self) -> u64 {
        self.executed
    }
}

impl ActionSink for LogActionSink {
    fn execute(&mut self, entity_id: &str, action: &ActionSpec) {
        self.executed += 1;
        log::debug!("[{}] executing {}", entity_id, action.kind_name());
        match action {
            ActionSpec::PlayAnimation { name } => {
                log::info!("[{}] animation '{}'", entity_id, name);
            }
            ActionSpec::PlaySound { sound, volume } => {
                log::info!("[{}] sound '{}' at volume {:.2}", entity_id, sound, volume);
            }
            ActionSpec::ShowDialog { text, duration } => {
                log::info!("[{}] \"{}\" ({:.1}s)", entity_id, text, duration);
            }
        }
    }
}
