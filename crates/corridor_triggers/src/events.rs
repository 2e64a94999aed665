//! Overlap events produced by the tracker

/// Type of overlap event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlapEventType {
    /// Agent entered the volume
    Begin,
    /// Agent left the volume
    End,
}

/// An overlap state change between the agent and a tracked volume
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapEvent<K> {
    /// Type of event
    pub event_type: OverlapEventType,
    /// Key the volume was registered under
    pub volume: K,
    /// Tag of the overlapping object
    pub tag: String,
}

impl<K> OverlapEvent<K> {
    /// Create a begin event
    pub fn begin(volume: K, tag: impl Into<String>) -> Self {
        Self {
            event_type: OverlapEventType::Begin,
            volume,
            tag: tag.into(),
        }
    }

    /// Create an end event
    pub fn end(volume: K, tag: impl Into<String>) -> Self {
        Self {
            event_type: OverlapEventType::End,
            volume,
            tag: tag.into(),
        }
    }

    /// Check if this is a begin event
    pub fn is_begin(&self) -> bool {
        self.event_type == OverlapEventType::Begin
    }

    /// Check if this is an end event
    pub fn is_end(&self) -> bool {
        self.event_type == OverlapEventType::End
    }
}
