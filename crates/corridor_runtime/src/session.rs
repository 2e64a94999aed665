//! Tick-driven session
//!
//! Each tick runs, in order:
//! 1. Proximity events against the agent position
//! 2. Overlap detection for entity and exit-trigger volumes
//! 3. Volume-enter events of entities
//! 4. Exit-trigger transitions
//!
//! so a section's own proximity and volume effects fire before the section
//! can be replaced. After a transition the dispatcher and tracker are
//! rebuilt for the new section, and remaining exit signals of the old scene
//! in the same tick are dropped.

use crate::agent::AgentPositionProvider;
use crate::error::Result;
use crate::scene::HeadlessScene;
use corridor_section::SectionRepository;
use corridor_streaming::{AnomalySelector, SectionStreamer, StreamError, StreamingConfig, Transition, TriggerId};
use corridor_triggers::{ActionSink, EventDispatcher, Firing, OverlapTracker, TriggerFilter};
use rand::rngs::StdRng;
use rand::Rng;

/// Key of a volume tracked for the agent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VolumeKey {
    /// Entity with volume-enter events
    Entity(String),
    /// Exit trigger of a live scene
    Exit(TriggerId),
}

/// Everything that happened during one tick
#[derive(Debug, Default)]
pub struct TickReport {
    pub proximity: Vec<Firing>,
    pub volume: Vec<Firing>,
    pub transitions: Vec<Transition>,
    /// Non-fatal load failures; the previous section stayed live
    pub failures: Vec<StreamError>,
}

impl TickReport {
    /// Check if nothing fired and nothing loaded
    pub fn is_quiet(&self) -> bool {
        self.proximity.is_empty() && self.volume.is_empty() && self.transitions.is_empty() && self.failures.is_empty()
    }
}

/// A streaming session driven by host ticks
pub struct Session<R, G = StdRng> {
    streamer: SectionStreamer<R, HeadlessScene, G>,
    dispatcher: EventDispatcher,
    tracker: OverlapTracker<VolumeKey>,
    ticks: u64,
}

impl<R: SectionRepository> Session<R, StdRng> {
    /// Create a session over `repository`
    pub fn new(config: StreamingConfig, repository: R) -> Result<Self> {
        let streamer = SectionStreamer::new(config, repository, HeadlessScene::new())?;
        Ok(Self::from_streamer(streamer))
    }
}

impl<R: SectionRepository, G: Rng> Session<R, G> {
    /// Create a session with an explicit anomaly selector
    pub fn with_selector(config: StreamingConfig, repository: R, selector: AnomalySelector<G>) -> Result<Self> {
        let streamer = SectionStreamer::with_selector(config, repository, HeadlessScene::new(), selector)?;
        Ok(Self::from_streamer(streamer))
    }

    fn from_streamer(streamer: SectionStreamer<R, HeadlessScene, G>) -> Self {
        let agent_tag = streamer.config().agent_tag.clone();
        Self {
            streamer,
            dispatcher: EventDispatcher::with_filter(TriggerFilter::agent(agent_tag.as_str())),
            tracker: OverlapTracker::new(agent_tag),
            ticks: 0,
        }
    }

    /// Load the initial section
    pub fn start(&mut self) -> Result<Transition> {
        let transition = self.streamer.start()?;
        self.reload();
        Ok(transition)
    }

    /// Advance one tick
    pub fn tick(&mut self, agent: &impl AgentPositionProvider, sink: &mut dyn ActionSink) -> Result<TickReport> {
        if !self.streamer.phase().is_started() {
            return Err(StreamError::NotStarted.into());
        }
        self.ticks += 1;

        let position = agent.agent_position();
        let mut report = TickReport {
            proximity: self.dispatcher.tick(position, sink),
            ..TickReport::default()
        };

        let mut exits = Vec::new();
        for event in self.tracker.update(position) {
            if !event.is_begin() {
                continue;
            }
            match event.volume {
                VolumeKey::Entity(id) => {
                    let fired = self.dispatcher.on_volume_enter(&id, &event.tag, sink);
                    report.volume.extend(fired);
                }
                VolumeKey::Exit(trigger) => exits.push((trigger, event.tag)),
            }
        }

        for (trigger, tag) in exits {
            if !report.transitions.is_empty() {
                log::debug!("Dropping exit {} after transition this tick", trigger);
                continue;
            }
            match self.streamer.on_exit_trigger_enter(trigger, &tag) {
                Ok(Some(transition)) => {
                    self.reload();
                    report.transitions.push(transition);
                }
                Ok(None) => {}
                Err(e) => report.failures.push(e),
            }
        }

        Ok(report)
    }

    /// Rebuild dispatcher and tracker for the live section
    fn reload(&mut self) {
        self.tracker.clear();
        self.dispatcher.clear();

        let (Some(section), Some(handle)) = (self.streamer.current_section(), self.streamer.scene()) else {
            return;
        };
        self.dispatcher.load(self.streamer.frame(), &section.entities);

        let Some(scene) = self.streamer.builder().scene(handle) else {
            log::warn!("Live scene {} missing from builder", handle.raw());
            return;
        };
        for (id, volume) in &scene.entity_volumes {
            self.tracker.register(VolumeKey::Entity(id.clone()), volume.clone());
        }
        for (index, volume) in scene.trigger_volumes.iter().enumerate() {
            self.tracker
                .register(VolumeKey::Exit(TriggerId::new(handle, index)), volume.clone());
        }
    }

    /// Section streamer
    pub fn streamer(&self) -> &SectionStreamer<R, HeadlessScene, G> {
        &self.streamer
    }

    /// Event dispatcher for the live section
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
