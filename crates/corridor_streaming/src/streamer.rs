//! Section Streamer
//!
//! Keeps exactly one section live and replaces it when the agent crosses an
//! exit trigger. A replacement is fetched first; the live subtree is only
//! destroyed once the new section is in hand, so a missing or broken section
//! leaves the world exactly as it was.

use crate::config::StreamingConfig;
use crate::error::{ConfigError, Result, SelectError, StreamError};
use crate::scene::{SceneBuilder, SceneHandle, TriggerId};
use crate::selector::{AnomalySelector, SectionChoice};
use crate::state::{StreamerPhase, StreamingState};
use corridor_math::SpatialFrame;
use corridor_section::{SectionRepository, SectionSpec};
use rand::rngs::StdRng;
use rand::Rng;

/// Outcome of a completed load
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Section now live
    pub section_id: String,
    /// How the section was chosen
    pub choice: SectionChoice,
    /// World frame of the new section
    pub frame: SpatialFrame,
    /// Pass counter after the transition
    pub pass_counter: u32,
    /// Handle of the new subtree
    pub scene: SceneHandle,
}

/// Streams sections from a repository into a scene builder
pub struct SectionStreamer<R, B, G = StdRng> {
    repository: R,
    builder: B,
    selector: AnomalySelector<G>,
    config: StreamingConfig,
    state: StreamingState,
    phase: StreamerPhase,
    /// Live section data
    section: Option<SectionSpec>,
}

impl<R: SectionRepository, B: SceneBuilder> SectionStreamer<R, B, StdRng> {
    /// Create a streamer, seeding the selector from `config.seed` when set
    pub fn new(config: StreamingConfig, repository: R, builder: B) -> std::result::Result<Self, ConfigError> {
        let selector = match config.seed {
            Some(seed) => AnomalySelector::from_seed(seed),
            None => AnomalySelector::from_entropy(),
        };
        Self::with_selector(config, repository, builder, selector)
    }
}

impl<R: SectionRepository, B: SceneBuilder, G: Rng> SectionStreamer<R, B, G> {
    /// Create a streamer with an explicit selector
    pub fn with_selector(
        config: StreamingConfig,
        repository: R,
        builder: B,
        selector: AnomalySelector<G>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            repository,
            builder,
            selector,
            config,
            state: StreamingState::default(),
            phase: StreamerPhase::Idle,
            section: None,
        })
    }

    /// Load the initial section at the identity frame.
    ///
    /// Failure here is fatal for the session.
    pub fn start(&mut self) -> Result<Transition> {
        if self.phase.is_started() {
            return Err(StreamError::AlreadyStarted);
        }

        let section_id = self.config.initial_section_id.clone();
        let section = self
            .repository
            .fetch(&section_id)
            .map_err(|source| StreamError::InitialSectionMissing {
                section_id: section_id.clone(),
                source,
            })?;

        let transition = self.swap_in(section, SpatialFrame::IDENTITY, SectionChoice::Default);
        log::info!("Streaming started at section '{}'", transition.section_id);
        Ok(transition)
    }

    /// Agent crossed a valid exit: count the pass, roll, and load.
    ///
    /// The pass is counted even when the load fails.
    pub fn on_valid_trigger(&mut self, delta: &SpatialFrame) -> Result<Transition> {
        self.ensure_started()?;
        self.state.pass_counter = self.state.pass_counter.saturating_add(1);
        let choice = self.choose();
        self.transition(delta, choice)
    }

    /// Agent crossed an invalid exit: reset the pass counter and load the default section
    pub fn on_invalid_trigger(&mut self, delta: &SpatialFrame) -> Result<Transition> {
        self.ensure_started()?;
        self.state.pass_counter = 0;
        self.transition(delta, SectionChoice::Default)
    }

    /// Overlap-begin on an exit trigger.
    ///
    /// Returns `Ok(None)` when the signal is ignored: the tag is not the
    /// agent's, or the trigger belongs to a scene that is no longer live.
    pub fn on_exit_trigger_enter(&mut self, trigger: TriggerId, tag: &str) -> Result<Option<Transition>> {
        self.ensure_started()?;

        if tag != self.config.agent_tag {
            log::trace!("Ignoring exit trigger {} entered by '{}'", trigger, tag);
            return Ok(None);
        }
        if self.state.scene != Some(trigger.scene) {
            log::debug!("Ignoring stale exit trigger {}", trigger);
            return Ok(None);
        }

        let (valid, delta) = self
            .section
            .as_ref()
            .and_then(|section| section.trigger(trigger.index))
            .map(|spec| (spec.valid, spec.frame_delta))
            .ok_or(StreamError::UnknownTrigger(trigger))?;

        let transition = if valid {
            self.on_valid_trigger(&delta)?
        } else {
            self.on_invalid_trigger(&delta)?
        };
        Ok(Some(transition))
    }

    fn ensure_started(&self) -> Result<()> {
        if self.phase.is_started() {
            Ok(())
        } else {
            Err(StreamError::NotStarted)
        }
    }

    fn choose(&mut self) -> SectionChoice {
        match self
            .selector
            .select(self.config.anomaly_chance_percent, self.config.anomaly_pool.len())
        {
            Ok(choice) => choice,
            Err(SelectError::NoAnomaliesAvailable) => {
                log::warn!("Anomaly pool is empty, using the default section");
                SectionChoice::Default
            }
            Err(e) => {
                log::warn!("{}, using the default section", e);
                SectionChoice::Default
            }
        }
    }

    /// Section id for `choice`, and the choice actually honoured
    fn resolve(&self, choice: SectionChoice) -> (String, SectionChoice) {
        if let SectionChoice::Anomaly(index) = choice {
            match self.config.anomaly_section(index) {
                Some(id) => return (id.to_string(), choice),
                None => log::error!(
                    "Anomaly index {} outside pool of {}, using the default section",
                    index,
                    self.config.anomaly_pool.len()
                ),
            }
        }
        (self.config.default_section().to_string(), SectionChoice::Default)
    }

    fn transition(&mut self, delta: &SpatialFrame, choice: SectionChoice) -> Result<Transition> {
        let (section_id, choice) = self.resolve(choice);
        self.phase = StreamerPhase::Transitioning;

        let section = match self.repository.fetch(&section_id) {
            Ok(section) => section,
            Err(source) => {
                self.phase = StreamerPhase::Loaded;
                log::warn!(
                    "Section '{}' failed to load, staying in '{}': {}",
                    section_id,
                    self.state.section_id,
                    source
                );
                return Err(StreamError::SectionLoadFailed { section_id, source });
            }
        };

        let frame = self.state.frame.compose(delta);
        let transition = self.swap_in(section, frame, choice);
        log::debug!(
            "Section '{}' live at {:?} (pass {})",
            transition.section_id,
            transition.frame.origin,
            transition.pass_counter
        );
        Ok(transition)
    }

    /// Destroy the live subtree and build `section` at `frame`
    fn swap_in(&mut self, section: SectionSpec, frame: SpatialFrame, choice: SectionChoice) -> Transition {
        if let Some(old) = self.state.scene.take() {
            self.builder.destroy(old);
        }
        let scene = self
            .builder
            .instantiate(&frame, &section.entities, &section.triggers);

        self.state.frame = frame;
        self.state.section_id = section.id.clone();
        self.state.scene = Some(scene);
        self.section = Some(section);
        self.phase = StreamerPhase::Loaded;

        Transition {
            section_id: self.state.section_id.clone(),
            choice,
            frame,
            pass_counter: self.state.pass_counter,
            scene,
        }
    }

    /// Current streaming state
    pub fn state(&self) -> &StreamingState {
        &self.state
    }

    /// Current phase
    pub fn phase(&self) -> StreamerPhase {
        self.phase
    }

    /// World frame of the live section
    pub fn frame(&self) -> &SpatialFrame {
        &self.state.frame
    }

    /// Consecutive valid passes
    pub fn pass_counter(&self) -> u32 {
        self.state.pass_counter
    }

    /// Live section data
    pub fn current_section(&self) -> Option<&SectionSpec> {
        self.section.as_ref()
    }

    /// Live scene handle
    pub fn scene(&self) -> Option<SceneHandle> {
        self.state.scene
    }

    /// Streaming configuration
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Scene builder
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Section repository
    pub fn repository(&self) -> &R {
        &self.repository
    }
}
