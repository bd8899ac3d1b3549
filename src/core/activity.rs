//! Activity driver
//!
//! Owns the session store, the page navigator, and the capture surfaces of the
//! station on screen. The host UI feeds `Msg`s into `update` and runs the
//! returned `Effect`s, feeding their result back as another `Msg`.

use std::collections::HashMap;

use crate::capture::restore::RestoreRequest;
use crate::capture::{CaptureEvent, CaptureSurface};
use crate::config::PadConfig;
use crate::domain::{Answer, ContextKey, Slot, SlotId};
use crate::mission::catalog::{self, Page, QuestionKind};
use crate::mission::{Countdown, MissionNavigator};
use crate::session::SessionStore;
use crate::session::messages::{AgentMsg, AnswerMsg, ChallengeMsg, Msg, NavMsg, SurfaceMsg};
use crate::slots::SlotCollection;
use crate::slots::handlers::handle_slot_msg;

/// Work the host must run outside `update`
#[derive(Debug)]
pub enum Effect {
    /// Decode snapshots for a surface; feed the result back with `Effect::run`
    Restore { slot: SlotId, request: RestoreRequest },
}

impl Effect {
    /// Run on the tokio blocking pool and produce the follow-up message
    pub async fn run(self) -> Msg {
        match self {
            Effect::Restore { slot, request } => {
                let outcome = request.run().await;
                Msg::surface(slot, SurfaceMsg::RestoreFinished(outcome))
            }
        }
    }
}

pub struct Activity {
    store: SessionStore,
    navigator: MissionNavigator,
    config: PadConfig,
    /// Surfaces of the station on screen, keyed by slot
    surfaces: HashMap<SlotId, CaptureSurface>,
    countdown: Option<Countdown>,
}

impl Activity {
    pub fn new(config: PadConfig) -> Self {
        Self {
            store: SessionStore::new(),
            navigator: MissionNavigator::default(),
            config,
            surfaces: HashMap::new(),
            countdown: None,
        }
    }

    /// Start with the saved configuration
    pub fn load() -> Self {
        Self::new(PadConfig::load())
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn page(&self) -> Page {
        self.navigator.page()
    }

    pub fn navigator(&self) -> &MissionNavigator {
        &self.navigator
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn surface(&self, slot: &SlotId) -> Option<&CaptureSurface> {
        self.surfaces.get(slot)
    }

    /// Slots of the station on screen, in display order
    pub fn slots(&self) -> &[Slot] {
        let Some(station) = self.page().station() else {
            return &[];
        };
        self.store
            .state()
            .layout(&station.context_key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Nav(msg) => self.handle_nav(msg),
            Msg::Slot(msg) => {
                handle_slot_msg(&mut self.store, msg);
                self.sync_surfaces();
            }
            Msg::Surface { slot, msg } => return self.handle_surface(slot, msg),
            Msg::Agent(AgentMsg::SetName(name)) => self.store.set_agent_name(&name),
            Msg::Agent(AgentMsg::Verify) => self.store.verify(),
            Msg::Answer(msg) => self.handle_answer(msg),
            Msg::Challenge(msg) => self.handle_challenge(msg),
            Msg::ResetSession => {
                self.store.reset();
                self.navigator.restart();
                self.activate();
            }
        }
        None
    }

    fn handle_nav(&mut self, msg: NavMsg) {
        let moved = match msg {
            NavMsg::Next => self.navigator.next(self.store.state()),
            NavMsg::Prev => self.navigator.prev(),
            NavMsg::GoTo(page) => self.navigator.go_to(page),
            NavMsg::Restart => self.navigator.restart(),
        };
        if moved.is_some() {
            self.activate();
        }
    }

    /// Set up the page just navigated to
    fn activate(&mut self) {
        self.surfaces.clear();
        self.countdown = None;

        let Some(station) = self.page().station() else {
            return;
        };
        SlotCollection::new(&mut self.store)
            .ensure_layout(&station.context_key(), &station.default_layout());
        self.countdown = Some(Countdown::new(station.challenge_secs));
        self.sync_surfaces();
    }

    /// Mount surfaces for new slots and drop those of removed slots
    fn sync_surfaces(&mut self) {
        let Some(station) = self.page().station() else {
            return;
        };
        let context: ContextKey = station.context_key();
        let state = self.store.state();
        let Some(layout) = state.layout(&context) else {
            return;
        };

        self.surfaces
            .retain(|id, _| layout.iter().any(|slot| &slot.id == id));
        for slot in layout {
            if self.surfaces.contains_key(&slot.id) {
                continue;
            }
            match CaptureSurface::with_config(&self.config, state.capture(&slot.id)) {
                Ok(surface) => {
                    self.surfaces.insert(slot.id.clone(), surface);
                }
                Err(e) => log::error!("Failed to mount surface for {}: {:#}", slot.id, e),
            }
        }
    }

    fn handle_surface(&mut self, slot: SlotId, msg: SurfaceMsg) -> Option<Effect> {
        let Some(surface) = self.surfaces.get_mut(&slot) else {
            log::debug!("No surface mounted for {}", slot);
            return None;
        };
        let event = match msg {
            SurfaceMsg::Pointer { bounds, event } => surface.handle_pointer(&event, &bounds),
            SurfaceMsg::Reset => Some(surface.reset()),
            SurfaceMsg::RestoreFinished(outcome) => surface.finish_restore(outcome),
            SurfaceMsg::Resized(size) => {
                return surface
                    .resize(size)
                    .map(|request| Effect::Restore { slot, request });
            }
        };
        if let Some(CaptureEvent::Captured(snapshot)) = event {
            SlotCollection::new(&mut self.store).record_capture(&slot, snapshot);
        }
        None
    }

    fn handle_answer(&mut self, msg: AnswerMsg) {
        match msg {
            AnswerMsg::Set { key, answer } => {
                if !accepts(&key, &answer) {
                    log::warn!("Ignoring answer {:?} for {}", answer, key);
                    return;
                }
                self.store.set_answer(&key, answer);
            }
            AnswerMsg::ToggleFlag(key) => {
                if !accepts(&key, &Answer::Flag(true)) {
                    log::warn!("Ignoring flag toggle for {}", key);
                    return;
                }
                self.store.toggle_flag(&key);
            }
            AnswerMsg::Rate { key, stars } => {
                if !accepts(&key, &Answer::rating(stars)) {
                    log::warn!("Ignoring rating for {}", key);
                    return;
                }
                self.store.set_rating(&key, stars);
            }
        }
    }

    fn handle_challenge(&mut self, msg: ChallengeMsg) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        match msg {
            ChallengeMsg::Start => {
                countdown.start();
            }
            ChallengeMsg::Tick => {
                if countdown.tick() {
                    log::debug!("Challenge on {:?} finished", self.navigator.page());
                }
            }
        }
    }
}

/// Whether `answer` fits the catalog question `key`; unknown keys accept anything
fn accepts(key: &str, answer: &Answer) -> bool {
    let Some(question) = catalog::find_question(key) else {
        return true;
    };
    match (question.kind, answer) {
        (QuestionKind::Text, Answer::Text(_)) => true,
        (QuestionKind::Choice(options), Answer::Text(value)) => options.contains(&value.as_str()),
        (QuestionKind::Rating, Answer::Rating(_)) => true,
        (QuestionKind::Flag, Answer::Flag(_)) => true,
        _ => false,
    }
}
