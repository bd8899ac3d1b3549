//! Page navigation with entry gates

use crate::mission::catalog::Page;
use crate::session::SessionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionNavigator {
    page: Page,
}

impl Default for MissionNavigator {
    fn default() -> Self {
        Self { page: Page::FIRST }
    }
}

impl MissionNavigator {
    pub fn page(&self) -> Page {
        self.page
    }

    /// Whether the current page lets the agent move on
    ///
    /// The cover needs an agent name, the briefing a verified fingerprint.
    pub fn can_advance(&self, state: &SessionState) -> bool {
        match self.page {
            Page::Cover => !state.agent_name.trim().is_empty(),
            Page::Briefing => state.verified,
            Page::LAST => false,
            _ => true,
        }
    }

    /// Move to the next page; returns the new page if it moved
    pub fn next(&mut self, state: &SessionState) -> Option<Page> {
        if !self.can_advance(state) {
            log::debug!("Staying on {:?}", self.page);
            return None;
        }
        self.go_to(Page::from_index(self.page.index() + 1)?)
    }

    pub fn prev(&mut self) -> Option<Page> {
        let index = self.page.index().checked_sub(1)?;
        self.go_to(Page::from_index(index)?)
    }

    /// Jump to `page` without checking gates
    pub fn go_to(&mut self, page: Page) -> Option<Page> {
        if page == self.page {
            return None;
        }
        log::debug!("Page {:?} -> {:?}", self.page, page);
        self.page = page;
        Some(page)
    }

    /// Back to the cover, keeping collected data
    pub fn restart(&mut self) -> Option<Page> {
        self.go_to(Page::FIRST)
    }

    /// Fraction of the mission covered, 0.0 on the cover to 1.0 on the debrief
    pub fn progress(&self) -> f32 {
        self.page.index() as f32 / Page::LAST.index() as f32
    }

    /// The progress bar is shown between the cover and the debrief
    pub fn shows_progress(&self) -> bool {
        self.page != Page::FIRST && self.page != Page::LAST
    }
}
