//! Chapter reader state machine.
//!
//! Pages are 1-based, chapters are indexed from 0. Navigation never wraps
//! and never fails: a request past either end leaves the state unchanged.
//! Chapter moves skip chapters without pages.

use crate::models::Chapter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("series has no chapters")]
    NoChapters,
    #[error("chapter '{0}' is not part of this series")]
    UnknownChapter(String),
    #[error("chapter '{0}' has no pages")]
    EmptyChapter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderAction {
    PreviousPage,
    NextPage,
    PreviousChapter,
    NextChapter,
    ToggleFullscreen,
    ToggleControls,
}

impl ReaderAction {
    /// Maps a keyboard key name (as reported by a browser or typed on a
    /// terminal) to an action.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::PreviousPage),
            "ArrowRight" | "d" | "D" => Some(Self::NextPage),
            "[" | "p" | "P" => Some(Self::PreviousChapter),
            "]" | "n" | "N" => Some(Self::NextChapter),
            "f" | "F" => Some(Self::ToggleFullscreen),
            "h" | "H" => Some(Self::ToggleControls),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderState {
    page: usize,
    chapter_index: usize,
    /// Page count of every chapter, in reading order.
    page_counts: Vec<usize>,
    fullscreen: bool,
    controls_visible: bool,
}

impl ReaderState {
    /// Opens `chapter_id` within `chapters` (ordered by chapter number).
    /// `page` outside the chapter is clamped into range. Only the requested
    /// chapter has to have pages.
    pub fn open(chapters: &[Chapter], chapter_id: &str, page: usize) -> Result<Self, ReaderError> {
        if chapters.is_empty() {
            return Err(ReaderError::NoChapters);
        }
        let chapter_index = chapters
            .iter()
            .position(|c| c.id == chapter_id)
            .ok_or_else(|| ReaderError::UnknownChapter(chapter_id.to_string()))?;
        if chapters[chapter_index].pages.is_empty() {
            return Err(ReaderError::EmptyChapter(chapter_id.to_string()));
        }

        let page_counts: Vec<usize> = chapters.iter().map(Chapter::page_count).collect();
        let page = page.clamp(1, page_counts[chapter_index]);
        Ok(Self {
            page,
            chapter_index,
            page_counts,
            fullscreen: false,
            controls_visible: true,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_counts[self.chapter_index]
    }

    pub fn chapter_index(&self) -> usize {
        self.chapter_index
    }

    pub fn chapter_count(&self) -> usize {
        self.page_counts.len()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Index of the nearest earlier chapter that has pages.
    pub fn previous_chapter_index(&self) -> Option<usize> {
        (0..self.chapter_index)
            .rev()
            .find(|&i| self.page_counts[i] > 0)
    }

    /// Index of the nearest later chapter that has pages.
    pub fn next_chapter_index(&self) -> Option<usize> {
        (self.chapter_index + 1..self.page_counts.len()).find(|&i| self.page_counts[i] > 0)
    }

    pub fn has_previous_chapter(&self) -> bool {
        self.previous_chapter_index().is_some()
    }

    pub fn has_next_chapter(&self) -> bool {
        self.next_chapter_index().is_some()
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    /// Applies `action` and reports whether anything changed.
    pub fn apply(&mut self, action: ReaderAction) -> bool {
        match action {
            ReaderAction::PreviousPage => {
                if self.page > 1 {
                    self.page -= 1;
                    return true;
                }
                false
            }
            ReaderAction::NextPage => {
                if self.page < self.page_count() {
                    self.page += 1;
                    return true;
                }
                false
            }
            ReaderAction::PreviousChapter => match self.previous_chapter_index() {
                Some(index) => {
                    self.chapter_index = index;
                    self.page = 1;
                    true
                }
                None => false,
            },
            ReaderAction::NextChapter => match self.next_chapter_index() {
                Some(index) => {
                    self.chapter_index = index;
                    self.page = 1;
                    true
                }
                None => false,
            },
            ReaderAction::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                true
            }
            ReaderAction::ToggleControls => {
                self.controls_visible = !self.controls_visible;
                true
            }
        }
    }

    /// Looks up `key` and applies the mapped action. Unmapped keys are
    /// ignored.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match ReaderAction::from_key(key) {
            Some(action) => self.apply(action),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::chapters_for;

    #[test]
    fn test_open_clamps_page() {
        let chapters = chapters_for("1", 3, 20);
        assert_eq!(ReaderState::open(&chapters, "1-ch2", 0).unwrap().page(), 1);
        assert_eq!(ReaderState::open(&chapters, "1-ch2", 99).unwrap().page(), 20);
        assert_eq!(ReaderState::open(&chapters, "1-ch2", 7).unwrap().page(), 7);
    }

    #[test]
    fn test_open_errors() {
        let chapters = chapters_for("1", 2, 5);
        assert_eq!(ReaderState::open(&[], "x", 1), Err(ReaderError::NoChapters));
        assert_eq!(
            ReaderState::open(&chapters, "missing", 1),
            Err(ReaderError::UnknownChapter("missing".into()))
        );

        let mut broken = chapters.clone();
        broken[1].pages.clear();
        assert_eq!(
            ReaderState::open(&broken, "1-ch2", 1),
            Err(ReaderError::EmptyChapter("1-ch2".into()))
        );
    }

    #[test]
    fn test_empty_chapter_does_not_block_others() {
        let mut chapters = chapters_for("1", 20, 5);
        chapters[19].pages.clear();
        let state = ReaderState::open(&chapters, "1-ch1", 1).unwrap();
        assert_eq!(state.page_count(), 5);

        let mut state = ReaderState::open(&chapters, "1-ch19", 1).unwrap();
        assert!(!state.has_next_chapter());
        assert!(!state.apply(ReaderAction::NextChapter));
        assert_eq!(state.chapter_index(), 18);
    }

    #[test]
    fn test_chapter_navigation_skips_empty_chapters() {
        let mut chapters = chapters_for("1", 4, 3);
        chapters[1].pages.clear();
        chapters[2].pages.clear();
        let mut state = ReaderState::open(&chapters, "1-ch1", 2).unwrap();

        assert_eq!(state.next_chapter_index(), Some(3));
        assert!(state.apply(ReaderAction::NextChapter));
        assert_eq!(state.chapter_index(), 3);
        assert_eq!(state.page(), 1);

        assert_eq!(state.previous_chapter_index(), Some(0));
        assert!(state.apply(ReaderAction::PreviousChapter));
        assert_eq!(state.chapter_index(), 0);
    }

    #[test]
    fn test_next_page_at_last_page_is_noop() {
        let chapters = chapters_for("1", 2, 20);
        let mut state = ReaderState::open(&chapters, "1-ch1", 20).unwrap();
        assert!(!state.apply(ReaderAction::NextPage));
        assert_eq!(state.page(), 20);
        assert_eq!(state.chapter_index(), 0);
    }

    #[test]
    fn test_previous_page_at_first_page_is_noop() {
        let chapters = chapters_for("1", 1, 3);
        let mut state = ReaderState::open(&chapters, "1-ch1", 1).unwrap();
        assert!(!state.apply(ReaderAction::PreviousPage));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_previous_chapter_at_first_index_is_noop() {
        let chapters = chapters_for("1", 3, 4);
        let mut state = ReaderState::open(&chapters, "1-ch1", 2).unwrap();
        assert!(!state.apply(ReaderAction::PreviousChapter));
        assert_eq!(state.chapter_index(), 0);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_chapter_navigation_resets_page() {
        let mut chapters = chapters_for("1", 3, 4);
        chapters[2].pages.truncate(2);
        let mut state = ReaderState::open(&chapters, "1-ch2", 3).unwrap();

        assert!(state.apply(ReaderAction::NextChapter));
        assert_eq!(state.chapter_index(), 2);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_count(), 2);
        assert!(!state.apply(ReaderAction::NextChapter));

        assert!(state.apply(ReaderAction::PreviousChapter));
        assert_eq!(state.chapter_index(), 1);
        assert_eq!(state.page_count(), 4);
    }

    #[test]
    fn test_toggles_are_independent() {
        let chapters = chapters_for("1", 1, 3);
        let mut state = ReaderState::open(&chapters, "1-ch1", 1).unwrap();
        assert!(state.controls_visible());
        assert!(!state.is_fullscreen());

        state.apply(ReaderAction::ToggleFullscreen);
        assert!(state.is_fullscreen());
        assert!(state.controls_visible());

        state.apply(ReaderAction::ToggleControls);
        assert!(state.is_fullscreen());
        assert!(!state.controls_visible());
    }

    #[test]
    fn test_key_map() {
        assert_eq!(ReaderAction::from_key("ArrowLeft"), Some(ReaderAction::PreviousPage));
        assert_eq!(ReaderAction::from_key("D"), Some(ReaderAction::NextPage));
        assert_eq!(ReaderAction::from_key("f"), Some(ReaderAction::ToggleFullscreen));
        assert_eq!(ReaderAction::from_key("H"), Some(ReaderAction::ToggleControls));
        assert_eq!(ReaderAction::from_key("]"), Some(ReaderAction::NextChapter));
        assert_eq!(ReaderAction::from_key("x"), None);

        let chapters = chapters_for("1", 1, 3);
        let mut state = ReaderState::open(&chapters, "1-ch1", 1).unwrap();
        assert!(state.handle_key("d"));
        assert_eq!(state.page(), 2);
        assert!(!state.handle_key("q"));
    }
}
