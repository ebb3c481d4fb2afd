use ratatui::widgets::ListState;

use crate::domain::MovieRecord;
use crate::session::SearchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Movies,
    Detail,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Movies => ActivePane::Detail,
            ActivePane::Detail => ActivePane::Movies,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub active_pane: ActivePane,
    /// Latest state published by the search session
    pub state: SearchState,
    pub movie_index: usize,
    pub detail_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub maximized: bool,
    pub movie_list_state: ListState,
    /// Search text being typed, `Some` while the search prompt is open
    pub search_input: Option<String>,
}

impl TuiApp {
    pub fn new(state: SearchState) -> Self {
        let mut movie_list_state = ListState::default();
        movie_list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Movies,
            state,
            movie_index: 0,
            detail_scroll: 0,
            should_quit: false,
            status_message: None,
            maximized: false,
            movie_list_state,
            search_input: None,
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.state.movies
    }

    pub fn selected_movie(&self) -> Option<&MovieRecord> {
        self.state.movies.get(self.movie_index)
    }

    /// Replace the shown state, keeping the selection on the same movie
    /// when it is still listed.
    pub fn apply_state(&mut self, state: SearchState) {
        let selected_id = self.selected_movie().map(|m| m.id);
        let list_changed = state.applied_seq != self.state.applied_seq;
        self.state = state;

        let index = if list_changed {
            0
        } else {
            selected_id
                .and_then(|id| self.state.movies.iter().position(|m| m.id == id))
                .unwrap_or(self.movie_index)
        };
        self.select(index.min(self.state.movies.len().saturating_sub(1)));
    }

    fn select(&mut self, index: usize) {
        if index != self.movie_index {
            self.detail_scroll = 0;
        }
        self.movie_index = index;
        self.movie_list_state.select(Some(index));
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Movies => self.select(self.movie_index.saturating_sub(1)),
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Movies => {
                let max_index = self.state.movies.len().saturating_sub(1);
                self.select((self.movie_index + 1).min(max_index));
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }

    pub fn next_page(&mut self) {
        match self.active_pane {
            ActivePane::Movies => {
                let max_index = self.state.movies.len().saturating_sub(1);
                self.select((self.movie_index + PAGE_SIZE).min(max_index));
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(PAGE_SIZE as u16);
            }
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_pane {
            ActivePane::Movies => self.select(self.movie_index.saturating_sub(PAGE_SIZE)),
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(PAGE_SIZE as u16);
            }
        }
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
        if self.maximized {
            self.active_pane = ActivePane::Detail;
        }
    }

    pub fn open_search(&mut self) {
        self.search_input = Some(String::new());
    }

    /// Close the prompt and return the trimmed term, if any was typed.
    pub fn submit_search(&mut self) -> Option<String> {
        let term = self.search_input.take()?;
        let term = term.trim();
        (!term.is_empty()).then(|| term.to_string())
    }

    /// Close the prompt without searching. Returns true when the shown
    /// results are for a term other than `default_term` and should reset.
    pub fn cancel_search(&mut self, default_term: &str) -> bool {
        self.search_input = None;
        self.state.term != default_term
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
