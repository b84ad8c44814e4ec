use chrono::{DateTime, Local};
use stock_league_core::{BoardCard, CardBoard, PanelVisibility};
use stock_league_tui::cli::Source;
use throbber_widgets_tui::ThrobberState;

use crate::app::actions::LoadedBoard;

pub const LOADING_MESSAGE: &str = "Loading companies...";

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub board: CardBoard,
    pub selected: usize,
    pub loading: bool,
    pub throbber: ThrobberState,
    pub last_loaded: Option<DateTime<Local>>,
    pub status_message: String,
    pub source: Source,
    pub api_label: String,
}

impl App {
    pub fn new(source: Source, api_label: impl Into<String>) -> Self {
        Self {
            running: true,
            show_help: false,
            board: CardBoard::new(),
            selected: 0,
            loading: false,
            throbber: ThrobberState::default(),
            last_loaded: None,
            status_message: String::new(),
            source,
            api_label: api_label.into(),
        }
    }

    /// Marks a load as started. Returns false if one is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.status_message = LOADING_MESSAGE.to_string();
        true
    }

    pub fn finish_load(&mut self, loaded: LoadedBoard) {
        self.loading = false;
        self.last_loaded = Some(Local::now());

        match loaded.companies {
            Ok(companies) => {
                self.board.render(&companies);
                for index in loaded.failed_images {
                    self.board.fail_image(index);
                }
                self.status_message = format!("Loaded {} companies", self.board.len());
            }
            Err(error) => {
                self.board.render(&[]);
                self.status_message = format!("Error: {error}");
            }
        }

        self.selected = self.selected.min(self.board.len().saturating_sub(1));
    }

    /// Advances the throbber while a load is in flight.
    pub fn tick(&mut self) {
        if self.loading {
            self.throbber.calc_next();
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.board.len() {
            self.selected += 1;
        }
    }

    pub fn toggle_selected(&mut self) -> Option<PanelVisibility> {
        self.board.toggle(self.selected)
    }

    pub fn selected_card(&self) -> Option<&BoardCard> {
        self.board.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_league_core::fallback::fallback_companies;
    use stock_league_core::{ApiError, CompanyRecord};

    fn loaded(companies: Vec<CompanyRecord>) -> LoadedBoard {
        LoadedBoard {
            companies: Ok(companies),
            failed_images: Vec::new(),
        }
    }

    fn app_with_cards() -> App {
        let mut app = App::new(Source::Listing, "http://127.0.0.1:5000");
        app.begin_load();
        app.finish_load(loaded(fallback_companies()));
        app
    }

    #[test]
    fn only_one_load_at_a_time() {
        let mut app = App::new(Source::Listing, "");

        assert!(app.begin_load());
        assert!(!app.begin_load());
        assert_eq!(app.status_message, LOADING_MESSAGE);

        app.finish_load(loaded(fallback_companies()));
        assert!(!app.loading);
        assert!(app.last_loaded.is_some());
        assert!(app.begin_load());
    }

    #[test]
    fn selection_stays_within_the_board() {
        let mut app = app_with_cards();

        app.select_previous();
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            app.select_next();
        }
        assert_eq!(app.selected, 4);
    }

    #[test]
    fn toggling_opens_only_the_selected_card() {
        let mut app = app_with_cards();
        app.select_next();

        assert_eq!(app.toggle_selected(), Some(PanelVisibility::Visible));

        let panels = app
            .board
            .cards()
            .iter()
            .map(BoardCard::panel)
            .collect::<Vec<_>>();
        assert_eq!(panels[1], PanelVisibility::Visible);
        assert_eq!(
            panels.iter().filter(|panel| panel.is_visible()).count(),
            1
        );
    }

    #[test]
    fn failed_images_are_applied_after_load() {
        let mut app = App::new(Source::Listing, "");
        app.begin_load();
        app.finish_load(LoadedBoard {
            companies: Ok(vec![CompanyRecord {
                image_url: Some("https://cdn.test/aapl.png".to_string()),
                ..CompanyRecord::new(1, "Apple", "AAPL")
            }]),
            failed_images: vec![0],
        });

        let card = app.selected_card().unwrap();
        assert!(card.shows_placeholder());
        assert_eq!(app.status_message, "Loaded 1 companies");
    }

    #[test]
    fn errors_clear_the_board_and_show_in_the_status() {
        let mut app = app_with_cards();
        app.select_next();
        app.select_next();

        app.begin_load();
        app.finish_load(LoadedBoard {
            companies: Err(ApiError::EmptyListing),
            failed_images: Vec::new(),
        });

        assert!(app.board.is_empty());
        assert_eq!(app.selected, 0);
        assert_eq!(app.status_message, "Error: company listing was empty");
    }
}
