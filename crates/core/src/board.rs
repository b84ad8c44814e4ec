use std::convert::Infallible;

use crate::card::{CompanyCard, PanelVisibility};
use crate::company::CompanyRecord;
use crate::render::{render_companies, CardContainer};

/// A card plus the state that belongs to it alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCard {
    card: CompanyCard,
    panel: PanelVisibility,
    image_failed: bool,
}

impl BoardCard {
    pub const fn new(card: CompanyCard) -> Self {
        Self {
            card,
            panel: PanelVisibility::Hidden,
            image_failed: false,
        }
    }

    pub const fn card(&self) -> &CompanyCard {
        &self.card
    }

    pub const fn panel(&self) -> PanelVisibility {
        self.panel
    }

    pub fn toggle(&mut self) -> PanelVisibility {
        self.panel = self.panel.toggled();
        self.panel
    }

    pub fn image_src(&self) -> &str {
        if self.image_failed {
            &self.card.image.placeholder
        } else {
            self.card.image.initial_src()
        }
    }

    pub const fn shows_placeholder(&self) -> bool {
        self.image_failed || self.card.image.src.is_none()
    }

    /// Swaps the image for the placeholder. Returns false when already showing it.
    pub fn fail_image(&mut self) -> bool {
        if self.shows_placeholder() {
            return false;
        }
        self.image_failed = true;
        true
    }

    /// Text a reader would see, with the details only while the panel is open.
    pub fn visible_text(&self) -> Vec<String> {
        let mut lines = vec![self.card.title.clone()];
        lines.extend(self.card.subtitle.clone());
        lines.push(self.card.earnings.clone());
        lines.push(self.card.score_label.clone());
        if self.panel.is_visible() {
            lines.extend(self.card.details.iter().map(|line| line.text()));
        }
        lines
    }
}

/// In-memory card container used by the terminal viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBoard {
    cards: Vec<BoardCard>,
}

impl CardBoard {
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn render(&mut self, companies: &[CompanyRecord]) {
        match render_companies(self, companies) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    pub fn cards(&self) -> &[BoardCard] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&BoardCard> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn toggle(&mut self, index: usize) -> Option<PanelVisibility> {
        self.cards.get_mut(index).map(BoardCard::toggle)
    }

    pub fn fail_image(&mut self, index: usize) -> bool {
        self.cards.get_mut(index).is_some_and(BoardCard::fail_image)
    }

    pub fn visible_text(&self) -> Vec<String> {
        self.cards.iter().flat_map(BoardCard::visible_text).collect()
    }
}

impl CardContainer for CardBoard {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.cards.clear();
        Ok(())
    }

    fn append_card(&mut self, card: CompanyCard) -> Result<(), Infallible> {
        self.cards.push(BoardCard::new(card));
        Ok(())
    }
}
