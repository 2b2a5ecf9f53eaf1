//! Project card gallery: category filter, text search, sorting, counts.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filter value that matches every card.
pub const FILTER_ALL: &str = "all";

/// A project card as rendered in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    /// Value of the card's `data-category` attribute
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl Card {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            tags: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Case-insensitive match on title, tags or description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
            || self.description.to_lowercase().contains(&term)
    }
}

/// Category filter selected by a filter button.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parse a `data-filter` attribute value.
    pub fn parse(value: &str) -> Self {
        if value == FILTER_ALL {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }

    pub fn admits(&self, card: &Card) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => card.category == *category,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str(FILTER_ALL),
            Filter::Category(category) => f.write_str(category),
        }
    }
}

/// Card visibility state for the gallery grid.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    cards: Vec<Card>,
    visible: Vec<bool>,
    active: Filter,
}

impl Gallery {
    /// A gallery with every card visible.
    pub fn new(cards: Vec<Card>) -> Self {
        let visible = vec![true; cards.len()];
        Self {
            cards,
            visible,
            active: Filter::All,
        }
    }

    /// Show the cards admitted by `filter` and hide the rest.
    pub fn apply_filter(&mut self, filter: Filter) -> &[bool] {
        for (card, shown) in self.cards.iter().zip(self.visible.iter_mut()) {
            *shown = filter.admits(card);
        }
        debug!(%filter, visible = self.visible_count(), "Gallery filtered");
        self.active = filter;
        &self.visible
    }

    /// Show the cards matching `term`. An empty term shows all.
    pub fn search(&mut self, term: &str) -> &[bool] {
        for (card, shown) in self.cards.iter().zip(self.visible.iter_mut()) {
            *shown = card.matches(term);
        }
        debug!(term, visible = self.visible_count(), "Gallery searched");
        &self.visible
    }

    /// Card indices in title order. Ties keep their original order.
    pub fn sorted_by_title(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cards.len()).collect();
        order.sort_by_cached_key(|&i| self.cards[i].title.to_lowercase());
        order
    }

    /// Number of cards `filter` would show.
    pub fn count(&self, filter: &Filter) -> usize {
        self.cards.iter().filter(|c| filter.admits(c)).count()
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// The "No Projects Found" placeholder is shown when nothing is visible.
    pub fn shows_empty_state(&self) -> bool {
        self.visible_count() == 0
    }

    pub fn active_filter(&self) -> &Filter {
        &self.active
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Filter button label with its card count appended.
///
/// Labels that already carry a count are returned unchanged.
pub fn filter_label(label: &str, count: usize) -> String {
    let label = label.trim();
    if label.contains('(') {
        label.to_string()
    } else {
        format!("{label} ({count})")
    }
}
