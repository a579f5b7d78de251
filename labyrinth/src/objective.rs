use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::InvalidArgument;

/// The treasures hidden in the maze.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Object {
    Bat,
    Book,
    Candlestick,
    Crown,
    Dragon,
    Emerald,
    Fairy,
    Genie,
    Ghost,
    Helmet,
    Keys,
    Lizard,
    Map,
    Moth,
    MoneyBag,
    Mouse,
    Owl,
    Ring,
    Scarab,
    Skull,
    Sorceress,
    Spider,
    Sword,
    TreasureChest,
}

/// Every [`Object`], each exactly once.
pub static ALL_OBJECTS: [Object; 24] = [
    Object::Bat,
    Object::Book,
    Object::Candlestick,
    Object::Crown,
    Object::Dragon,
    Object::Emerald,
    Object::Fairy,
    Object::Genie,
    Object::Ghost,
    Object::Helmet,
    Object::Keys,
    Object::Lizard,
    Object::Map,
    Object::Moth,
    Object::MoneyBag,
    Object::Mouse,
    Object::Owl,
    Object::Ring,
    Object::Scarab,
    Object::Skull,
    Object::Sorceress,
    Object::Spider,
    Object::Sword,
    Object::TreasureChest,
];

/// A card naming one object a player has to reach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveCard {
    pub object: Object,
    pub turned_over: bool,
}

impl ObjectiveCard {
    pub fn new(object: Object) -> Self {
        Self {
            object,
            turned_over: false,
        }
    }
}

/// The pile of objective cards of one player, in the order they must be found.
///
/// The current card is the first one that has not been turned over yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectivesDeck {
    cards: Vec<ObjectiveCard>,
}

impl ObjectivesDeck {
    /// Creates a deck with all cards face down (not turned over).
    ///
    /// Fails when there are no cards, or an object appears twice.
    pub fn new(objects: impl IntoIterator<Item = Object>) -> Result<Self, InvalidArgument> {
        let mut seen = BTreeSet::new();
        let mut cards = Vec::new();
        for object in objects {
            if !seen.insert(object) {
                return Err(InvalidArgument::DuplicateObjective { object });
            }
            cards.push(ObjectiveCard::new(object));
        }
        if cards.is_empty() {
            return Err(InvalidArgument::EmptyObjectivesDeck);
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[ObjectiveCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the first card that is not turned over, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.cards.iter().position(|card| !card.turned_over)
    }

    pub fn current_card(&self) -> Option<&ObjectiveCard> {
        self.current_index().map(|idx| &self.cards[idx])
    }

    pub fn get(&self, idx: usize) -> Option<&ObjectiveCard> {
        self.cards.get(idx)
    }

    /// Turns the card at `idx` over. Returns `false` if there is no such card.
    pub(crate) fn turn_over(&mut self, idx: usize) -> bool {
        match self.cards.get_mut(idx) {
            Some(card) => {
                card.turned_over = true;
                true
            }
            None => false,
        }
    }

    pub fn num_turned_over(&self) -> usize {
        self.cards.iter().filter(|card| card.turned_over).count()
    }

    pub fn are_all_cards_turned_over(&self) -> bool {
        self.cards.iter().all(|card| card.turned_over)
    }
}
