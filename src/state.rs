//! Global mutable game state.
//!
//! One aggregate owned by the engine for the lifetime of a playthrough.
//! Scene code reads it freely (guards, draw hooks) but mutates it only
//! through the engine's public mutators, which keep the invariants (inventory
//! uniqueness, monotonic score) and fire the audio hooks.

use crate::geometry::Direction;
use indexmap::IndexMap;
use std::fmt;

/// Interaction verbs selectable from the UI surface. Typed commands use
/// dictionary groups instead; these cover click-driven interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verb {
    #[default]
    Walk,
    Look,
    Get,
    Use,
    Talk,
    Open,
    Close,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Walk => "walk",
            Verb::Look => "look",
            Verb::Get => "get",
            Verb::Use => "use",
            Verb::Talk => "talk",
            Verb::Open => "open",
            Verb::Close => "close",
        }
    }

    /// Resolve a UI verb name ("look", "use", ...) back to a verb.
    pub fn from_name(name: &str) -> Option<Verb> {
        match name {
            "walk" => Some(Verb::Walk),
            "look" => Some(Verb::Look),
            "get" => Some(Verb::Get),
            "use" => Some(Verb::Use),
            "talk" => Some(Verb::Talk),
            "open" => Some(Verb::Open),
            "close" => Some(Verb::Close),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inventory entry. Ids are unique within the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub current_scene: String,
    pub previous_scene: Option<String>,

    pub actor_x: f32,
    pub actor_y: f32,
    pub facing: Direction,
    pub walk_target: Option<(f32, f32)>,
    pub walking: bool,

    pub inventory: Vec<Item>,
    pub flags: IndexMap<String, bool>,
    pub variables: IndexMap<String, i32>,

    pub score: i32,
    pub max_score: i32,

    pub selected_verb: Verb,
    pub selected_item: Option<String>,

    /// Monotonically increasing tick count. Preserved across restarts.
    pub frame: u64,

    pub dead: bool,
    pub won: bool,
}

impl GameState {
    /// Fresh state with the actor centered in the lower walkable area of a
    /// display `width` x `height`.
    pub fn new(width: u32, height: u32) -> GameState {
        GameState {
            current_scene: String::new(),
            previous_scene: None,
            actor_x: width as f32 / 2.0,
            actor_y: height as f32 * 0.75,
            facing: Direction::default(),
            walk_target: None,
            walking: false,
            inventory: Vec::new(),
            flags: IndexMap::new(),
            variables: IndexMap::new(),
            score: 0,
            max_score: 0,
            selected_verb: Verb::default(),
            selected_item: None,
            frame: 0,
            dead: false,
            won: false,
        }
    }

    /// Absent flags read as false.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Absent variables read as 0.
    pub fn var(&self, name: &str) -> i32 {
        self.variables.get(name).copied().unwrap_or(0)
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id == id)
    }
}
