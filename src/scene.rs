//! Scene definitions: hotspots, exits and the scene trait.
//!
//! A scene is an immutable definition registered once before play. Exits
//! carry target scene ids, never references, so scenes that point at each
//! other never form a reference cycle. Every optional hook is a default
//! trait method, so a scene overrides exactly the capabilities it has; the
//! engine dispatches through the vtable without probing.

use crate::engine::Engine;
use crate::frame::FrameBuffer;
use crate::geometry::{Direction, Rect};
use crate::parser::ParseResult;
use crate::render::Prop;
use crate::state::{GameState, Verb};

/// A named rectangular interactive region. The first hotspot containing a
/// click, in declaration order, wins.
#[derive(Debug, Clone)]
pub struct Hotspot {
    pub id: String,
    pub rect: Rect,
    pub name: String,
    pub description: Option<String>,
}

impl Hotspot {
    pub fn new(id: &str, rect: Rect, name: &str) -> Hotspot {
        Hotspot {
            id: id.to_string(),
            rect,
            name: name.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Hotspot {
        self.description = Some(description.to_string());
        self
    }
}

/// A travel trigger. When the actor arrives inside `trigger`, the engine
/// changes to `target` if the guard passes or is absent.
#[derive(Debug, Clone)]
pub struct Exit {
    pub trigger: Rect,
    pub target: String,
    pub entry: Option<(f32, f32)>,
    pub entry_facing: Option<Direction>,
    pub guard: Option<fn(&GameState) -> bool>,
    /// Shown when the guard rejects travel; a generic refusal otherwise.
    pub blocked_message: Option<String>,
}

impl Exit {
    pub fn new(trigger: Rect, target: &str) -> Exit {
        Exit {
            trigger,
            target: target.to_string(),
            entry: None,
            entry_facing: None,
            guard: None,
            blocked_message: None,
        }
    }

    pub fn with_entry(mut self, x: f32, y: f32, facing: Direction) -> Exit {
        self.entry = Some((x, y));
        self.entry_facing = Some(facing);
        self
    }

    pub fn with_guard(mut self, guard: fn(&GameState) -> bool) -> Exit {
        self.guard = Some(guard);
        self
    }

    pub fn with_blocked_message(mut self, message: &str) -> Exit {
        self.blocked_message = Some(message.to_string());
        self
    }
}

/// An immutable scene definition. Hooks receive the engine so every mutation
/// goes through its public mutators; there is no hidden shared state.
pub trait Scene {
    fn name(&self) -> &str;

    /// Walkable area; `None` uses the engine's configured default.
    fn walk_bounds(&self) -> Option<Rect> {
        None
    }

    /// Respawn position applied when restarting in this scene after death.
    fn safe_spawn(&self) -> Option<(f32, f32)> {
        None
    }

    fn hotspots(&self) -> &[Hotspot] {
        &[]
    }

    fn exits(&self) -> &[Exit] {
        &[]
    }

    /// Suppress the actor pass (title cards, close-ups).
    fn hide_actor(&self) -> bool {
        false
    }

    /// Runs after the engine has switched to this scene, before the incoming
    /// frame renders.
    fn on_enter(&self, _engine: &mut Engine) {}

    /// Click-driven interaction with a hotspot. Return true when handled;
    /// false falls back to the engine defaults.
    fn on_interact(&self, _engine: &mut Engine, _verb: Verb, _hotspot: &Hotspot) -> bool {
        false
    }

    /// Typed-command interaction. Return true when handled; false falls back
    /// to the engine defaults.
    fn on_parser(&self, _engine: &mut Engine, _input: &ParseResult) -> bool {
        false
    }

    /// Background pass: paint the full frame.
    fn draw(&self, _frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {}

    /// Sprites for the band-ordered pass between background and foreground.
    fn props(&self, _state: &GameState, _tick: u64) -> Vec<Prop> {
        Vec::new()
    }

    /// Foreground pass: runs after the actor is composited.
    fn draw_foreground(&self, _frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {}
}
