//! Scene registry and interaction state machine.
//!
//! The engine owns the game state, the scene registry, the parser, the
//! priority table and the dissolve transition, and routes every input intent
//! (click, verb selection, typed command) to the active scene's hooks. Scene
//! hooks receive the engine itself, so all mutation flows through the public
//! mutators here.
//!
//! Everything is single-threaded and frame-driven: `tick` runs once per
//! display refresh and is never re-entrant. Waiting is always state plus a
//! later tick check, never a blocking sleep.

use crate::audio::{AudioSink, NullAudio, SoundEvent};
use crate::config::EngineConfig;
use crate::dictionary::{groups, Dictionary};
use crate::dissolve::DissolveTransition;
use crate::error::EngineError;
use crate::frame::FrameBuffer;
use crate::geometry::{Direction, Rect};
use crate::parser::TextParser;
use crate::priority::PriorityTable;
use crate::render::{composite, entry_for_prop, ActorView, DrawEntry};
use crate::scene::{Hotspot, Scene};
use crate::state::{GameState, Item, Verb};
use crate::timer::TimerQueue;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::rc::Rc;

/// The single timed message slot. Last write wins.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub expires_at: u64,
}

/// A modal dialog. The dismiss callback fires at most once; dismissing an
/// already-dismissed dialog is a no-op.
pub struct Dialog {
    speaker: Option<String>,
    text: String,
    on_dismiss: Option<Box<dyn FnOnce(&mut Engine)>>,
}

impl Dialog {
    pub fn speaker(&self) -> Option<&str> {
        self.speaker.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub struct Engine {
    config: EngineConfig,
    state: GameState,
    scenes: IndexMap<String, Rc<dyn Scene>>,
    parser: TextParser,
    priority: PriorityTable,
    dissolve: DissolveTransition,
    frame: FrameBuffer,
    timers: TimerQueue,
    audio: Box<dyn AudioSink>,
    actor_view: Option<Box<dyn ActorView>>,
    message: Option<Message>,
    dialog: Option<Dialog>,
    snapshot: Option<GameState>,
    death_message: Option<String>,
    win_message: Option<String>,
    started: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Engine, EngineError> {
        config.validate()?;
        let priority = PriorityTable::new(config.display_height, config.horizon_row);
        let dissolve = DissolveTransition::new(
            config.display_width,
            config.display_height,
            config.reveal_rate,
        );
        let frame = FrameBuffer::new(config.display_width, config.display_height);
        let state = GameState::new(config.display_width, config.display_height);
        Ok(Engine {
            config,
            state,
            scenes: IndexMap::new(),
            parser: TextParser::default(),
            priority,
            dissolve,
            frame,
            timers: TimerQueue::new(),
            audio: Box::new(NullAudio),
            actor_view: None,
            message: None,
            dialog: None,
            snapshot: None,
            death_message: None,
            win_message: None,
            started: false,
        })
    }

    // -- wiring, before start --

    /// Replace the built-in vocabulary.
    pub fn set_dictionary(&mut self, dictionary: Dictionary) {
        self.parser = TextParser::new(dictionary);
    }

    pub fn set_audio(&mut self, audio: Box<dyn AudioSink>) {
        self.audio = audio;
    }

    pub fn set_actor_view(&mut self, view: Box<dyn ActorView>) {
        self.actor_view = Some(view);
    }

    pub fn set_max_score(&mut self, max_score: i32) {
        self.state.max_score = max_score;
    }

    /// Register a scene under a unique id. Registration happens once, before
    /// play; a duplicate id is a startup programming error and is fatal.
    pub fn register_scene(
        &mut self,
        id: &str,
        scene: impl Scene + 'static,
    ) -> Result<(), EngineError> {
        if self.scenes.contains_key(id) {
            return Err(EngineError::DuplicateScene(id.to_string()));
        }
        debug!("scene \"{}\" registered", id);
        self.scenes.insert(id.to_string(), Rc::new(scene));
        Ok(())
    }

    /// Enter the first scene and take the restart snapshot. The snapshot is
    /// taken after the enter-hook completes, so whatever the hook set up is
    /// part of the restored baseline.
    pub fn start(&mut self, initial: &str) -> Result<(), EngineError> {
        if !self.scenes.contains_key(initial) {
            return Err(EngineError::UnknownScene(initial.to_string()));
        }
        self.state.current_scene = initial.to_string();
        self.started = true;
        info!("starting in scene \"{}\"", initial);
        if let Some(scene) = self.current_scene_rc() {
            scene.on_enter(self);
        }
        self.snapshot = Some(self.state.clone());
        self.render_scene();
        Ok(())
    }

    // -- accessors --

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The live composited frame: the authoritative display contents.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn priority(&self) -> &PriorityTable {
        &self.priority
    }

    pub fn parser(&self) -> &TextParser {
        &self.parser
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dissolve_active(&self) -> bool {
        self.dissolve.active()
    }

    pub fn death_message(&self) -> Option<&str> {
        self.death_message.as_deref()
    }

    pub fn win_message(&self) -> Option<&str> {
        self.win_message.as_deref()
    }

    pub fn scene(&self, id: &str) -> Option<Rc<dyn Scene>> {
        self.scenes.get(id).cloned()
    }

    fn current_scene_rc(&self) -> Option<Rc<dyn Scene>> {
        self.scenes.get(&self.state.current_scene).cloned()
    }

    /// Positional match against the most recent typed command.
    pub fn said(&self, expected: &[u16]) -> bool {
        self.parser.said(expected)
    }

    /// Topmost hotspot of the active scene under a point, for UI hover text.
    pub fn hotspot_at(&self, x: i32, y: i32) -> Option<Hotspot> {
        let scene = self.current_scene_rc()?;
        scene
            .hotspots()
            .iter()
            .find(|h| h.rect.contains(x, y))
            .cloned()
    }

    // -- frame loop --

    /// One frame of the cooperative loop: deferred tasks, actor motion, then
    /// either the dissolve step or the normal three-pass render. While a
    /// dissolve is in flight it is the only thing painting the live frame.
    pub fn tick(&mut self) {
        if !self.started {
            return;
        }
        self.state.frame += 1;
        self.run_deferred();
        self.update_walk();
        if self.dissolve.active() {
            self.dissolve.step(&mut self.frame);
        } else {
            self.render_scene();
        }
        if let Some(message) = &self.message {
            if self.state.frame >= message.expires_at {
                self.message = None;
            }
        }
    }

    fn run_deferred(&mut self) {
        let due = self.timers.take_due(self.state.frame);
        for task in due {
            // A task earlier in this batch may have changed the scene;
            // session stamps keep its stale successors from firing.
            if task.session == self.timers.session() {
                (task.task)(self);
            }
        }
    }

    fn update_walk(&mut self) {
        if !self.state.walking || self.state.dead || self.state.won {
            return;
        }
        let Some((tx, ty)) = self.state.walk_target else {
            self.state.walking = false;
            return;
        };
        let dx = tx - self.state.actor_x;
        let dy = ty - self.state.actor_y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < self.config.arrive_radius {
            self.state.actor_x = tx;
            self.state.actor_y = ty;
            self.state.walking = false;
            self.state.walk_target = None;
            self.check_exits();
            return;
        }
        let speed = self.config.walk_speed;
        self.state.actor_x += dx / dist * speed;
        self.state.actor_y += dy / dist * speed;
        if self.state.frame % self.config.footstep_interval == 0 {
            self.audio.play(SoundEvent::Footstep);
        }
    }

    /// Scan exits in registration order; travel through the first whose
    /// trigger contains the actor and whose guard passes or is absent. If
    /// triggers matched but every guard rejected, surface exactly one
    /// message.
    fn check_exits(&mut self) {
        let Some(scene) = self.current_scene_rc() else {
            return;
        };
        let (px, py) = (self.state.actor_x, self.state.actor_y);
        let mut blocked: Option<String> = None;
        for exit in scene.exits() {
            if !exit.trigger.contains_f(px, py) {
                continue;
            }
            if let Some(guard) = exit.guard {
                if !guard(&self.state) {
                    if blocked.is_none() {
                        blocked = Some(exit.blocked_message.clone().unwrap_or_else(|| {
                            "You can't go that way.".to_string()
                        }));
                    }
                    continue;
                }
            }
            self.change_scene(&exit.target, exit.entry, exit.entry_facing);
            return;
        }
        if let Some(message) = blocked {
            self.show_message(&message);
        }
    }

    fn render_scene(&mut self) {
        let tick = self.state.frame;
        let Some(scene) = self.current_scene_rc() else {
            self.frame.fill(0);
            return;
        };
        scene.draw(&mut self.frame, &self.state, tick);
        let mut entries: Vec<DrawEntry> = scene
            .props(&self.state, tick)
            .into_iter()
            .map(|prop| entry_for_prop(&self.priority, prop))
            .collect();
        if !scene.hide_actor() {
            if let Some(view) = &self.actor_view {
                let cel = view.cel(self.state.facing, tick, self.state.walking);
                entries.push(DrawEntry {
                    cel,
                    x: self.state.actor_x as i32,
                    y: self.state.actor_y as i32,
                    band: self.priority.band_for_y(self.state.actor_y as i32),
                });
            }
        }
        composite(&mut self.frame, entries);
        scene.draw_foreground(&mut self.frame, &self.state, tick);
    }

    // -- scene changes --

    /// Change to a registered scene with a dissolve. An unregistered target
    /// is a recoverable content error: diagnostic message, no transition.
    /// A change requested while a dissolve is in flight is dropped.
    pub fn change_scene(
        &mut self,
        target: &str,
        entry: Option<(f32, f32)>,
        facing: Option<Direction>,
    ) {
        if self.dissolve.active() {
            debug!("change_scene(\"{}\") dropped: dissolve in flight", target);
            return;
        }
        if !self.scenes.contains_key(target) {
            warn!("change_scene to unregistered scene \"{}\"", target);
            self.show_message(&format!("[missing scene \"{}\"]", target));
            return;
        }
        debug!(
            "scene change \"{}\" -> \"{}\"",
            self.state.current_scene, target
        );
        let old = self.frame.clone();
        self.timers.cancel_all();
        self.state.previous_scene = Some(self.state.current_scene.clone());
        self.state.current_scene = target.to_string();
        if let Some((x, y)) = entry {
            self.state.actor_x = x;
            self.state.actor_y = y;
        }
        if let Some(facing) = facing {
            self.state.facing = facing;
        }
        self.state.walking = false;
        self.state.walk_target = None;
        if let Some(scene) = self.current_scene_rc() {
            scene.on_enter(self);
        }
        // The enter-hook may itself have changed the scene; its transition
        // is already in flight and this one yields to it.
        if self.dissolve.active() {
            return;
        }
        self.render_scene();
        let new = self.frame.clone();
        self.frame.copy_from(&old);
        self.dissolve.start(old, new);
        self.audio.play(SoundEvent::RoomTransition);
    }

    // -- input surface --

    /// A click in logical display coordinates. Dismisses an open dialog
    /// first; otherwise resolves against hotspots or walks to the point.
    pub fn handle_click(&mut self, x: i32, y: i32) {
        if self.state.dead || self.state.won || self.dissolve.active() {
            return;
        }
        if self.dialog.is_some() {
            self.dismiss_dialog();
            return;
        }
        let Some(scene) = self.current_scene_rc() else {
            return;
        };
        let verb = self.state.selected_verb;
        let hit = scene.hotspots().iter().find(|h| h.rect.contains(x, y));
        if let Some(hotspot) = hit {
            if verb != Verb::Walk {
                if !scene.on_interact(self, verb, hotspot) {
                    self.default_interact(verb, hotspot);
                }
                return;
            }
        }
        self.walk_to(x as f32, y as f32);
    }

    fn default_interact(&mut self, verb: Verb, hotspot: &Hotspot) {
        match verb {
            Verb::Look => {
                let text = match &hotspot.description {
                    Some(description) => description.clone(),
                    None => format!("You see {}.", hotspot.name),
                };
                self.show_message(&text);
            }
            _ => self.show_message(&format!("You can't {} that.", verb)),
        }
    }

    pub fn handle_verb_select(&mut self, verb: Verb) {
        if self.state.dead || self.state.won {
            return;
        }
        self.state.selected_verb = verb;
        self.state.selected_item = None;
    }

    /// Arm the Use verb with an inventory item.
    pub fn select_item(&mut self, id: &str) {
        if self.state.dead || self.state.won {
            return;
        }
        let Some(item) = self.state.item(id) else {
            debug!("select_item(\"{}\"): not in inventory", id);
            return;
        };
        let name = item.name.clone();
        self.state.selected_item = Some(id.to_string());
        self.state.selected_verb = Verb::Use;
        self.show_message(&format!("Using: {}", name));
    }

    /// A typed command. Parser failures are always recoverable and never
    /// alter game state.
    pub fn handle_command(&mut self, text: &str) {
        if self.state.dead || self.state.won || self.dissolve.active() {
            return;
        }
        let result = self.parser.parse(text);
        if !result.ok {
            match &result.unknown {
                Some(word) => {
                    self.show_message(&format!("I don't understand \"{}\".", word))
                }
                None => self.show_message("I don't understand that."),
            }
            self.audio.play(SoundEvent::Error);
            return;
        }

        // Engine-global commands.
        if result.said(&[groups::INVENTORY]) {
            let text = if self.state.inventory.is_empty() {
                "You aren't carrying anything.".to_string()
            } else {
                let names: Vec<&str> =
                    self.state.inventory.iter().map(|i| i.name.as_str()).collect();
                format!("You are carrying: {}.", names.join(", "))
            };
            self.show_message(&text);
            return;
        }
        if result.said(&[groups::HELP]) {
            self.show_message(
                "Type commands like: look desk, get gun, talk captain, open door, use key on door",
            );
            return;
        }
        if result.said(&[groups::SAVE]) {
            self.show_message("Game saved... just kidding.");
            return;
        }

        // Bare "look" describes the scene from its hotspots.
        if result.verb() == Some(groups::LOOK) && result.noun().is_none() {
            if let Some(scene) = self.current_scene_rc() {
                let names: Vec<&str> =
                    scene.hotspots().iter().map(|h| h.name.as_str()).collect();
                let text = if names.is_empty() {
                    format!("You are in: {}.", scene.name())
                } else {
                    format!("You are in: {}. You can see: {}.", scene.name(), names.join(", "))
                };
                let ticks = self.config.message_ticks * 3 / 2;
                self.show_message_for(&text, ticks);
            }
            return;
        }

        if let Some(scene) = self.current_scene_rc() {
            if scene.on_parser(self, &result) {
                return;
            }
        }

        // Engine-wide default responses.
        let text = match result.verb() {
            Some(groups::LOOK) => "You don't see anything special.",
            Some(groups::GET) => "You can't take that.",
            Some(groups::GO) => "You can't go that way.",
            _ => "Nothing happens.",
        };
        self.show_message(text);
    }

    /// Send the actor toward a point, clamped into the scene's walk bounds.
    pub fn walk_to(&mut self, x: f32, y: f32) {
        if self.state.dead || self.state.won {
            return;
        }
        let bounds = self
            .current_scene_rc()
            .and_then(|s| s.walk_bounds())
            .unwrap_or_else(|| self.default_walk_bounds());
        let (tx, ty) = bounds.clamp(x, y);
        self.state.facing =
            Direction::from_delta(tx - self.state.actor_x, ty - self.state.actor_y);
        self.state.walk_target = Some((tx, ty));
        self.state.walking = true;
    }

    fn default_walk_bounds(&self) -> Rect {
        let w = self.config.display_width as i32;
        let h = self.config.display_height as i32;
        Rect::new(w / 32, h / 2, w - w / 16, h * 9 / 20)
    }

    // -- inventory --

    /// Add an item; a duplicate id is a defensive no-op, not an error.
    /// Returns whether the item was added.
    pub fn add_item(&mut self, id: &str, name: &str, icon: &str, description: &str) -> bool {
        if self.state.has_item(id) {
            debug!("add_item(\"{}\"): already held", id);
            return false;
        }
        self.state.inventory.push(Item {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        });
        self.audio.play(SoundEvent::ItemPickup);
        true
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.state.has_item(id)
    }

    pub fn remove_item(&mut self, id: &str) {
        self.state.inventory.retain(|i| i.id != id);
        if self.state.selected_item.as_deref() == Some(id) {
            self.state.selected_item = None;
        }
    }

    // -- flags, variables, score --

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.state.flags.insert(name.to_string(), value);
    }

    pub fn flag(&self, name: &str) -> bool {
        self.state.flag(name)
    }

    pub fn set_var(&mut self, name: &str, value: i32) {
        self.state.variables.insert(name.to_string(), value);
    }

    pub fn var(&self, name: &str) -> i32 {
        self.state.var(name)
    }

    /// Monotonic score increment. Not clamped against `max_score`; a total
    /// beyond the advertised maximum is a content bug, logged but not masked.
    pub fn add_score(&mut self, points: i32) {
        self.state.score += points;
        if self.state.max_score > 0 && self.state.score > self.state.max_score {
            debug!(
                "score {} exceeds max_score {}",
                self.state.score, self.state.max_score
            );
        }
        self.audio.play(SoundEvent::ScorePoint);
    }

    // -- messages, dialog, sound --

    pub fn show_message(&mut self, text: &str) {
        self.show_message_for(text, self.config.message_ticks);
    }

    pub fn show_message_for(&mut self, text: &str, ticks: u64) {
        self.message = Some(Message {
            text: text.to_string(),
            expires_at: self.state.frame + ticks,
        });
    }

    pub fn show_dialog(&mut self, speaker: Option<&str>, text: &str) {
        // Replacing a dialog drops the old callback without firing it.
        self.dialog = Some(Dialog {
            speaker: speaker.map(|s| s.to_string()),
            text: text.to_string(),
            on_dismiss: None,
        });
    }

    pub fn show_dialog_then<F>(&mut self, speaker: Option<&str>, text: &str, on_dismiss: F)
    where
        F: FnOnce(&mut Engine) + 'static,
    {
        self.dialog = Some(Dialog {
            speaker: speaker.map(|s| s.to_string()),
            text: text.to_string(),
            on_dismiss: Some(Box::new(on_dismiss)),
        });
    }

    /// Close the dialog, firing its callback at most once.
    pub fn dismiss_dialog(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            if let Some(callback) = dialog.on_dismiss {
                callback(self);
            }
        }
    }

    /// Fire a named sound moment through the audio hook.
    pub fn play_sound(&mut self, event: SoundEvent) {
        self.audio.play(event);
    }

    /// Schedule a task for `delay` ticks from now. The queue is cancelled
    /// wholesale on scene change, death and restart.
    pub fn after<F>(&mut self, delay: u64, task: F)
    where
        F: FnOnce(&mut Engine) + 'static,
    {
        self.timers.schedule(self.state.frame + delay, Box::new(task));
    }

    // -- death, victory, restart --

    pub fn die(&mut self, message: &str) {
        if self.state.dead {
            return;
        }
        info!("death: {}", message);
        self.state.dead = true;
        self.state.walking = false;
        self.state.walk_target = None;
        self.timers.cancel_all();
        self.death_message = Some(message.to_string());
        self.audio.play(SoundEvent::Death);
    }

    pub fn win(&mut self, message: &str) {
        if self.state.won {
            return;
        }
        info!("victory: {}", message);
        self.state.won = true;
        self.state.walking = false;
        self.state.walk_target = None;
        self.timers.cancel_all();
        self.win_message = Some(message.to_string());
        self.audio.play(SoundEvent::Victory);
    }

    /// Restore the post-first-entry snapshot, keeping the tick counter
    /// monotonic, and respawn at the scene's safe position if it names one.
    pub fn restart(&mut self) {
        let tick = self.state.frame;
        if let Some(snapshot) = self.snapshot.clone() {
            self.state = snapshot;
            self.state.frame = tick;
        }
        self.state.dead = false;
        self.state.won = false;
        self.state.walking = false;
        self.state.walk_target = None;
        self.timers.cancel_all();
        self.dissolve.cancel();
        self.message = None;
        self.dialog = None;
        self.death_message = None;
        self.win_message = None;
        if let Some(scene) = self.current_scene_rc() {
            if let Some((x, y)) = scene.safe_spawn() {
                self.state.actor_x = x;
                self.state.actor_y = y;
            }
        }
        self.render_scene();
        info!("restarted in scene \"{}\"", self.state.current_scene);
    }
}
