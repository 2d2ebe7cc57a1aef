//! Integration tests for scripted gameplay sequences.
//!
//! These drive the whole core through its public surface the way a frontend
//! would: register scenes, start, feed typed commands and clicks, tick the
//! frame loop, and assert on state, messages and the composited frame.
//!
//! The tests ensure:
//! - Commands route through the parser to scene hooks and engine defaults
//! - Exits, guards and dissolve transitions sequence correctly
//! - Inventory, score and flags change only through the mutators
//! - Death and restart restore the first-entry snapshot
//! - The actor pass respects depth bands in the composited output

use gallivant::config::EngineConfig;
use gallivant::dictionary::groups;
use gallivant::engine::Engine;
use gallivant::frame::FrameBuffer;
use gallivant::geometry::{Direction, Rect};
use gallivant::parser::{ParseResult, WILDCARD};
use gallivant::priority;
use gallivant::render::{ActorView, Cel, Prop};
use gallivant::scene::{Exit, Hotspot, Scene};
use gallivant::state::GameState;
use std::rc::Rc;

fn config() -> EngineConfig {
    EngineConfig {
        display_width: 64,
        display_height: 40,
        horizon_row: 10,
        reveal_rate: 8000,
        walk_speed: 3.0,
        arrive_radius: 2.0,
        message_ticks: 30,
        footstep_interval: 4,
    }
}

fn solid_cel(width: u32, height: u32, color: u8) -> Rc<Cel> {
    let mut cel = Cel::new(width, height, 0);
    for y in 0..height {
        for x in 0..width {
            cel.set(x, y, color);
        }
    }
    Rc::new(cel)
}

struct BlockActor {
    cel: Rc<Cel>,
}

impl ActorView for BlockActor {
    fn cel(&self, _facing: Direction, _frame: u64, _walking: bool) -> Rc<Cel> {
        self.cel.clone()
    }
}

fn settle(engine: &mut Engine) {
    for _ in 0..4000 {
        engine.tick();
        if !engine.state().walking && !engine.dissolve_active() {
            return;
        }
    }
    panic!("engine never settled");
}

// -- patrol scenario scenes --

struct LockerRoom {
    hotspots: Vec<Hotspot>,
    exits: Vec<Exit>,
}

impl LockerRoom {
    fn new() -> LockerRoom {
        LockerRoom {
            hotspots: vec![Hotspot::new(
                "locker",
                Rect::new(4, 12, 10, 14),
                "your locker",
            )
            .with_description("A dented steel locker.")],
            exits: vec![Exit::new(Rect::new(54, 28, 10, 10), "street")
                .with_entry(6.0, 30.0, Direction::Right)
                .with_guard(|state| state.has_item("gun"))
                .with_blocked_message("Never hit the street unarmed.")],
        }
    }
}

impl Scene for LockerRoom {
    fn name(&self) -> &str {
        "Locker Room"
    }

    fn safe_spawn(&self) -> Option<(f32, f32)> {
        Some((10.0, 24.0))
    }

    fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    fn exits(&self) -> &[Exit] {
        &self.exits
    }

    fn on_parser(&self, engine: &mut Engine, input: &ParseResult) -> bool {
        if input.said(&[groups::OPEN, 50]) {
            engine.set_flag("locker_open", true);
            engine.show_message("The locker swings open.");
            return true;
        }
        if input.said(&[groups::GET, 51]) {
            if !engine.flag("locker_open") {
                engine.show_message("It's locked away. Open the locker first.");
            } else if engine.add_item("gun", "service revolver", "G", "Standard issue .38.") {
                engine.add_score(5);
                engine.show_message("You holster the revolver.");
            }
            return true;
        }
        false
    }

    fn draw(&self, frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {
        frame.fill(2);
    }
}

struct Street;

impl Scene for Street {
    fn name(&self) -> &str {
        "Street"
    }

    fn on_enter(&self, engine: &mut Engine) {
        engine.add_score(2);
    }

    fn on_parser(&self, engine: &mut Engine, input: &ParseResult) -> bool {
        if input.said(&[groups::CALL, WILDCARD]) {
            engine.set_flag("radioed", true);
            engine.show_message("You key the radio.");
            return true;
        }
        if input.said(&[groups::SHOOT, WILDCARD]) {
            engine.die("Discharging a firearm downtown ends your career and your story.");
            return true;
        }
        false
    }

    fn draw(&self, frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {
        frame.fill(3);
    }
}

fn patrol_engine() -> Engine {
    let mut engine = Engine::new(config()).unwrap();
    engine.set_max_score(7);
    engine.register_scene("locker_room", LockerRoom::new()).unwrap();
    engine.register_scene("street", Street).unwrap();
    engine
}

#[test]
fn patrol_scenario_end_to_end() {
    let mut engine = patrol_engine();
    engine.start("locker_room").unwrap();
    assert_eq!(engine.state().current_scene, "locker_room");

    // Gun is locked away until the locker is opened.
    engine.handle_command("take the gun");
    assert!(!engine.has_item("gun"));

    engine.handle_command("open locker");
    engine.handle_command("pick up the revolver");
    assert!(engine.has_item("gun"));
    assert_eq!(engine.state().score, 5);

    // Second grab is a defensive no-op.
    engine.handle_command("get gun");
    assert_eq!(engine.state().inventory.len(), 1);
    assert_eq!(engine.state().score, 5);

    // Walk onto the exit trigger; the guard now passes and the dissolve
    // carries us to the street.
    engine.walk_to(58.0, 32.0);
    settle(&mut engine);
    assert_eq!(engine.state().current_scene, "street");
    assert_eq!(engine.state().score, 7);
    assert_eq!(engine.state().actor_x, 6.0);
    assert_eq!(engine.state().facing, Direction::Right);
    assert!(engine
        .frame_buffer()
        .pixels()
        .iter()
        .all(|&p| p == 3));

    // Wildcard command handled by the scene.
    engine.handle_command("call the captain about the suspect");
    assert!(engine.flag("radioed"));

    // Death, then restart back to the post-first-entry snapshot.
    engine.handle_command("shoot gun");
    assert!(engine.state().dead);
    engine.restart();
    assert!(!engine.state().dead);
    assert_eq!(engine.state().current_scene, "locker_room");
    assert!(!engine.has_item("gun"));
    assert_eq!(engine.state().score, 0);
    assert_eq!(engine.state().actor_x, 10.0);
}

#[test]
fn blocked_exit_keeps_the_scene_and_explains_once() {
    let mut engine = patrol_engine();
    engine.start("locker_room").unwrap();
    engine.walk_to(58.0, 32.0);
    settle(&mut engine);
    assert_eq!(engine.state().current_scene, "locker_room");
    assert!(!engine.dissolve_active());
    assert_eq!(
        engine.message().unwrap().text,
        "Never hit the street unarmed."
    );
}

#[test]
fn unknown_words_and_defaults_fall_through() {
    let mut engine = patrol_engine();
    engine.start("locker_room").unwrap();

    engine.handle_command("defenestrate locker");
    assert_eq!(
        engine.message().unwrap().text,
        "I don't understand \"defenestrate\"."
    );

    engine.handle_command("go north");
    assert_eq!(engine.message().unwrap().text, "You can't go that way.");

    engine.handle_command("look");
    assert!(engine.message().unwrap().text.contains("Locker Room"));
}

// -- compositing scenes --

struct PropScene {
    props: Vec<Prop>,
}

impl Scene for PropScene {
    fn name(&self) -> &str {
        "prop stage"
    }

    fn props(&self, _state: &GameState, _tick: u64) -> Vec<Prop> {
        self.props.clone()
    }

    fn draw(&self, frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {
        frame.fill(1);
    }
}

#[test]
fn actor_overdraws_farther_props() {
    let mut engine = Engine::new(config()).unwrap();
    engine.set_actor_view(Box::new(BlockActor {
        cel: solid_cel(4, 6, 5),
    }));
    // A prop anchored higher on the screen sits in a farther band than the
    // actor; where they overlap the actor wins.
    let scene = PropScene {
        props: vec![Prop {
            cel: solid_cel(4, 6, 9),
            x: 32,
            y: 20,
            band: None,
        }],
    };
    engine.register_scene("stage", scene).unwrap();
    engine.start("stage").unwrap();
    engine.walk_to(32.0, 24.0);
    // Position the actor without finishing a walk: teleport via walk target
    // is avoided; instead let the walk run.
    for _ in 0..50 {
        engine.tick();
        if !engine.state().walking {
            break;
        }
    }
    let fb = engine.frame_buffer();
    // Overlap row: prop covers rows 15..=20, actor rows 19..=24 at x 30..34.
    assert_eq!(fb.get(32, 20), Some(5));
    // Non-overlapping prop pixel survives.
    assert_eq!(fb.get(32, 16), Some(9));
}

#[test]
fn foreground_props_occlude_the_actor() {
    let mut engine = Engine::new(config()).unwrap();
    engine.set_actor_view(Box::new(BlockActor {
        cel: solid_cel(4, 6, 5),
    }));
    let scene = PropScene {
        props: vec![Prop {
            cel: solid_cel(4, 6, 9),
            x: 32,
            y: 30,
            band: Some(priority::FOREGROUND),
        }],
    };
    engine.register_scene("stage", scene).unwrap();
    engine.start("stage").unwrap();
    engine.walk_to(32.0, 30.0);
    for _ in 0..50 {
        engine.tick();
        if !engine.state().walking {
            break;
        }
    }
    // The actor stands exactly on the foreground prop; every shared pixel
    // belongs to the prop.
    let fb = engine.frame_buffer();
    assert_eq!(fb.get(32, 29), Some(9));
    assert_eq!(fb.get(32, 26), Some(9));
}
