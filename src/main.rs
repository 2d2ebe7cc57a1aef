use gallivant::config::EngineConfig;
use gallivant::dictionary::groups;
use gallivant::engine::Engine;
use gallivant::frame::FrameBuffer;
use gallivant::geometry::Rect;
use gallivant::parser::ParseResult;
use gallivant::scene::{Exit, Hotspot, Scene};
use gallivant::state::GameState;
use log::{debug, info};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

/// A two-scene demo station: enough content to drive every engine surface
/// from a terminal. Real games supply their own scenes; these exist so the
/// binary is playable out of the box.
struct Squadroom {
    hotspots: Vec<Hotspot>,
    exits: Vec<Exit>,
}

impl Squadroom {
    fn new() -> Squadroom {
        Squadroom {
            hotspots: vec![
                Hotspot::new("locker", Rect::new(40, 120, 80, 160), "your locker")
                    .with_description("A dented steel locker. Your gear is inside."),
                Hotspot::new("desk", Rect::new(240, 220, 160, 80), "the duty desk")
                    .with_description("Paperwork three reports deep."),
                Hotspot::new("door", Rect::new(560, 160, 60, 160), "the street door"),
            ],
            exits: vec![Exit::new(Rect::new(580, 260, 60, 120), "street")
                .with_entry(40.0, 320.0, gallivant::geometry::Direction::Right)
                .with_guard(|state| state.has_item("gun"))
                .with_blocked_message("Regulations: never hit the street unarmed.")],
        }
    }
}

impl Scene for Squadroom {
    fn name(&self) -> &str {
        "Squadroom"
    }

    fn walk_bounds(&self) -> Option<Rect> {
        Some(Rect::new(20, 200, 600, 180))
    }

    fn safe_spawn(&self) -> Option<(f32, f32)> {
        Some((320.0, 300.0))
    }

    fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    fn exits(&self) -> &[Exit] {
        &self.exits
    }

    fn on_enter(&self, engine: &mut Engine) {
        if !engine.flag("briefed") {
            engine.set_flag("briefed", true);
            engine.show_dialog(
                Some("Sergeant"),
                "Grab your sidearm from the locker, then get out to the street.",
            );
        }
    }

    fn on_parser(&self, engine: &mut Engine, input: &ParseResult) -> bool {
        if input.said(&[groups::OPEN, 50]) {
            engine.set_flag("locker_open", true);
            engine.show_message("The locker swings open.");
            return true;
        }
        if input.said(&[groups::GET, 51]) {
            if !engine.flag("locker_open") {
                engine.show_message("Your revolver is locked away. Open the locker first.");
            } else if engine.add_item("gun", "service revolver", "G", "Standard issue .38.") {
                engine.add_score(5);
                engine.show_message("You holster the revolver. (+5 points)");
            } else {
                engine.show_message("You already have it.");
            }
            return true;
        }
        if input.said(&[groups::GO, 92]) {
            // East: walk to the street door and let the exit trigger fire.
            engine.walk_to(610.0, 320.0);
            return true;
        }
        false
    }

    fn draw(&self, frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {
        frame.fill(7);
        frame.fill_rect(Rect::new(0, 200, 640, 200), 8);
    }
}

struct Street;

impl Scene for Street {
    fn name(&self) -> &str {
        "Oak Street"
    }

    fn safe_spawn(&self) -> Option<(f32, f32)> {
        Some((40.0, 320.0))
    }

    fn on_enter(&self, engine: &mut Engine) {
        engine.add_score(2);
        engine.after(8, |g| {
            g.show_dialog(Some("Dispatch"), "All units: a 459 in progress, two blocks east.");
        });
    }

    fn on_parser(&self, engine: &mut Engine, input: &ParseResult) -> bool {
        if input.said(&[groups::GO, 93]) {
            engine.change_scene("squadroom", Some((590.0, 320.0)), None);
            return true;
        }
        false
    }

    fn draw(&self, frame: &mut FrameBuffer, _state: &GameState, _tick: u64) {
        frame.fill(1);
        frame.fill_rect(Rect::new(0, 240, 640, 160), 8);
    }
}

fn settle(engine: &mut Engine) {
    // Drain walking and any dissolve so each command's effects are visible
    // before the next prompt.
    for _ in 0..4000 {
        engine.tick();
        if !engine.state().walking && !engine.dissolve_active() {
            break;
        }
    }
    for _ in 0..8 {
        engine.tick();
    }
}

fn report(engine: &mut Engine, last_scene: &mut String, last_score: &mut i32) {
    if engine.state().current_scene != *last_scene {
        *last_scene = engine.state().current_scene.clone();
        if let Some(scene) = engine.scene(last_scene) {
            println!("-- {} --", scene.name());
        }
    }
    if let Some(dialog) = engine.dialog() {
        match dialog.speaker() {
            Some(speaker) => println!("{}: {}", speaker, dialog.text()),
            None => println!("{}", dialog.text()),
        }
        engine.dismiss_dialog();
    }
    if let Some(message) = engine.message() {
        println!("{}", message.text);
    }
    if engine.state().score != *last_score {
        *last_score = engine.state().score;
        println!("[Score: {} of {}]", last_score, engine.state().max_score);
    }
    if let Some(death) = engine.death_message() {
        println!("You have died: {} (type \"restart\" to try again)", death);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("gallivant - priority-band adventure engine core, demo driver");
        println!();
        println!("Usage: {} [config.toml]", args[0]);
        println!();
        println!("Reads commands from stdin, one per line. Try: open locker,");
        println!("get gun, look, inventory, go east. \"quit\" exits.");
        return Ok(());
    }

    let config = match args.get(1) {
        Some(path) => {
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error: cannot read config file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            EngineConfig::from_toml_str(&text)?
        }
        None => EngineConfig::default(),
    };

    let mut engine = Engine::new(config)?;
    engine.set_max_score(7);
    engine.register_scene("squadroom", Squadroom::new())?;
    engine.register_scene("street", Street)?;
    engine.start("squadroom")?;
    info!("engine started in {}", engine.state().current_scene);

    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        println!("gallivant demo - type \"help\" for parser hints, \"quit\" to exit.");
    }

    let mut last_scene = String::new();
    let mut last_score = 0;
    report(&mut engine, &mut last_scene, &mut last_score);

    let stdin = io::stdin();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        match command {
            "quit" | "exit" => break,
            "restart" => engine.restart(),
            _ => engine.handle_command(command),
        }
        settle(&mut engine);
        debug!(
            "tick {} scene {} pos ({:.0},{:.0})",
            engine.state().frame,
            engine.state().current_scene,
            engine.state().actor_x,
            engine.state().actor_y
        );
        report(&mut engine, &mut last_scene, &mut last_score);
    }

    Ok(())
}
