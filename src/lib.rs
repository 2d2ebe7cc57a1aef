//! gallivant - interaction and rendering-control core for a priority-band
//! graphic adventure engine.
//!
//! A deterministic, frame-driven core in four pieces: a dictionary/synonym
//! text parser with positional `said()` matching, a Y-to-depth-band priority
//! table for draw ordering, an LFSR-driven dissolve transition that is
//! bit-reproducible for a given seed, and the scene registry plus interaction
//! state machine that owns the game state and routes every input intent to
//! scene-supplied hooks.
//!
//! Pixel rasterization, audio synthesis, story content and UI chrome all live
//! outside the core: scenes draw into a [`frame::FrameBuffer`], sounds go
//! through the fire-and-forget [`audio::AudioSink`] hook, and input arrives
//! as already-extracted intents (click coordinate, selected verb, typed
//! text).

#[macro_use]
extern crate lazy_static;

pub mod audio;
pub mod config;
pub mod dictionary;
pub mod dissolve;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod lfsr;
pub mod parser;
pub mod priority;
pub mod render;
pub mod scene;
pub mod state;
mod timer;
