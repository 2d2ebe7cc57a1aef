//! Fire-and-forget audio notification hook.
//!
//! The engine names the moments worth a sound; synthesis lives outside the
//! core. Delivery is not guaranteed and the engine behaves identically with
//! the no-op sink installed.

/// Named sound moments emitted by the engine and by scene content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Footstep,
    DoorOpen,
    ItemPickup,
    Error,
    RadioBeep,
    Siren,
    Gunshot,
    PhoneRing,
    ScorePoint,
    Death,
    Victory,
    RoomTransition,
}

pub trait AudioSink {
    fn play(&mut self, event: SoundEvent);
}

/// Discards every event. The default sink.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: SoundEvent) {}
}
