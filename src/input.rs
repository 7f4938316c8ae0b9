//! Input controller
//!
//! Translates host input events into turret commands. Two modes can be active
//! at once and both write the same aim (last writer wins):
//! - discrete: arrow keys steer 2 degrees per key event, Space fires per event
//! - pointer: the pointer position sets the aim, each button press fires once
//!
//! Key events are expected at the host's key-repeat cadence, so holding Space
//! fires as fast as the keyboard repeats.

use glam::Vec2;

use crate::consts::AIM_STEP_DEGREES;
use crate::settings::Settings;
use crate::sim::state::SimulationSession;

/// A keyboard key, by DOM `KeyboardEvent.code`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Other(String),
}

impl Key {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Space" => Key::Fire,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Raw input from the host
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer position in arena coordinates
    PointerMove { x: f32, y: f32 },
    /// A button press; any button fires, `buttons` is the host's mask
    PointerDown { buttons: u16 },
}

#[derive(Debug, Clone)]
pub struct InputController {
    /// Keys currently held, in press order
    held: Vec<Key>,
    discrete: bool,
    pointer: bool,
}

impl InputController {
    pub fn new(discrete: bool, pointer: bool) -> Self {
        Self {
            held: Vec::new(),
            discrete,
            pointer,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.discrete_input, settings.pointer_input)
    }

    pub fn is_held(&self, key: &Key) -> bool {
        self.held.contains(key)
    }

    /// Apply one event to the session.
    ///
    /// Returns the id of the projectile fired, if any.
    pub fn handle(&mut self, event: &InputEvent, session: &mut SimulationSession) -> Option<u32> {
        match event {
            InputEvent::KeyDown(key) if self.discrete => {
                if !self.held.contains(key) {
                    self.held.push(key.clone());
                }

                // Left wins when both are held
                if self.is_held(&Key::Left) {
                    session.turret.adjust_aim(-AIM_STEP_DEGREES);
                } else if self.is_held(&Key::Right) {
                    session.turret.adjust_aim(AIM_STEP_DEGREES);
                }

                if self.is_held(&Key::Fire) {
                    return Some(session.fire());
                }
                None
            }
            InputEvent::KeyUp(_) => {
                // Releasing any key forgets every held key
                self.held.clear();
                None
            }
            InputEvent::PointerMove { x, y } if self.pointer => {
                let to = Vec2::new(*x, *y) - session.turret.pivot;
                session.turret.set_aim(to.y.atan2(to.x));
                None
            }
            InputEvent::PointerDown { buttons } if self.pointer => {
                log::trace!("Pointer press, buttons {:#b}", buttons);
                Some(session.fire())
            }
            _ => None,
        }
    }
}

/// Computer player: aims at the oldest live target and fires on a fixed cadence
#[derive(Debug, Clone)]
pub struct Autopilot {
    fire_every: u32,
    countdown: u32,
}

impl Autopilot {
    pub fn new(fire_every: u32) -> Self {
        let fire_every = fire_every.max(1);
        Self {
            fire_every,
            countdown: fire_every,
        }
    }

    /// Run once per tick, before the tick. Returns the id of a fired projectile.
    pub fn update(&mut self, session: &mut SimulationSession) -> Option<u32> {
        let target = session.targets.first()?.pos;
        let to = target - session.turret.pivot;
        session.turret.set_aim(to.y.atan2(to.x));

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.countdown = self.fire_every;
            return Some(session.fire());
        }
        None
    }
}
