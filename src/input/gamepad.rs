// Gamepad input
//
// Gamepad buttons are turned into engine key events and pushed into the
// same queue as keyboard input, so the engine sees a single key stream.

use super::KeyQueue;
use crate::error::ConfigError;
use crate::keys::{self, *};
use gilrs::{Button as GilrsButton, Event, EventType, Gilrs};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Gamepad button to engine key bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamepadMapping {
    bindings: Vec<(GilrsButton, u8)>,
}

impl GamepadMapping {
    /// Create the default bindings
    ///
    /// # Default Mappings (Standard Gamepad Layout)
    /// - D-pad: arrow keys
    /// - South (A/Cross): fire
    /// - East (B/Circle): use
    /// - West (X/Square): run
    /// - North (Y/Triangle): strafe modifier
    /// - Shoulders: strafe left/right
    /// - Start: menu, Select: confirm
    pub fn default_mapping() -> Self {
        Self {
            bindings: vec![
                (GilrsButton::DPadUp, KEY_UPARROW),
                (GilrsButton::DPadDown, KEY_DOWNARROW),
                (GilrsButton::DPadLeft, KEY_LEFTARROW),
                (GilrsButton::DPadRight, KEY_RIGHTARROW),
                (GilrsButton::South, KEY_FIRE),
                (GilrsButton::East, KEY_USE),
                (GilrsButton::West, KEY_RSHIFT),
                (GilrsButton::North, KEY_RALT),
                (GilrsButton::LeftTrigger, KEY_STRAFE_L),
                (GilrsButton::RightTrigger, KEY_STRAFE_R),
                (GilrsButton::Start, KEY_ESCAPE),
                (GilrsButton::Select, KEY_ENTER),
            ],
        }
    }

    /// Build bindings from the config table (button name -> key name)
    ///
    /// An empty table keeps the default bindings.
    pub fn from_config(table: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        if table.is_empty() {
            return Ok(Self::default_mapping());
        }

        let bindings = table
            .iter()
            .map(|(button, key)| {
                let button = string_to_gilrs_button(button)?;
                let code =
                    keys::key_from_name(key).ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
                Ok((button, code))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { bindings })
    }

    /// Engine key bound to a gamepad button
    pub fn key_for(&self, button: GilrsButton) -> Option<u8> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == button)
            .map(|&(_, code)| code)
    }
}

impl Default for GamepadMapping {
    fn default() -> Self {
        Self::default_mapping()
    }
}

/// Polls gamepads and feeds their buttons into the key queue
pub struct GamepadInput {
    gilrs: Gilrs,
    mapping: GamepadMapping,
}

impl GamepadInput {
    /// Start gamepad support
    ///
    /// Returns `None` when the platform has no gamepad backend; keyboard
    /// input keeps working in that case.
    pub fn new(mapping: GamepadMapping) -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => {
                for (id, gamepad) in gilrs.gamepads() {
                    if gamepad.is_connected() {
                        info!(id = %id, name = gamepad.name(), "gamepad connected");
                    }
                }
                Some(Self { gilrs, mapping })
            }
            Err(e) => {
                warn!("gamepad support unavailable: {}", e);
                None
            }
        }
    }

    /// Drain pending gamepad events into the queue
    pub fn drain_into(&mut self, queue: &mut KeyQueue) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(code) = self.mapping.key_for(button) {
                        queue.push(true, code);
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(code) = self.mapping.key_for(button) {
                        queue.push(false, code);
                    }
                }
                EventType::Connected => info!(id = %id, "gamepad connected"),
                EventType::Disconnected => info!(id = %id, "gamepad disconnected"),
                _ => {}
            }
        }
    }
}

/// Convert string to gilrs::Button
fn string_to_gilrs_button(s: &str) -> Result<GilrsButton, ConfigError> {
    match s {
        "South" => Ok(GilrsButton::South),
        "East" => Ok(GilrsButton::East),
        "North" => Ok(GilrsButton::North),
        "West" => Ok(GilrsButton::West),
        "C" => Ok(GilrsButton::C),
        "Z" => Ok(GilrsButton::Z),
        "LeftTrigger" => Ok(GilrsButton::LeftTrigger),
        "LeftTrigger2" => Ok(GilrsButton::LeftTrigger2),
        "RightTrigger" => Ok(GilrsButton::RightTrigger),
        "RightTrigger2" => Ok(GilrsButton::RightTrigger2),
        "Select" => Ok(GilrsButton::Select),
        "Start" => Ok(GilrsButton::Start),
        "Mode" => Ok(GilrsButton::Mode),
        "LeftThumb" => Ok(GilrsButton::LeftThumb),
        "RightThumb" => Ok(GilrsButton::RightThumb),
        "DPadUp" => Ok(GilrsButton::DPadUp),
        "DPadDown" => Ok(GilrsButton::DPadDown),
        "DPadLeft" => Ok(GilrsButton::DPadLeft),
        "DPadRight" => Ok(GilrsButton::DPadRight),
        _ => Err(ConfigError::UnknownButton(s.to_string())),
    }
}
