// Engine key codes
//
// The engine core reads keys as a single byte. Printable keys use their
// lowercase ASCII value; everything else uses the codes below, which must
// match the engine's `doomkeys.h` exactly.

pub const KEY_RIGHTARROW: u8 = 0xae;
pub const KEY_LEFTARROW: u8 = 0xac;
pub const KEY_UPARROW: u8 = 0xad;
pub const KEY_DOWNARROW: u8 = 0xaf;

pub const KEY_STRAFE_L: u8 = 0xa0;
pub const KEY_STRAFE_R: u8 = 0xa1;
pub const KEY_USE: u8 = 0xa2;
pub const KEY_FIRE: u8 = 0xa3;

pub const KEY_ESCAPE: u8 = 27;
pub const KEY_ENTER: u8 = 13;
pub const KEY_TAB: u8 = 9;
pub const KEY_BACKSPACE: u8 = 0x7f;

/// Modifier codes live above 0x80 (scancode + 0x80)
pub const KEY_RSHIFT: u8 = 0x80 + 0x36;
pub const KEY_RCTRL: u8 = 0x80 + 0x1d;
pub const KEY_RALT: u8 = 0x80 + 0x38;

/// Returned for keys the engine has no code for
pub const KEY_NONE: u8 = 0;

/// Look up an engine key code by its configuration name
///
/// Accepts the symbolic names used in the config file (`"fire"`, `"up"`,
/// ...) or a single printable ASCII character.
pub fn key_from_name(name: &str) -> Option<u8> {
    let code = match name.to_ascii_lowercase().as_str() {
        "enter" => KEY_ENTER,
        "escape" => KEY_ESCAPE,
        "tab" => KEY_TAB,
        "backspace" => KEY_BACKSPACE,
        "left" => KEY_LEFTARROW,
        "right" => KEY_RIGHTARROW,
        "up" => KEY_UPARROW,
        "down" => KEY_DOWNARROW,
        "strafe_left" => KEY_STRAFE_L,
        "strafe_right" => KEY_STRAFE_R,
        "use" => KEY_USE,
        "fire" => KEY_FIRE,
        "shift" => KEY_RSHIFT,
        "ctrl" => KEY_RCTRL,
        "alt" => KEY_RALT,
        other => {
            let mut bytes = other.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(b), None) if b.is_ascii_graphic() => b,
                _ => return None,
            }
        }
    };
    Some(code)
}
