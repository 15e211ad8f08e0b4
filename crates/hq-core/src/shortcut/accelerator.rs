//! Accelerator parsing.
//!
//! Parses shortcut strings like `CmdOrCtrl+Shift+K` into a canonical form so
//! that different spellings of the same combination share one registration key.
//! Identity is taken from the host form, where `CmdOrCtrl` is resolved to the
//! modifier it stands for on the running platform.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::platform::HostPlatform;

/// Error type for accelerator parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceleratorError {
    #[error("empty accelerator")]
    Empty,
    #[error("accelerator `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("accelerator `{0}` has no key")]
    MissingKey(String),
    #[error("accelerator `{accelerator}` has more than one key (`{first}`, `{second}`)")]
    MultipleKeys {
        accelerator: String,
        first: String,
        second: String,
    },
    #[error("unknown key `{key}` in accelerator `{accelerator}`")]
    UnknownKey { accelerator: String, key: String },
}

/// Set of active modifiers for an accelerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers {
    /// Cmd on macOS, Ctrl elsewhere
    pub cmd_or_ctrl: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

impl Modifiers {
    /// Fold `cmd_or_ctrl` into the modifier it means on `platform`.
    pub fn resolved(self, platform: HostPlatform) -> Self {
        if !self.cmd_or_ctrl {
            return self;
        }
        let mut resolved = Self {
            cmd_or_ctrl: false,
            ..self
        };
        match platform {
            HostPlatform::MacOs => resolved.super_key = true,
            HostPlatform::Windows | HostPlatform::Linux => resolved.ctrl = true,
        }
        resolved
    }

    fn apply(&mut self, part_lower: &str) -> bool {
        match part_lower {
            "cmdorctrl" | "commandorcontrol" | "cmdorcontrol" | "commandorctrl" => {
                self.cmd_or_ctrl = true
            }
            "ctrl" | "control" => self.ctrl = true,
            "alt" | "option" => self.alt = true,
            "shift" => self.shift = true,
            "super" | "cmd" | "command" | "meta" | "win" => self.super_key = true,
            _ => return false,
        }
        true
    }
}

/// A platform-normalized keyboard shortcut.
///
/// Equality, hashing and ordering all follow the host form, so
/// `shift+ctrl+k` and `Ctrl+Shift+K` are the same accelerator, and on Linux
/// so are `CmdOrCtrl+K` and `Ctrl+K`.
#[derive(Debug, Clone)]
pub struct Accelerator {
    canonical: String,
    host_form: String,
    modifiers: Modifiers,
    key: String,
}

impl PartialEq for Accelerator {
    fn eq(&self, other: &Self) -> bool {
        self.host_form == other.host_form
    }
}

impl Eq for Accelerator {}

impl Hash for Accelerator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.host_form.hash(state);
    }
}

impl PartialOrd for Accelerator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Accelerator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.host_form.cmp(&other.host_form)
    }
}

impl Accelerator {
    /// Parse an accelerator string for the running platform.
    ///
    /// Format: zero or more modifiers followed by exactly one key, separated by `+`.
    /// Modifiers are case-insensitive and may appear in any order.
    pub fn parse(input: &str) -> Result<Self, AcceleratorError> {
        Self::parse_for(input, HostPlatform::current())
    }

    /// Parse an accelerator string, resolving `CmdOrCtrl` for `platform`.
    pub fn parse_for(input: &str, platform: HostPlatform) -> Result<Self, AcceleratorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AcceleratorError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut key: Option<String> = None;

        for part in trimmed.split('+').map(str::trim) {
            if part.is_empty() {
                return Err(AcceleratorError::EmptySegment(trimmed.to_string()));
            }
            if modifiers.apply(&part.to_lowercase()) {
                continue;
            }
            let normalized = normalize_key(part).ok_or_else(|| AcceleratorError::UnknownKey {
                accelerator: trimmed.to_string(),
                key: part.to_string(),
            })?;
            if let Some(first) = key.take() {
                return Err(AcceleratorError::MultipleKeys {
                    accelerator: trimmed.to_string(),
                    first,
                    second: normalized,
                });
            }
            key = Some(normalized);
        }

        let key = key.ok_or_else(|| AcceleratorError::MissingKey(trimmed.to_string()))?;
        Ok(Self {
            canonical: render(modifiers, &key),
            host_form: render(modifiers.resolved(platform), &key),
            modifiers,
            key,
        })
    }

    /// Canonical accelerator text, keeping `CmdOrCtrl` as written.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Accelerator text with `CmdOrCtrl` resolved for the platform it was
    /// parsed for. This is the identity of the shortcut.
    pub fn host_form(&self) -> &str {
        &self.host_form
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable label for the given platform.
    ///
    /// macOS uses the conventional glyph order (⌃⌥⇧⌘); other platforms
    /// spell modifiers out and join them with `+`.
    pub fn display_label(&self, platform: HostPlatform) -> String {
        let m = self.modifiers;
        match platform {
            HostPlatform::MacOs => {
                let mut label = String::new();
                if m.ctrl {
                    label.push('⌃');
                }
                if m.alt {
                    label.push('⌥');
                }
                if m.shift {
                    label.push('⇧');
                }
                if m.cmd_or_ctrl || m.super_key {
                    label.push('⌘');
                }
                label.push_str(mac_key_glyph(&self.key));
                label
            }
            HostPlatform::Windows | HostPlatform::Linux => {
                let mut parts: Vec<&str> = Vec::with_capacity(5);
                if m.cmd_or_ctrl || m.ctrl {
                    parts.push("Ctrl");
                }
                if m.alt {
                    parts.push("Alt");
                }
                if m.shift {
                    parts.push("Shift");
                }
                if m.super_key {
                    parts.push(if platform == HostPlatform::Windows {
                        "Win"
                    } else {
                        "Super"
                    });
                }
                parts.push(plain_key_label(&self.key));
                parts.join("+")
            }
        }
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Accelerator {
    type Err = AcceleratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Accelerator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for Accelerator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn render(modifiers: Modifiers, key: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(6);
    if modifiers.cmd_or_ctrl {
        parts.push("CmdOrCtrl");
    }
    if modifiers.ctrl {
        parts.push("Ctrl");
    }
    if modifiers.alt {
        parts.push("Alt");
    }
    if modifiers.shift {
        parts.push("Shift");
    }
    if modifiers.super_key {
        parts.push("Super");
    }
    parts.push(key);
    parts.join("+")
}

const PUNCTUATION: &[(char, &str)] = &[
    (',', "Comma"),
    ('.', "Period"),
    ('-', "Minus"),
    ('=', "Equal"),
    ('/', "Slash"),
    ('\\', "Backslash"),
    (';', "Semicolon"),
    ('\'', "Quote"),
    ('`', "Backquote"),
    ('[', "BracketLeft"),
    (']', "BracketRight"),
];

const NAMED_KEYS: &[(&str, &str)] = &[
    ("space", "Space"),
    ("enter", "Enter"),
    ("return", "Enter"),
    ("tab", "Tab"),
    ("esc", "Escape"),
    ("escape", "Escape"),
    ("backspace", "Backspace"),
    ("delete", "Delete"),
    ("del", "Delete"),
    ("insert", "Insert"),
    ("home", "Home"),
    ("end", "End"),
    ("pageup", "PageUp"),
    ("pagedown", "PageDown"),
    ("up", "ArrowUp"),
    ("arrowup", "ArrowUp"),
    ("down", "ArrowDown"),
    ("arrowdown", "ArrowDown"),
    ("left", "ArrowLeft"),
    ("arrowleft", "ArrowLeft"),
    ("right", "ArrowRight"),
    ("arrowright", "ArrowRight"),
];

fn normalize_key(part: &str) -> Option<String> {
    let mut chars = part.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase().to_string());
        }
        return PUNCTUATION
            .iter()
            .find(|(p, _)| *p == c)
            .map(|(_, name)| name.to_string());
    }

    let lower = part.to_lowercase();

    // Physical key code spellings: KeyK, Digit1
    for prefix in ["key", "digit"] {
        if let Some(rest) = lower.strip_prefix(prefix) {
            let mut rest_chars = rest.chars();
            if let (Some(c), None) = (rest_chars.next(), rest_chars.next()) {
                if c.is_ascii_alphanumeric() {
                    return Some(c.to_ascii_uppercase().to_string());
                }
            }
        }
    }

    if let Some(num) = lower.strip_prefix('f') {
        if let Ok(n) = num.parse::<u8>() {
            if (1..=24).contains(&n) {
                return Some(format!("F{n}"));
            }
        }
    }

    if let Some((_, name)) = NAMED_KEYS.iter().find(|(alias, _)| *alias == lower) {
        return Some(name.to_string());
    }

    PUNCTUATION
        .iter()
        .find(|(_, name)| name.to_lowercase() == lower)
        .map(|(_, name)| name.to_string())
}

fn punctuation_char(key: &str) -> Option<&'static str> {
    match key {
        "Comma" => Some(","),
        "Period" => Some("."),
        "Minus" => Some("-"),
        "Equal" => Some("="),
        "Slash" => Some("/"),
        "Backslash" => Some("\\"),
        "Semicolon" => Some(";"),
        "Quote" => Some("'"),
        "Backquote" => Some("`"),
        "BracketLeft" => Some("["),
        "BracketRight" => Some("]"),
        _ => None,
    }
}

fn mac_key_glyph(key: &str) -> &str {
    match key {
        "Enter" => "↩",
        "Escape" => "⎋",
        "Backspace" => "⌫",
        "Delete" => "⌦",
        "Tab" => "⇥",
        "ArrowUp" => "↑",
        "ArrowDown" => "↓",
        "ArrowLeft" => "←",
        "ArrowRight" => "→",
        other => punctuation_char(other).unwrap_or(other),
    }
}

fn plain_key_label(key: &str) -> &str {
    match key {
        "ArrowUp" => "Up",
        "ArrowDown" => "Down",
        "ArrowLeft" => "Left",
        "ArrowRight" => "Right",
        "Escape" => "Esc",
        other => punctuation_char(other).unwrap_or(other),
    }
}
