//! Paired device domain model.

use serde::{Deserialize, Serialize};

use super::Port;
use crate::error::Result;
use crate::ports::MessageCallback;

// ============================================================================
// PortPair
// ============================================================================

/// A logical device: an input port and an output port sharing the same name
/// and occurrence, either of which may be absent. At least one side is
/// always present.
#[derive(Debug, Clone)]
pub struct PortPair {
    /// The input side, if the device exposes one.
    pub input: Option<Port>,
    /// The output side, if the device exposes one.
    pub output: Option<Port>,
}

impl PortPair {
    pub(crate) fn new(input: Option<Port>, output: Option<Port>) -> Self {
        debug_assert!(input.is_some() || output.is_some());
        Self { input, output }
    }

    fn primary(&self) -> &Port {
        self.input
            .as_ref()
            .or(self.output.as_ref())
            .expect("a port pair always has at least one side")
    }

    /// Whether this device has an input side.
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Whether this device has an output side.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Device name. When both sides are present they share it.
    pub fn name(&self) -> &str {
        &self.primary().name
    }

    /// Zero-based rank among same-named devices in the producing scan.
    pub fn occurrence(&self) -> usize {
        self.primary().occurrence
    }

    /// Identifier formed by appending the occurrence to the name, with no
    /// separator.
    ///
    /// A name that itself ends in digits can collide with another
    /// name/occurrence combination under this scheme; lookups return the
    /// first pair whose id matches.
    pub fn id(&self) -> String {
        format!("{}{}", self.name(), self.occurrence())
    }

    /// Open whichever sides are present.
    pub fn open(&self) -> Result<()> {
        if let Some(input) = &self.input {
            input.open()?;
        }
        if let Some(output) = &self.output {
            output.open()?;
        }
        Ok(())
    }

    /// Close whichever sides are present.
    pub fn close(&self) -> Result<()> {
        if let Some(input) = &self.input {
            input.close()?;
        }
        if let Some(output) = &self.output {
            output.close()?;
        }
        Ok(())
    }

    /// Transmit bytes through the output side. Does nothing when the device
    /// has no output.
    pub fn send(&self, bytes: &[u8]) -> Result<()> {
        match &self.output {
            Some(output) => output.send(bytes),
            None => Ok(()),
        }
    }

    /// Register a callback for messages arriving on the input side. Does
    /// nothing when the device has no input.
    pub fn on_message(&self, callback: MessageCallback) -> Result<()> {
        match &self.input {
            Some(input) => input.subscribe(callback),
            None => Ok(()),
        }
    }
}

/// Structural identity: two pairs are equal when they expose the same sides
/// under the same name and occurrence. Handles and enumeration indices are
/// deliberately excluded.
impl PartialEq for PortPair {
    fn eq(&self, other: &Self) -> bool {
        self.has_input() == other.has_input()
            && self.has_output() == other.has_output()
            && self.name() == other.name()
            && self.occurrence() == other.occurrence()
    }
}

impl std::fmt::Display for PortPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sides = match (self.has_input(), self.has_output()) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "none",
        };
        write!(f, "{} #{} ({})", self.name(), self.occurrence(), sides)
    }
}

// ============================================================================
// DeviceInfo
// ============================================================================

/// Plain descriptor of a logical device, safe to serialize and hand to
/// presentation layers. Carries no backend handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Device identifier, see [`PortPair::id`].
    pub id: String,
    /// Device name.
    pub name: String,
    /// Zero-based rank among same-named devices.
    pub occurrence: usize,
    /// Whether the device has an input side.
    pub has_input: bool,
    /// Whether the device has an output side.
    pub has_output: bool,
}

impl From<&PortPair> for DeviceInfo {
    fn from(pair: &PortPair) -> Self {
        Self {
            id: pair.id(),
            name: pair.name().to_string(),
            occurrence: pair.occurrence(),
            has_input: pair.has_input(),
            has_output: pair.has_output(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
