//! Variable-arity port configuration for Scalable Video Switch nodes.
//!
//! An [`SvsConfig`] keeps a port count and a per-port type list for each side.
//! The count and its list always change together: growing appends
//! [`DEFAULT_SIGNAL`](crate::signal::DEFAULT_SIGNAL) entries, shrinking drops
//! entries from the end and forgets their types.
//!
//! Configurations read from disk may be malformed (counts without lists, lists
//! of the wrong length, zero or oversized counts). [`SvsConfig::normalized`]
//! and [`SvsConfig::normalized_within`] repair them without failing and are
//! applied at every read boundary.

use serde::{Deserialize, Serialize};

use crate::node::{MAX_PORT_COUNT, PortLimits};
use crate::signal::SignalType;

/// Port configuration of a scalable switch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvsConfig {
    /// Number of input ports.
    #[serde(default)]
    pub num_inputs: usize,
    /// Number of output ports.
    #[serde(default)]
    pub num_outputs: usize,
    /// Input port types; `inputs.len() == num_inputs` once normalized.
    #[serde(default)]
    pub inputs: Vec<SignalType>,
    /// Output port types; `outputs.len() == num_outputs` once normalized.
    #[serde(default)]
    pub outputs: Vec<SignalType>,
}

impl Default for SvsConfig {
    fn default() -> Self {
        Self::uniform(1, 1)
    }
}

impl SvsConfig {
    /// Builds a configuration from explicit type lists.
    ///
    /// Empty lists are padded to a single default port.
    pub fn new(inputs: Vec<SignalType>, outputs: Vec<SignalType>) -> Self {
        Self {
            num_inputs: inputs.len(),
            num_outputs: outputs.len(),
            inputs,
            outputs,
        }
        .normalized()
    }

    /// `inputs` × `outputs` ports, all of the default type.
    pub fn uniform(inputs: usize, outputs: usize) -> Self {
        Self {
            num_inputs: inputs,
            num_outputs: outputs,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
        .normalized()
    }

    /// Returns `true` if both lists match their counts and each count lies in
    /// `[1, MAX_PORT_COUNT]`.
    pub fn is_consistent(&self) -> bool {
        (1..=MAX_PORT_COUNT).contains(&self.num_inputs)
            && (1..=MAX_PORT_COUNT).contains(&self.num_outputs)
            && self.inputs.len() == self.num_inputs
            && self.outputs.len() == self.num_outputs
    }

    /// Repaired copy: counts clamped to `[1, MAX_PORT_COUNT]`, lists resized
    /// to their counts.
    ///
    /// Entries within the count are kept; missing ones are filled with the
    /// default type.
    pub fn normalized(&self) -> Self {
        self.clamped(MAX_PORT_COUNT, MAX_PORT_COUNT)
    }

    /// Like [`normalized`](Self::normalized), with counts also held to the
    /// node's ceilings.
    pub fn normalized_within(&self, limits: &PortLimits) -> Self {
        self.clamped(limits.input_ceiling(), limits.output_ceiling())
    }

    fn clamped(&self, max_inputs: usize, max_outputs: usize) -> Self {
        let num_inputs = self.num_inputs.clamp(1, max_inputs.max(1));
        let num_outputs = self.num_outputs.clamp(1, max_outputs.max(1));
        Self {
            num_inputs,
            num_outputs,
            inputs: resized(&self.inputs, num_inputs),
            outputs: resized(&self.outputs, num_outputs),
        }
    }

    /// Sets the input count, clamped to `[1, limits.max_inputs]`.
    ///
    /// Returns the count actually applied.
    pub fn set_input_count(&mut self, count: usize, limits: &PortLimits) -> usize {
        self.normalize_in_place();
        let count = count.clamp(1, limits.input_ceiling());
        self.inputs = resized(&self.inputs, count);
        self.num_inputs = count;
        count
    }

    /// Sets the output count, clamped to `[1, limits.max_outputs]`.
    ///
    /// Returns the count actually applied.
    pub fn set_output_count(&mut self, count: usize, limits: &PortLimits) -> usize {
        self.normalize_in_place();
        let count = count.clamp(1, limits.output_ceiling());
        self.outputs = resized(&self.outputs, count);
        self.num_outputs = count;
        count
    }

    /// Replaces the type of input `index`.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range.
    pub fn set_input_type(&mut self, index: usize, signal: SignalType) -> bool {
        self.normalize_in_place();
        match self.inputs.get_mut(index) {
            Some(slot) => {
                *slot = signal;
                true
            }
            None => false,
        }
    }

    /// Replaces the type of output `index`.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range.
    pub fn set_output_type(&mut self, index: usize, signal: SignalType) -> bool {
        self.normalize_in_place();
        match self.outputs.get_mut(index) {
            Some(slot) => {
                *slot = signal;
                true
            }
            None => false,
        }
    }

    fn normalize_in_place(&mut self) {
        if !self.is_consistent() {
            *self = self.normalized();
        }
    }
}

fn resized(types: &[SignalType], len: usize) -> Vec<SignalType> {
    let mut out: Vec<SignalType> = types.iter().take(len).cloned().collect();
    out.resize_with(len, SignalType::default_port);
    out
}
