//! Signal type labels and the physical compatibility table.
//!
//! A [`SignalType`] is an opaque label such as `hdmi`, `scart` or `s-video`.
//! There is no closed enum: anything the catalog or a saved diagram names is
//! accepted, and labels the rules below do not mention are treated as
//! unconstrained analog.
//!
//! [`is_compatible`] is the single source of truth for whether an output of one
//! type may drive an input of another. The table is evaluated in precedence
//! order; the first rule that matches decides:
//!
//! | # | Pairing | Result |
//! |---|---------|--------|
//! | 1 | equal labels (case-insensitive) | compatible |
//! | 2 | `hdmi` ↔ any analog type | incompatible |
//! | 3 | `rf` ↔ anything else | incompatible |
//! | 4 | `component` ↔ `composite` / `rca` / `s-video` | incompatible |
//! | 5 | `composite` / `rca` ↔ `s-video` | incompatible |
//! | 6 | `rgb` ↔ `component` | incompatible |
//! | 7 | everything else | compatible (may need a passive adapter) |

use core::fmt;

use serde::{Deserialize, Serialize};

/// Type assigned to freshly synthesized scalable-switch ports.
pub const DEFAULT_SIGNAL: &str = "component";

/// Signal labels recognised by the colour table, in display order.
pub const KNOWN_SIGNALS: &[&str] = &[
    "hdmi",
    "scart",
    "composite",
    "rca",
    "s-video",
    "component",
    "rgb",
    "rf",
    "bnc",
    "vga",
];

/// Colour used for signal types missing from the lookup table.
pub const FALLBACK_COLOR: &str = "#94a3b8";

const HDMI: &str = "hdmi";
const RF: &str = "rf";
const COMPONENT: &str = "component";
const COMPOSITE: &str = "composite";
const RCA: &str = "rca";
const S_VIDEO: &str = "s-video";
const RGB: &str = "rgb";

/// A physical A/V signal format label.
///
/// The original casing is preserved for display; comparisons made by the
/// compatibility rules ignore case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalType(String);

impl SignalType {
    /// Wraps a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The default type used when ports are synthesized (`component`).
    pub fn default_port() -> Self {
        Self(DEFAULT_SIGNAL.to_string())
    }

    /// Returns the label exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for an empty or whitespace-only label.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns `true` if this is the digital `hdmi` type.
    pub fn is_digital(&self) -> bool {
        self.0.eq_ignore_ascii_case(HDMI)
    }

    /// Case-insensitive label equality.
    pub fn same_as(&self, other: &SignalType) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Returns `true` if an output of this type may drive an input of `input`.
    pub fn drives(&self, input: &SignalType) -> bool {
        is_compatible(&self.0, &input.0)
    }

    /// Display colour for edges and handles carrying this signal.
    pub fn color(&self) -> &'static str {
        display_color(&self.0)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SignalType {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for SignalType {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl AsRef<str> for SignalType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decides whether an output of type `output` may be wired to an input of type
/// `input`.
///
/// Pure and total: unknown labels fall through to the permissive default.
pub fn is_compatible(output: &str, input: &str) -> bool {
    let out = output.trim().to_ascii_lowercase();
    let inp = input.trim().to_ascii_lowercase();
    let (a, b) = (out.as_str(), inp.as_str());

    if a == b {
        return true;
    }

    // Digital never mates with analog.
    if (a == HDMI) != (b == HDMI) {
        return false;
    }

    if a == RF || b == RF {
        return false;
    }

    if pair_is(a, b, &[COMPONENT], &[COMPOSITE, RCA, S_VIDEO]) {
        return false;
    }

    if pair_is(a, b, &[COMPOSITE, RCA], &[S_VIDEO]) {
        return false;
    }

    if pair_is(a, b, &[RGB], &[COMPONENT]) {
        return false;
    }

    true
}

/// Returns `true` if `{a, b}` has one member in `left` and the other in `right`.
fn pair_is(a: &str, b: &str, left: &[&str], right: &[&str]) -> bool {
    (left.contains(&a) && right.contains(&b)) || (left.contains(&b) && right.contains(&a))
}

/// Hex colour used to draw a signal type on the canvas.
pub fn display_color(signal: &str) -> &'static str {
    match signal.trim().to_ascii_lowercase().as_str() {
        "hdmi" => "#8b5cf6",
        "scart" => "#ef4444",
        "composite" => "#eab308",
        "rca" => "#f59e0b",
        "s-video" => "#f97316",
        "component" => "#22c55e",
        "rgb" => "#ec4899",
        "rf" => "#64748b",
        "bnc" => "#06b6d4",
        "vga" => "#3b82f6",
        _ => FALLBACK_COLOR,
    }
}
