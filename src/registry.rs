//! Static stage-name resolution.
//!
//! Stage names resolve against a fixed, compile-time set of kinds rather
//! than a dynamically loaded one: there is no plugin-loading mechanism
//! here, only the lookup from a name to a constructible transform.

use crate::stages::{Expander, Flipper, Logger, Rotator, Typewriter, Uppercaser};
use crate::transform::StageTransform;

/// The recognized stage kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Logger,
    Typewriter,
    Uppercaser,
    Rotator,
    Flipper,
    Expander,
}

impl StageKind {
    /// All recognized kinds, in the order they're listed in `--help`.
    pub const ALL: [StageKind; 6] = [
        StageKind::Logger,
        StageKind::Typewriter,
        StageKind::Uppercaser,
        StageKind::Rotator,
        StageKind::Flipper,
        StageKind::Expander,
    ];

    /// Looks up a stage kind by its command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "logger" => StageKind::Logger,
            "typewriter" => StageKind::Typewriter,
            "uppercaser" => StageKind::Uppercaser,
            "rotator" => StageKind::Rotator,
            "flipper" => StageKind::Flipper,
            "expander" => StageKind::Expander,
            _ => return None,
        })
    }

    /// The name this kind is looked up by.
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Logger => "logger",
            StageKind::Typewriter => "typewriter",
            StageKind::Uppercaser => "uppercaser",
            StageKind::Rotator => "rotator",
            StageKind::Flipper => "flipper",
            StageKind::Expander => "expander",
        }
    }

    /// Constructs a fresh boxed transform of this kind.
    pub fn build(&self) -> Box<dyn StageTransform> {
        match self {
            StageKind::Logger => Box::new(Logger::to_stdout()),
            StageKind::Typewriter => Box::new(Typewriter::to_stdout()),
            StageKind::Uppercaser => Box::new(Uppercaser),
            StageKind::Rotator => Box::new(Rotator),
            StageKind::Flipper => Box::new(Flipper),
            StageKind::Expander => Box::new(Expander),
        }
    }
}

/// The recognized transform names, in [`StageKind::ALL`] order.
pub const STAGE_NAMES: [&str; 6] = [
    "logger",
    "typewriter",
    "uppercaser",
    "rotator",
    "flipper",
    "expander",
];

/// Builds the boxed transform for a recognized stage name.
///
/// Returns `None` for any unrecognized name.
pub fn resolve(name: &str) -> Option<Box<dyn StageTransform>> {
    StageKind::from_name(name).map(|kind| kind.build())
}
