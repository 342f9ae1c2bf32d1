//! Synthetic Vibration Signals
//!
//! Generates reproducible test captures for a rotating machine:
//! - Normal: clean 1× sine plus noise
//! - Imbalance: strong 1× component
//! - Misalignment: strong 2× harmonic
//! - Bearing: high-frequency resonance plus random impulsive spikes

mod generator;

pub use generator::{
    generate, FaultInjection, MachineCondition, SynthConfig, SynthError, SynthSignal,
};
