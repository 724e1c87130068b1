#![forbid(unsafe_code)]

//! Runtime: Elm-style models, viewports, and the host-driven step runner.
//!
//! # Key Components
//!
//! - [`Model`] - Trait for application state and behavior
//! - [`Cmd`] - Commands for side effects, including anchor scrolling
//! - [`Viewport`] - Whatever scrolls, observed through scoped listeners
//! - [`VirtualViewport`] - In-memory viewport with smooth scrolling
//! - [`StepProgram`] - Runner the host steps one frame at a time
//!
//! # How it fits in the system
//! The runtime sits between input (`mlshare-core` events) and output
//! (`mlshare-render` frames). Hosts (terminal, browser, tests) own the loop
//! and the clock; the runtime owns ordering. Scroll signals, key presses and
//! clicks all flow through one FIFO queue into `Model::update`.

pub mod program;
pub mod smooth_scroll;
pub mod step;
pub mod viewport;
pub mod virtual_viewport;

pub use program::{Cmd, Model, ProgramConfig};
pub use smooth_scroll::SmoothScroll;
pub use step::{DeterministicClock, StepProgram, StepResult};
pub use viewport::{
    ListenerGuard, NullViewport, ScrollBehavior, ScrollCallback, ScrollOutcome, ScrollRequest,
    Viewport,
};
pub use virtual_viewport::{IssuedScroll, VirtualViewport};
