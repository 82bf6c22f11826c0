//! Controller layer: UI events, state transitions, and command orchestration.

pub mod events;
pub mod interaction;
pub mod orchestration;

pub use interaction::InteractionController;
