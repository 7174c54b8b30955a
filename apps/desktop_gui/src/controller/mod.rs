//! Controller layer: UI events, the channel-backed view, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod view;
