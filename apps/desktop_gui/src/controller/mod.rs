//! Controller layer: bridge events, detection toggle state, and command dispatch.

pub mod events;
pub mod orchestration;
pub mod reducer;
