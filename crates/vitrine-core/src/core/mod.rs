//! UI-agnostic widget core: frame link, events, and the engine task.

pub mod events;
pub mod frame;
pub mod widget;
