//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent engine commands only; the reducer never performs I/O or
//! talks to the engine directly.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Submit the current input as a new product.
    Submit { name: String },
    /// Ask the engine to re-fetch the collection.
    Reload,
}
