//! Resume content: the structured form, its markdown projection, the preview guard,
//! persistence and the HTTP handlers over them.

pub mod handlers;
pub mod improve;
pub mod model;
pub mod projector;
pub mod prompts;
pub mod store;
pub mod sync;
pub mod validation;
