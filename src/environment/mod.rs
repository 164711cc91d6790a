//! Capabilities injected into the stores.
//!
//! Stores never probe for a host environment. Whatever they may use
//! (a storage area, the OS colour-scheme preference, a global dark-mode flag)
//! arrives through an [`Environment`]; a missing capability selects the
//! fallback path.

mod color_scheme;
mod environment;

pub use color_scheme::{ChangeListener, ColorSchemeQuery, DarkModeFlag, DocumentFlag, MediaQuery};
pub use environment::{Environment, EnvironmentBuilder};
