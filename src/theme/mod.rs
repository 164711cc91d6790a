//! Light/dark theme preference.

mod store;
mod theme;

pub use store::ThemeStore;
pub use theme::Theme;
