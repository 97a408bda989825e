//! Theme data for the documentation site and sandbox.
//!
//! # Module Structure
//!
//! ```text
//! theme/
//! ├── scheme   # Colour schemes and their CSS variables
//! ├── cookie   # Theme/section preference cookies
//! └── editor   # Editor token tables and editor themes
//! ```

mod cookie;
mod editor;
mod scheme;

pub use cookie::ThemePreference;
pub use editor::EditorRegistration;
pub use scheme::{ColorScheme, SCHEMES};
