//! Command-line interface module.
//!
//! | Command     | Module      |
//! |-------------|-------------|
//! | `render`    | `render`    |
//! | `highlight` | `highlight` |
//! | `run`       | `run`       |
//! | `cache`     | `cache`     |
//! | `theme`     | `theme`     |

mod args;
pub mod cache;
pub mod common;
pub mod highlight;
pub mod render;
pub mod run;
pub mod theme;

pub use args::{Cli, Commands};
