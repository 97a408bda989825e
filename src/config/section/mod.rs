//! Configuration section definitions.
//!
//! Each module corresponds to a section in `deduce.toml`:
//!
//! | Module     | TOML Section   | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `snippets` | `[snippets]`   | Where raw code blocks come from        |
//! | `build`    | `[build]`      | Where rendered blocks are published    |
//! | `cache`    | `[cache]`      | Snippet cache backend and ttl          |
//! | `sandbox`  | `[sandbox]`    | Remote execution endpoint              |
//! | `theme`    | `[theme]`      | Default theme and cookie settings      |

mod build;
mod cache;
mod sandbox;
mod snippets;
mod theme;

pub use build::BuildConfig;
pub use cache::CacheConfig;
pub use sandbox::SandboxConfig;
pub use snippets::SnippetsConfig;
pub use theme::ThemeConfig;
