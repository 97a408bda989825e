//! Utility modules.
//!
//! | Module   | Purpose                                   |
//! |----------|-------------------------------------------|
//! | `date`   | UTC dates for cookie expiry               |
//! | `html`   | Entity escaping for text and attributes   |
//! | `plural` | Counted nouns in summary lines            |

pub mod date;
pub mod html;
pub mod plural;
