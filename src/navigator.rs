// SPDX-License-Identifier: GPL-3.0

//! Word × media navigation and list virtualization. Nothing here touches the
//! deck store; callers feed it counts and events.

pub mod cursor;
pub mod query;
pub mod window;

pub use cursor::{Action, Axis, Navigator, Position, SwipeEvent};
pub use query::{StagedWord, WordQuery, sorted_by_text, staged_words};
pub use window::{ListWindow, Slide, live_range, visible_range};
