//! Clipmate - clipboard history manager core
//!
//! The clipboard history & persistence engine behind a tray/hotkey desktop
//! tool: a bounded, deduplicated text history with an unbounded pinned list,
//! a separately bounded image history, case-insensitive filtering, durable
//! JSON persistence, and full-list change notifications for stateless
//! renderers. Window chrome, tray, hotkey registration and the keystroke
//! half of paste are external collaborators behind the trait seams in
//! `paste` and `clipboard_history`.

pub mod clipboard_history;
pub mod error;
pub mod events;
pub mod logging;
pub mod manager;
pub mod paste;
pub mod settings;
pub mod tabs;
