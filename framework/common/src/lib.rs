//! Seams between the windowing/graphics backend and the engine.
//!
//! The engine only ever sees an [`input::InputState`] to poll and a
//! [`render::RenderBackend`] to draw with. Everything platform specific lives in
//! `track-framework`.

#![allow(missing_docs, reason = "TODO add later")]

pub mod event;
pub mod frame;
pub mod input;
pub mod render;
