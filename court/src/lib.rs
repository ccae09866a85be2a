//! Tennis drill editor core: court annotations, rally timelines and playback.
//!
//! A drill is a flat list of court elements (players, shots, movements). This
//! crate resolves where each player stands, compiles the shots and movements
//! into a timeline, and turns any instant of that timeline into draw commands
//! for a court surface. Editing goes through [`engine::EditorCore`], which
//! snapshots every change for undo/redo.
//!
//! Everything is pure Rust and runs without a browser. The `web` feature adds
//! a `Canvas2D` surface and interval-driven playback for WebAssembly hosts.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Element types and the annotation store |
//! | [`resolve`] | Current player positions after all movements |
//! | [`rally`] | Compiles elements into a timed rally [`rally::Timeline`] |
//! | [`clock`] | Play/pause/seek/loop state machine |
//! | [`render`] | Frames and draw commands for playback and editing |
//! | [`history`] | Bounded undo/redo of element snapshots |
//! | [`engine`] | Editor core tying store, history and input together |
//! | [`input`] | Editing tools and the session selection state |
//! | [`hit`] | Player hit-testing |
//! | [`player`] | One clock + timeline + surface per playback view |
//! | [`surface`] | The court drawing seam |
//! | [`catalog`] | Drills and routines |
//! | [`session`] | Stepping through a routine's drills |
//! | [`geom`] | Points and travel time |
//! | [`error`] | Error enums and stable codes |
//! | [`consts`] | Court dimensions, speeds and limits |

pub mod catalog;
pub mod clock;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod player;
pub mod rally;
pub mod render;
pub mod resolve;
pub mod session;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;
