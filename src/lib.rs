//! Debounced pose events from per-frame body and hand landmarks.
//!
//! A session turns a stream of landmark frames into held-pose and peak-motion
//! attempts, keeps a bounded history of them and reports when every attempt
//! is used. Frames are fed one at a time through
//! [`PoseSession::update`]; each call returns a [`RenderSnapshot`] for the
//! host to draw.

#![cfg_attr(not(test), no_std)]

pub mod session;

pub use session::{
    HandstandSession, HighKickSession, LandmarkFrame, PoseEvent, PoseSession, RenderSnapshot,
    SessionMode,
};
