//! Solar-tracking color temperature controller for smart lights.
//!
//! The core is a pure curve ([`curve::CurveEngine`]) plus a small state
//! machine ([`controller::Controller`]) that reacts to light notifications,
//! backs off when the color is changed externally, and suppresses its own
//! command echoes through a dead-band. Device I/O and ephemeris computation
//! live behind the [`light::Light`] and [`sun::SunProvider`] traits.

pub mod controller;
pub mod curve;
pub mod flags;
pub mod light;
pub mod sim;
pub mod state;
pub mod sun;
pub mod switch;
