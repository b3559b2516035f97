//! `arena_shared`
//!
//! Libraries shared by the client core and the integration tests'
//! stub room server.
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Clear separation of concerns (math, net, config, collision).
//! - Traits at the seams for dependency injection.
//! - No `unsafe`.

pub mod config;
pub mod math;
pub mod net;
pub mod physics;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::math::*;
    pub use crate::net::*;
    pub use crate::physics::*;
}
