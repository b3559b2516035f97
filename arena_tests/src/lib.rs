//! Test support for the integration suite.

pub mod stub_room;
