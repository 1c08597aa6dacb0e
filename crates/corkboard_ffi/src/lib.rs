//! Flutter-facing bindings for the corkboard core.

pub mod api;
