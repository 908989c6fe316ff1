//! Business logic services

pub mod hos;
pub mod routing;
pub mod trip_planner;
