//! Debris generation pipeline: bucket targets, particle assembly, runner, events and fixture.
pub mod bucket;
pub mod config;
pub mod events;
pub mod fixture;
pub mod particle;
pub mod runner;
