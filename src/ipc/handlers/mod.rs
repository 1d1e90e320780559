pub mod calendar;
pub mod colors;
pub mod core;
pub mod custom;
pub mod grid;
pub mod schedule;
