pub mod app;
pub mod browse;
pub mod effects;
pub mod persistence;
pub mod ui;
