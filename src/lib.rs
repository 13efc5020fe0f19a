pub mod app;
pub mod bridge;
pub mod controller;
pub mod cursor;
pub mod lifecycle;
pub mod logging;
pub mod platform;
pub mod relay;
pub mod settings;
pub mod surface;
