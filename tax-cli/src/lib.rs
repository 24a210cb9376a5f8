pub mod app;
pub mod batch;
pub mod logging;
pub mod render;
