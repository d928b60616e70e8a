pub mod api;
pub mod cloud;
pub mod constants;
pub mod orchestrators;
pub mod telemetry;
pub mod versions;
