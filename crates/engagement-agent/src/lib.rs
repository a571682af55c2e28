pub mod agent;
pub mod config;
pub mod error;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
