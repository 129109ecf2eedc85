pub mod reference;
pub mod rest;
pub mod static_table;

pub use reference::ReferenceData;
pub use rest::RestRepository;
pub use static_table::StaticRepository;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Config, DataSource};

/// A backend that yields a validated reference data snapshot.
#[async_trait]
pub trait SegmentRepository: Send + Sync {
    fn name(&self) -> &str;
    async fn load(&mut self) -> Result<ReferenceData>;
}

/// Picks the backend named by the config.
pub fn from_config(cfg: &Config) -> Box<dyn SegmentRepository> {
    match cfg.data_source {
        DataSource::Static => Box::new(StaticRepository::new()),
        DataSource::Remote => Box::new(RestRepository::new(cfg)),
    }
}
