use crate::cache::CacheStore;
use crate::config::Config;
use crate::library::Library;
use crate::media::{Encoder, Extractor};
use crate::resolver::AudioResolver;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub cache: CacheStore,
    pub resolver: AudioResolver,
    pub extractor: Arc<dyn Extractor>,
    pub library: Library,
}

impl AppState {
    pub fn new(
        config: Config,
        extractor: Arc<dyn Extractor>,
        encoder: Arc<dyn Encoder>,
    ) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.cache_dir)?;
        std::fs::create_dir_all(&config.data_dir)?;

        let cache = CacheStore::new(config.cache_dir.clone());
        let resolver = AudioResolver::new(cache.clone(), extractor.clone(), encoder);
        let library = Library::new(&config.data_dir);

        Ok(Self {
            config,
            cache,
            resolver,
            extractor,
            library,
        })
    }
}
