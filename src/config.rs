use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_SIZE: usize = 6;
const DATABASE_FILE: &str = "catalog.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub page_size: usize,
    pub data_dir: PathBuf,
}

impl CatalogConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: data_dir.into(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
