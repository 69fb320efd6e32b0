// src/app.rs
use crate::classifier::Classifier;
use crate::db::Database;
use crate::privacy::PrivacyFilter;
use std::path::PathBuf;

/// Everything a request handler needs, built once in `main`.
pub struct App {
    pub db: Database,
    pub classifier: Box<dyn Classifier>,
    pub privacy: PrivacyFilter,
    pub scratch_dir: PathBuf,
    pub max_upload_bytes: u64,
}
