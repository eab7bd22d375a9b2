//! Source download and local file cache manager.
//!
//! Downloads the vehicle and installment files from a base URL into a cache
//! directory and reads them back as text. In offline mode only previously
//! cached copies are used. A base that is not an `http(s)` URL is treated as
//! a local directory and read in place.

use crate::config;
use crate::error::{FinanceError, Result};
use crate::source::{SourceId, TextSource};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Downloads and caches the source files.
pub struct CacheManager {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never download (use cached files only).
    pub offline: bool,
    /// URL or local directory the source files live under.
    pub base_url: String,
    files: HashMap<SourceId, String>,
    timeout: Duration,
    client: Option<Client>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            base_url: config::default_base_url(),
            files: config::source_files(),
            timeout,
            client: None,
        })
    }

    /// Set the URL (or local directory) sources are read from.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the file name of one source.
    pub fn with_file(mut self, source: SourceId, filename: impl Into<String>) -> Self {
        self.files.insert(source, filename.into());
        self
    }

    /// File name configured for `source`.
    pub fn filename(&self, source: SourceId) -> Result<&str> {
        self.files
            .get(&source)
            .map(String::as_str)
            .ok_or_else(|| FinanceError::NotFound(format!("No file configured for source: {}", source)))
    }

    fn is_remote(&self) -> bool {
        self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()?,
            );
        }
        self.client
            .as_ref()
            .ok_or_else(|| FinanceError::InvalidArgument("HTTP client unavailable".into()))
    }

    /// Download a single file from the base URL.
    ///
    /// Downloads to a temp file first and renames on success, so an
    /// interrupted download never leaves a corrupt partial file behind.
    fn download_file(&mut self, filename: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", self.base_url, filename);
        info!(%url, "downloading source");

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension(format!(
            "{}.tmp",
            dest.extension().and_then(|e| e.to_str()).unwrap_or("")
        ));

        let client = self.client()?.clone();
        let result = (|| -> Result<()> {
            let resp = client.get(&url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            // Clean up partial temp file on any error
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Make the file for `source` available locally and return its path.
    ///
    /// Remote sources are re-downloaded on every call unless offline, so
    /// each load sees the current export. Local directories are read in place.
    pub fn ensure_source(&mut self, source: SourceId) -> Result<PathBuf> {
        let filename = self.filename(source)?.to_string();

        if !self.is_remote() {
            let path = Path::new(&self.base_url).join(&filename);
            if !path.exists() {
                return Err(FinanceError::NotFound(format!(
                    "Source file {} does not exist",
                    path.display()
                )));
            }
            return Ok(path);
        }

        let local_path = self.cache_dir.join(&filename);
        if self.offline {
            if local_path.exists() {
                debug!(path = %local_path.display(), "offline; using cached source");
                return Ok(local_path);
            }
            return Err(FinanceError::NotFound(format!(
                "Source file {} not cached and offline mode is enabled",
                filename
            )));
        }

        self.download_file(&filename, &local_path)?;
        Ok(local_path)
    }

    /// Read the text of `source` (handles `.gz` transparently).
    pub fn load_text(&mut self, source: SourceId) -> Result<String> {
        let path = self.ensure_source(source)?;

        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(&path)?;
            let mut decoder = GzDecoder::new(BufReader::new(file));
            let mut contents = String::new();
            if let Err(e) = decoder.read_to_string(&mut contents) {
                warn!(path = %path.display(), error = %e, "corrupt compressed source");
                if self.is_remote() {
                    let _ = fs::remove_file(&path);
                }
                return Err(e.into());
            }
            Ok(contents)
        } else {
            Ok(fs::read_to_string(&path)?)
        }
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

impl TextSource for CacheManager {
    fn fetch_text(&mut self, source: SourceId) -> Result<String> {
        self.load_text(source)
    }
}
