// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fingerprint-keyed cache of generated factory sources.
//!
//! Each target class owns two files in the cache directory:
//! `<Class>.json` holds the generated source verbatim and
//! `<Class>.fingerprint` the generator fingerprint (catalog plus available
//! marshaller classes) it was generated from.
//! A matching fingerprint returns the stored source without running the
//! generator. A failed generation leaves both files untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codegen::FactoryGenerator;
use crate::config::GeneratorConfig;
use crate::core::types::is_valid_type_name;
use crate::core::{MarshalError, Result};
use crate::schema::Fingerprint;

/// Extension of cached factory sources.
pub const SOURCE_EXTENSION: &str = "json";
/// Extension of stored fingerprints.
pub const FINGERPRINT_EXTENSION: &str = "fingerprint";

/// Generation front end that reuses unchanged output.
#[derive(Debug)]
pub struct GenerationCache {
    dir: PathBuf,
    use_cache: bool,
    print_out: bool,
    generations: usize,
}

impl GenerationCache {
    /// Create a cache rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            use_cache: true,
            print_out: false,
            generations: 0,
        }
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(&config.cache_dir)
            .use_cache(config.use_cache)
            .print_out(config.print_out)
    }

    /// Enable or disable reuse of cached output. Output is still written.
    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Print every freshly generated source to stdout.
    pub fn print_out(mut self, enabled: bool) -> Self {
        self.print_out = enabled;
        self
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of generator runs performed by this cache (cache hits excluded).
    pub fn generation_count(&self) -> usize {
        self.generations
    }

    /// Path of the cached source for `class_name`.
    pub fn source_path(&self, class_name: &str) -> PathBuf {
        self.dir.join(format!("{class_name}.{SOURCE_EXTENSION}"))
    }

    /// Path of the stored fingerprint for `class_name`.
    pub fn fingerprint_path(&self, class_name: &str) -> PathBuf {
        self.dir.join(format!("{class_name}.{FINGERPRINT_EXTENSION}"))
    }

    /// Return the factory source for `package`.`class_name`, generating it
    /// only if the generator fingerprint changed.
    ///
    /// # Errors
    ///
    /// Generation errors are returned unchanged and nothing is written.
    /// Failures writing the cache are reported as [`MarshalError::Cache`].
    pub fn generate(
        &mut self,
        generator: &FactoryGenerator,
        package: &str,
        class_name: &str,
    ) -> Result<String> {
        if !is_valid_type_name(class_name) {
            return Err(MarshalError::cache(
                self.dir.display().to_string(),
                format!("invalid target class name '{class_name}'"),
            ));
        }

        let fingerprint = generator.fingerprint(package, class_name)?;
        if self.use_cache {
            if let Some(source) = self.read_cached(class_name, &fingerprint) {
                info!(
                    class = %class_name,
                    "nothing has changed, using cached marshaller factory"
                );
                return Ok(source);
            }
        }

        let source = generator.generate(package, class_name).inspect_err(|e| {
            if e.is_generation_error() {
                warn!(class = %class_name, details = ?e.log_fields(), "Marshaller factory generation failed");
            }
        })?;
        self.generations += 1;

        if self.print_out {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{source}")
                .map_err(|e| MarshalError::cache("<stdout>", e.to_string()))?;
        }

        self.write_cached(class_name, &fingerprint, &source)?;
        Ok(source)
    }

    fn read_cached(&self, class_name: &str, fingerprint: &Fingerprint) -> Option<String> {
        let fingerprint_path = self.fingerprint_path(class_name);
        let stored = match fs::read_to_string(&fingerprint_path) {
            Ok(text) => Fingerprint::from_stored(&text),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(path = %fingerprint_path.display(), error = %e, "Unreadable cache fingerprint");
                }
                return None;
            }
        };
        if &stored != fingerprint {
            debug!(class = %class_name, "Catalog fingerprint changed");
            return None;
        }

        let source_path = self.source_path(class_name);
        match fs::read_to_string(&source_path) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!(path = %source_path.display(), error = %e, "Unreadable cached factory source");
                None
            }
        }
    }

    fn write_cached(&self, class_name: &str, fingerprint: &Fingerprint, source: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        // The fingerprint goes last so a partial write never looks current.
        let fingerprint_path = self.fingerprint_path(class_name);
        match fs::remove_file(&fingerprint_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(&fingerprint_path, e)),
        }

        let source_path = self.source_path(class_name);
        fs::write(&source_path, source).map_err(|e| io_error(&source_path, e))?;
        fs::write(&fingerprint_path, format!("{fingerprint}\n"))
            .map_err(|e| io_error(&fingerprint_path, e))?;

        debug!(path = %source_path.display(), "Cached marshaller factory");
        Ok(())
    }
}

fn io_error(path: &Path, e: io::Error) -> MarshalError {
    MarshalError::cache(path.display().to_string(), e.to_string())
}
