//! Log output setup.
//!
//! The terminal belongs to the UI, so records go to `dustfield.log` in the
//! platform cache directory. `RUST_LOG` controls the filter.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use dustfield_config::Config;
use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "dustfield.log";

/// Install the global logger. Returns the log file path, if one could be
/// opened; otherwise records are discarded.
pub fn init() -> Option<PathBuf> {
    let (target, path): (Box<dyn Write + Send>, Option<PathBuf>) = match open_log_file() {
        Ok((file, path)) => (Box::new(file), Some(path)),
        Err(_) => (Box::new(io::sink()), None),
    };

    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(target))
        .init();
    path
}

fn open_log_file() -> io::Result<(File, PathBuf)> {
    let dirs = Config::project_dirs()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    Ok((File::create(&path)?, path))
}
