use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Route `log` output to `path`, appending. Level comes from `RUST_LOG`
/// (default `warn`). Nothing may be written to stdout while the TUI is up.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
