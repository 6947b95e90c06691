// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod layout;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod stats;
pub mod util;

pub use round::{Phase, RenderModel, RoundResult};
pub use session::Session;
pub use settings::{Mode, RoundConfig};
