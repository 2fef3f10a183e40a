mod fake_environment;
mod recording_runner;
mod static_definitions;

pub use fake_environment::FakeEnvironment;
pub use recording_runner::RecordingRunner;
pub use static_definitions::StaticDefinitions;

use crate::app::AppContext;
use crate::app::config::Settings;

/// Context with the built-in catalog and hosts, a fake environment, and a recording runner.
pub fn builtin_context(
    environment: FakeEnvironment,
) -> AppContext<FakeEnvironment, RecordingRunner> {
    AppContext::load(environment, RecordingRunner::new(0), Settings::default())
        .expect("built-in assets must load")
}
