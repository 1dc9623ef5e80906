mod logging;
mod render;
mod session;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use groupview_core::{update, AppState, Msg};
use groupview_engine::{EngineConfig, ServiceSettings};
use view_logging::view_info;

use session::EffectRunner;

const USAGE: &str = "usage: groupview_app <task-group-id> [base-url]";

fn main() -> ExitCode {
    logging::initialize(logging::LogDestination::File);

    let mut args = env::args().skip(1);
    let Some(group_id) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let mut service = ServiceSettings::default();
    if let Some(base_url) = args.next() {
        service.base_url = base_url;
    }

    let config = EngineConfig {
        service,
        history_dir: history_dir(),
    };
    let runner = match EffectRunner::new(config) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("failed to start engine: {err}");
            return ExitCode::FAILURE;
        }
    };

    view_info!("Starting session for task group {}", group_id);
    view_logging::set_session_gen(1);

    let mut state = AppState::new();
    dispatch(&mut state, Msg::GroupSelected(group_id), &runner);

    loop {
        let mut idle = true;
        while let Some(msg) = runner.poll() {
            idle = false;
            dispatch(&mut state, msg, &runner);
        }

        if state.consume_dirty() {
            render::render(&state.view());
        }

        if idle {
            std::thread::sleep(Duration::from_millis(25));
        }
    }
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
}

fn history_dir() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".groupview")
}
