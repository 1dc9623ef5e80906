//! Plain-text projection of the view model.
//!
//! Rendering proper is out of scope for this workspace; this is the
//! debugging surface of the headless shell.

use groupview_core::{DialogPhase, GroupViewModel};

pub fn render(view: &GroupViewModel) {
    let progress = if view.loaded { "complete" } else { "loading" };
    println!(
        "── task group {} ({} tasks, {progress})",
        view.group_id, view.task_count
    );

    if let Some(warning) = &view.warning {
        println!("  warning: {warning}");
    }

    for row in &view.tasks {
        println!("  {:<12} {:<40} {}", row.state, row.name, row.task_id);
    }

    if !view.actions.is_empty() {
        let names: Vec<&str> = view.actions.iter().map(|a| a.name.as_str()).collect();
        println!("  actions: {}", names.join(", "));
    }

    match view.dialog.phase {
        DialogPhase::Idle => {}
        DialogPhase::Open => {
            println!("  dialog open: {:?}", view.dialog.title);
        }
        DialogPhase::Submitting => {
            println!("  dialog submitting: {:?}", view.dialog.title);
        }
        DialogPhase::Error => {
            println!(
                "  dialog error: {:?} ({})",
                view.dialog.title,
                view.dialog.error.as_deref().unwrap_or("unknown")
            );
        }
    }
}
