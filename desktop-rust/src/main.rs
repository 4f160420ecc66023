mod app;
mod io;
mod model;

use app::LabelerApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let initial = std::env::args_os().nth(1).map(PathBuf::from);
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "REWIRE Compound Semiconductor Classification App",
        options,
        Box::new(move |_cc| {
            let mut app = LabelerApp::default();
            if let Some(path) = initial {
                app.load_from_path(&path);
            }
            Box::new(app)
        }),
    )
}
