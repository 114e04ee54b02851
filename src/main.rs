use clap::Parser;
use env_logger::Env;
use log::info;

mod config;
mod engine;
mod mods;
mod networking;
mod news;
mod notify;
mod status;
mod ui;
mod util;
mod window;

use config::{Cli, LauncherConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.version_only {
        println!("Cold Blood Launcher {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let config = LauncherConfig::from(cli);
    info!(
        "starting launcher v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Cold Blood Launcher")
            .with_icon(app_icon())
            .with_inner_size(eframe::egui::vec2(998.0, 622.0))
            .with_resizable(false)
            .with_maximize_button(false)
            .with_decorations(false),
        ..Default::default()
    };
    eframe::run_native(
        "Cold Blood Launcher",
        options,
        Box::new(|cc| Ok(Box::new(ui::LauncherApp::new(cc, config)))),
    )
}

fn app_icon() -> eframe::egui::IconData {
    // Simple 2x2 icon: near-black background with the blood-red accent.
    let rgba: Vec<u8> = vec![
        6, 6, 6, 255, 196, 77, 86, 255, //
        196, 77, 86, 255, 6, 6, 6, 255,
    ];
    eframe::egui::IconData {
        rgba,
        width: 2,
        height: 2,
    }
}
