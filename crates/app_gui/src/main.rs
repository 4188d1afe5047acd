mod app;

use app::UiApp;
use app::settings::config_candidates;
use eframe::{NativeOptions, egui};
use labeler_core::{AnnotatorConfig, Labeler, Notice, NoticeLevel, OrientedRgbLoader};
use rfd::FileDialog;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let config = AnnotatorConfig::load_or_default(&config_candidates());

    let Some(folder) = FileDialog::new()
        .set_title("Select Image Folder")
        .set_directory(".")
        .pick_folder()
    else {
        tracing::info!("no folder selected, exiting");
        return ExitCode::SUCCESS;
    };

    let labeler = match Labeler::open(&folder, &config, OrientedRgbLoader) {
        Ok(labeler) => labeler,
        Err(e) => {
            app::show_notice(&Notice {
                level: NoticeLevel::Error,
                title: "Error".to_string(),
                message: e.to_string(),
            });
            return ExitCode::FAILURE;
        }
    };

    match run(labeler, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application stopped with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(labeler: Labeler<OrientedRgbLoader>, config: AnnotatorConfig) -> anyhow::Result<()> {
    let title = format!("BoxLabel {}", env!("BOXLABEL_VERSION"));
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(&title),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(
                labeler,
                config.overlay,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
