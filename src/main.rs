use anyhow::Context as _;
use gpui::{App, Application, Bounds, WindowBounds, WindowOptions, prelude::*, px};
use tracing::{error, info};

use daynotes::components::NoteApp;
use daynotes::config::AppConfig;
use daynotes::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::load().context("failed to load configuration")?;
    info!("Using date format {:?}", config.date_format);

    Application::new().run(move |cx: &mut App| {
        let bounds = Bounds::centered(None, gpui::size(px(1000.0), px(710.0)), cx);
        let opened = cx
            .open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    ..Default::default()
                },
                |_window, cx| cx.new(|cx| NoteApp::new(config, cx)),
            )
            .context("failed to open main window");

        if let Err(e) = opened {
            error!("{:#}", e);
            cx.quit();
            return;
        }

        cx.activate(true);
    });

    Ok(())
}
