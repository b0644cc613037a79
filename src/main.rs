use overlay_kit::adapters::{LogPortal, TokioClock};
use overlay_kit::prelude::*;

use color_eyre::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("overlay_kit=debug,info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Open three dialogs, close the middle one, then the rest.
///
/// The first dialog keeps its z-index throughout and the third stays above
/// it until everything is gone.
async fn stacking_scenario(manager: &OverlayManager) {
    tracing::info!("== stacking ==");
    let first = manager.show_dialog(DialogConfig::new("Review transaction"));
    let second = manager.show_dialog(
        DialogConfig::new("Network fee")
            .with_on_close(|extra| tracing::info!("'Network fee' closed with {:?}", extra.flag)),
    );
    let third = manager.show_dialog(DialogConfig::new("Confirm with passcode"));

    tracing::info!(
        "z: first={} second={} third={}",
        first.z_index(),
        second.z_index(),
        third.z_index()
    );

    second.close(CloseExtra::flag("cancel")).await;
    tracing::info!(
        "after closing second: first={} third={} stack={:?}",
        manager.z_index_of(first.id()),
        manager.z_index_of(third.id()),
        manager.stack_snapshot()
    );

    if manager.handle_back_press() {
        tracing::info!("back press consumed");
    }
    manager.close_all_dialogs(CloseExtra::default()).await;
    tracing::info!(
        "all closed: open_dialogs={} baseline={}",
        manager.open_dialog_count(),
        manager.z_index_baseline()
    );
}

/// Show the same toast id twice in a row, then again once its window ends.
async fn toast_scenario(manager: &OverlayManager) -> Result<()> {
    tracing::info!("== toasts ==");
    let duration = Duration::from_millis(800);
    let toast = || {
        ToastConfig::success("Address copied")
            .with_toast_id("copy-address")
            .with_duration(duration)
    };

    let shown = manager.show_toast(toast())?;
    tracing::info!("first show: {}", shown.is_some());
    let repeated = manager.show_toast(toast())?;
    tracing::info!("immediate repeat: {}", repeated.is_some());

    tokio::time::sleep(duration + manager.config().toast_suppress_margin).await;
    let later = manager.show_toast(toast())?;
    tracing::info!("after window: {}", later.is_some());

    if let Some(toast) = later {
        toast.close(CloseExtra::default()).await;
    }
    Ok(())
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("overlay-kit {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;
    init_tracing();

    let config = OverlayConfig::from_env();
    config.validate()?;
    tracing::info!(
        "overlay-kit {} on {:?} (teardown {:?})",
        VERSION,
        config.platform,
        config.teardown_delay()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let manager = OverlayManager::new(config, Arc::new(LogPortal), Arc::new(TokioClock));
        stacking_scenario(&manager).await;
        toast_scenario(&manager).await
    })
}
