//! Debounced dialog show entry point.

mod common;

use std::time::Duration;

use common::{test_manager, CloseRecorder, TestManagerBuilder};
use overlay_kit::models::CloseExtra;
use overlay_kit::overlays::DialogConfig;
use overlay_kit::OverlayConfig;

#[tokio::test(start_paused = true)]
async fn test_burst_collapses_to_last_call() {
    let fixture = test_manager();
    let show = fixture.manager.debounced_dialog(Duration::from_millis(300));

    show.call(DialogConfig::new("first"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    show.call(DialogConfig::new("second"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    show.call(DialogConfig::new("third"));

    tokio::time::sleep(Duration::from_millis(299)).await;
    assert_eq!(fixture.portal.render_count(), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(fixture.portal.render_count(), 1);
    let id = fixture.portal.rendered_ids()[0];
    assert_eq!(fixture.portal.element(id).unwrap().title, "third");
    assert_eq!(fixture.manager.open_dialog_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_calls_outside_window_each_fire() {
    let fixture = test_manager();
    let show = fixture.manager.debounced_dialog(Duration::from_millis(50));

    show.call(DialogConfig::new("a"));
    tokio::time::sleep(Duration::from_millis(60)).await;
    show.call(DialogConfig::new("b"));
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(fixture.portal.render_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_configured_window_is_used() {
    let config = OverlayConfig::default()
        .with_dev_mode(true)
        .with_show_debounce_window(Duration::from_millis(120));
    let fixture = TestManagerBuilder::new().with_config(config).build();
    let show = fixture
        .manager
        .debounced_dialog(fixture.manager.config().show_debounce_window);

    assert_eq!(show.window(), Duration::from_millis(120));
    show.call(DialogConfig::new("once"));
    assert!(show.is_pending());
    tokio::time::sleep(Duration::from_millis(121)).await;
    assert!(!show.is_pending());
    assert_eq!(fixture.portal.render_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_dialog_reachable_through_registry() {
    let fixture = test_manager();
    let manager = &fixture.manager;
    let recorder = CloseRecorder::new();
    let show = manager.debounced_dialog(Duration::from_millis(50));

    show.call(DialogConfig::new("Receive").with_on_close(recorder.callback("receive")));
    tokio::time::sleep(Duration::from_millis(51)).await;
    assert_eq!(manager.open_dialog_count(), 1);
    let top = manager.registry().top().unwrap();
    assert_eq!(fixture.portal.element(top.id()).unwrap().title, "Receive");

    manager.close_all_dialogs(CloseExtra::flag("logout")).await;
    assert_eq!(manager.open_dialog_count(), 0);
    assert_eq!(recorder.calls(), vec![("receive".to_string(), CloseExtra::flag("logout"))]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_debouncer_cancels_pending_show() {
    let fixture = test_manager();
    let show = fixture.manager.debounced_dialog(Duration::from_millis(100));

    show.call(DialogConfig::new("never"));
    drop(show);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(fixture.portal.render_count(), 0);
}
