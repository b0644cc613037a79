//! Popover open/close cycles and the select built on them.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{assert_elapsed, settle, test_manager, TestManagerBuilder};
use overlay_kit::overlays::{DialogConfig, PopoverConfig, PopoverPhase, SelectConfig, SelectItem};
use overlay_kit::{OverlayConfig, OverlayError};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_popover_opens_above_dialogs() {
    let fixture = test_manager();
    let dialog = fixture.manager.show_dialog(DialogConfig::new("Send"));
    let popover = fixture.manager.popover(PopoverConfig::new("Fee picker"));

    let z = popover.open().unwrap();
    assert!(z > dialog.z_index());
    assert!(popover.state().is_open);
    assert_eq!(popover.state().z_index, z);
}

#[tokio::test(start_paused = true)]
async fn test_open_twice_keeps_z_index() {
    let fixture = test_manager();
    let popover = fixture.manager.popover(PopoverConfig::new("Menu"));

    let first = popover.open().unwrap();
    assert_eq!(popover.open().unwrap(), first);
    assert_eq!(fixture.manager.stack_snapshot().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_popover_waits_for_teardown() {
    let fixture = test_manager();
    let popover = fixture.manager.popover(PopoverConfig::new("Menu"));
    popover.open().unwrap();

    let start = Instant::now();
    popover.close_popover().await;

    assert_elapsed(start, Duration::from_millis(250));
    assert_eq!(popover.phase(), PopoverPhase::Closed);
    assert!(fixture.manager.stack_snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reopen_while_closing_is_blocked() {
    let fixture = test_manager();
    let popover = fixture.manager.popover(PopoverConfig::new("Menu"));
    popover.open().unwrap();

    let closing = tokio::spawn({
        let popover = popover.clone();
        async move { popover.close_popover().await }
    });
    settle().await;

    assert_eq!(popover.phase(), PopoverPhase::Closing);
    let err = popover.open().unwrap_err();
    assert!(matches!(err, OverlayError::TeardownPending { id } if id == popover.id()));
    assert!(err.is_retryable());

    closing.await.unwrap();
    assert!(popover.open().is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_open_and_close_leave_no_slot_behind() {
    let config = OverlayConfig::default()
        .with_dev_mode(true)
        .with_teardown_delay(Duration::from_millis(1));
    let fixture = TestManagerBuilder::new().with_config(config).build();
    let popover = fixture.manager.popover(PopoverConfig::new("Menu"));

    for _ in 0..200 {
        popover.open().unwrap();
        let closer = tokio::spawn({
            let popover = popover.clone();
            async move { popover.close_popover().await }
        });
        let opener = tokio::spawn({
            let popover = popover.clone();
            async move {
                let _ = popover.open();
            }
        });
        opener.await.unwrap();
        closer.await.unwrap();
        popover.close_popover().await;

        assert_eq!(popover.phase(), PopoverPhase::Closed);
        assert!(fixture.manager.stack_snapshot().is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_close_when_closed_returns_immediately() {
    let fixture = test_manager();
    let popover = fixture.manager.popover(PopoverConfig::new("Menu"));

    let start = Instant::now();
    popover.close_popover().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_select_changes_value_and_closes() {
    let fixture = test_manager();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let select = fixture.manager.select(
        SelectConfig::new("Network")
            .with_item(SelectItem::new("Bitcoin", "btc"))
            .with_item(SelectItem::new("Ethereum", "eth"))
            .with_value("btc")
            .on_change(move |value| sink.lock().unwrap().push(value.to_string())),
    );

    select.open().unwrap();
    assert!(select.select("eth").await);

    assert_eq!(select.value().as_deref(), Some("eth"));
    assert_eq!(*changes.lock().unwrap(), vec!["eth".to_string()]);
    assert_eq!(select.popover().phase(), PopoverPhase::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_select_same_value_does_not_notify() {
    let fixture = test_manager();
    let changes = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&changes);
    let select = fixture.manager.select(
        SelectConfig::new("Network")
            .with_item(SelectItem::new("Bitcoin", "btc"))
            .with_value("btc")
            .on_change(move |_| *sink.lock().unwrap() += 1),
    );

    select.open().unwrap();
    assert!(select.select("btc").await);
    assert!(!select.select("doge").await);
    assert_eq!(*changes.lock().unwrap(), 0);
}
