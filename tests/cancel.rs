//! Cancellation, removal, and shutdown scenarios.

use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use worksim::{Config, EventKind, RuntimeError, Supervisor, TaskStatus};

#[tokio::test(start_paused = true)]
async fn cancel_interrupts_a_running_task() {
    let sup = Supervisor::builder(Config::default()).build();
    let mut rx = sup.subscribe();

    let task = sup.add_task("Long haul").await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(sup.cancel(task.id()).await);
    task.wait_terminal().await;

    assert_eq!(task.status(), TaskStatus::Cancelled);
    let elapsed = task.elapsed().expect("terminal task has elapsed");
    assert!(
        elapsed < task.estimated(),
        "cancelled task measured {elapsed:?}, estimate was {:?}",
        task.estimated()
    );
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed <= Duration::from_millis(700));

    // The cancellation is observable, the completion notification is not.
    let mut saw_cancelled = false;
    loop {
        match rx.try_recv() {
            Ok(ev) => {
                assert_ne!(
                    ev.kind,
                    EventKind::TaskCompleted,
                    "cancelled task must not notify completion"
                );
                if ev.kind == EventKind::TaskCancelled {
                    saw_cancelled = true;
                    assert_eq!(ev.task.as_deref(), Some("Long haul"));
                }
            }
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    assert!(saw_cancelled);

    // Cancelled, not deleted: still in the registry until the caller removes it.
    let snap = sup.snapshot().await;
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].status, TaskStatus::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn cancel_is_noop_on_terminal_and_unknown_tasks() {
    let sup = Supervisor::builder(Config::default()).build();

    let task = sup.add_task("Short job").await;
    task.wait_terminal().await;
    assert_eq!(task.status(), TaskStatus::Completed);

    // Terminal task ignores the request.
    assert!(!sup.cancel(task.id()).await);
    assert_eq!(task.status(), TaskStatus::Completed);

    // Unknown id is a no-op too.
    assert!(sup.remove(task.id()).await);
    assert!(!sup.cancel(task.id()).await);
}

#[tokio::test(start_paused = true)]
async fn removal_does_not_stop_execution() {
    let sup = Supervisor::builder(Config::default()).build();
    let mut rx = sup.subscribe();

    let task = sup.add_task("Detached").await;
    assert!(sup.remove(task.id()).await);
    assert!(sup.snapshot().await.is_empty());

    // The runner keeps going; completion still notifies.
    task.wait_terminal().await;
    assert_eq!(task.status(), TaskStatus::Completed);

    loop {
        let ev = rx.recv().await.expect("event stream open");
        if ev.kind == EventKind::TaskCompleted {
            assert_eq!(ev.task.as_deref(), Some("Detached"));
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_everything_still_running() {
    let sup = Supervisor::builder(Config::default()).build();
    let mut rx = sup.subscribe();

    let tasks = sup.launch_parallel("Wash dishes", 2).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    sup.shutdown().await.expect("runners exit within grace");

    for task in &tasks {
        assert_eq!(task.status(), TaskStatus::Cancelled);
        let elapsed = task.elapsed().expect("terminal task has elapsed");
        assert!(elapsed < task.estimated());
    }

    // Shutdown does not clear the registry; tasks stay until removed.
    let snap = sup.snapshot().await;
    assert_eq!(snap.len(), 2);
    assert!(snap.iter().all(|v| v.status == TaskStatus::Cancelled));

    let mut saw_requested = false;
    let mut saw_stopped = false;
    loop {
        match rx.try_recv() {
            Ok(ev) => match ev.kind {
                EventKind::ShutdownRequested => saw_requested = true,
                EventKind::AllStoppedWithin => saw_stopped = true,
                _ => {}
            },
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    assert!(saw_requested);
    assert!(saw_stopped);
}

#[tokio::test(start_paused = true)]
async fn shutdown_aborts_a_turn_based_batch() {
    let sup = Supervisor::builder(Config::default()).build();

    let batch = sup.run_turns("Doomed batch", 3);
    tokio::time::sleep(Duration::from_millis(100)).await;

    sup.shutdown().await.expect("runners exit within grace");

    let err = batch
        .await
        .expect("coordinator panicked")
        .expect_err("interrupted batch must not produce a summary");
    match err {
        RuntimeError::BatchInterrupted { completed_turns } => {
            assert!(completed_turns <= 1, "at most the in-flight worker counts");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // No third worker was ever created.
    assert!(sup.snapshot().await.len() < 3);
}
