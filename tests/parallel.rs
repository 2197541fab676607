//! Parallel launch scenarios: everything starts at once, no ordering
//! between tasks, one completion notification each.

use tokio::sync::broadcast::error::TryRecvError;
use worksim::{Config, Event, EventKind, Supervisor, TaskStatus, DURATION_MENU_SECS};

fn drain_asserting_no_completions(rx: &mut tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match rx.try_recv() {
            Ok(ev) => assert_ne!(
                ev.kind,
                EventKind::TaskCompleted,
                "unexpected extra completion notification"
            ),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn launch_parallel_creates_and_completes_all_tasks() {
    let sup = Supervisor::builder(Config::default()).build();
    let mut rx = sup.subscribe();

    let tasks = sup.launch_parallel("Wash dishes", 3).await;
    assert_eq!(tasks.len(), 3);

    // All three are registered immediately, in creation order.
    let snap = sup.snapshot().await;
    assert_eq!(snap.len(), 3);
    for (view, task) in snap.iter().zip(&tasks) {
        assert_eq!(view.id, task.id());
        assert_eq!(view.description.as_ref(), "Wash dishes");
    }

    // Estimates come from the fixed menu and never change.
    for task in &tasks {
        assert!(DURATION_MENU_SECS.contains(&task.estimated().as_secs()));
    }

    for task in &tasks {
        task.wait_terminal().await;
        assert_eq!(task.status(), TaskStatus::Completed);
        let elapsed = task.elapsed().expect("terminal task has elapsed");
        assert!(
            elapsed >= task.estimated(),
            "natural completion took {elapsed:?}, estimate was {:?}",
            task.estimated()
        );
    }

    // Exactly one completion notification per task, in any order.
    let mut completed = 0;
    while completed < 3 {
        let ev = rx.recv().await.expect("event stream open");
        if ev.kind == EventKind::TaskCompleted {
            assert_eq!(ev.task.as_deref(), Some("Wash dishes"));
            completed += 1;
        }
    }
    drain_asserting_no_completions(&mut rx);

    // Completion does not remove anything from the registry.
    assert_eq!(sup.snapshot().await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn zero_count_is_substituted_with_one() {
    let sup = Supervisor::builder(Config::default()).build();
    let tasks = sup.launch_parallel("Sweep floor", 0).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(sup.snapshot().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn add_task_reports_its_estimate() {
    let sup = Supervisor::builder(Config::default()).build();
    let task = sup.add_task("Water plants").await;

    // The handle is returned so the caller can surface the drawn estimate.
    assert!(DURATION_MENU_SECS.contains(&task.estimated().as_secs()));
    let before = task.estimated();

    task.wait_terminal().await;
    assert_eq!(task.estimated(), before);
}
