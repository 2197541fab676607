//! Turn-based scenarios: strict sequencing, the mandatory inter-turn pause,
//! and the estimate-summing batch summary.

use std::time::Duration;

use tokio::time::Instant;
use worksim::{Config, EventKind, Supervisor, TaskStatus};

#[tokio::test(start_paused = true)]
async fn turn_based_run_is_strictly_sequential() {
    let sup = Supervisor::builder(Config::default()).build();
    let mut rx = sup.subscribe();

    let started = Instant::now();
    let summary = sup
        .run_turns("Paint fence", 2)
        .await
        .expect("coordinator panicked")
        .expect("batch completed");
    let wall = started.elapsed();

    // Two workers, labeled and ordered.
    assert_eq!(summary.description, "Paint fence");
    assert_eq!(summary.turns.len(), 2);
    assert_eq!(summary.turns[0].label, "Paint fence - Worker 1");
    assert_eq!(summary.turns[1].label, "Paint fence - Worker 2");

    // The aggregate sums the estimates, not the measured times.
    let sum: Duration = summary.turns.iter().map(|t| t.estimated).sum();
    assert_eq!(summary.total_estimated, sum);

    // Serial execution with the 1s hand-off pause: the whole run takes the
    // sum of the estimates plus one inter-turn pause. A parallel run would
    // have finished in max(estimates).
    let pause = sup.config().turn_pause;
    assert!(
        wall >= sum + pause,
        "run took {wall:?}, expected at least {:?}",
        sum + pause
    );
    assert!(
        wall <= sum + pause + Duration::from_millis(100),
        "run took {wall:?}, expected about {:?}",
        sum + pause
    );

    // Both worker tasks ended up Completed, in insertion order.
    let snap = sup.snapshot().await;
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[0].description.as_ref(), "Paint fence - Worker 1");
    assert_eq!(snap[1].description.as_ref(), "Paint fence - Worker 2");
    for view in &snap {
        assert_eq!(view.status, TaskStatus::Completed);
    }

    // Event stream: worker 1 completes strictly before worker 2 exists.
    let mut kinds = Vec::new();
    loop {
        let ev = rx.recv().await.expect("event stream open");
        let done = ev.kind == EventKind::BatchFinished;
        kinds.push((ev.kind, ev.task.as_deref().map(str::to_owned)));
        if done {
            break;
        }
    }
    let completed_1 = kinds
        .iter()
        .position(|(k, t)| {
            *k == EventKind::TaskCompleted && t.as_deref() == Some("Paint fence - Worker 1")
        })
        .expect("worker 1 completion observed");
    let added_2 = kinds
        .iter()
        .position(|(k, t)| {
            *k == EventKind::TaskAdded && t.as_deref() == Some("Paint fence - Worker 2")
        })
        .expect("worker 2 creation observed");
    assert!(
        completed_1 < added_2,
        "worker 2 was created before worker 1 terminated"
    );
}

#[tokio::test(start_paused = true)]
async fn batch_summary_is_published_on_the_bus() {
    let sup = Supervisor::builder(Config::default()).build();
    let mut rx = sup.subscribe();

    let summary = sup
        .run_turns("Rake leaves", 3)
        .await
        .expect("coordinator panicked")
        .expect("batch completed");

    let published = loop {
        let ev = rx.recv().await.expect("event stream open");
        if ev.kind == EventKind::BatchFinished {
            break ev.summary.expect("batch event carries its summary");
        }
    };
    assert_eq!(published.description, "Rake leaves");
    assert_eq!(published.turns.len(), 3);
    assert_eq!(published.total_estimated, summary.total_estimated);
}

#[tokio::test(start_paused = true)]
async fn zero_workers_is_substituted_with_one() {
    let sup = Supervisor::builder(Config::default()).build();
    let summary = sup
        .run_turns("Mop", 0)
        .await
        .expect("coordinator panicked")
        .expect("batch completed");
    assert_eq!(summary.turns.len(), 1);
    assert_eq!(summary.turns[0].label, "Mop - Worker 1");
    assert_eq!(summary.total_estimated, summary.turns[0].estimated);
}

#[tokio::test(start_paused = true)]
async fn no_pause_after_the_last_worker() {
    let sup = Supervisor::builder(Config::default()).build();

    let started = Instant::now();
    let summary = sup
        .run_turns("Solo", 1)
        .await
        .expect("coordinator panicked")
        .expect("batch completed");
    let wall = started.elapsed();

    // A single worker never pays the inter-turn pause.
    assert!(wall >= summary.total_estimated);
    assert!(wall < summary.total_estimated + Duration::from_millis(100));
}
