//! Checkpoint history tests

use dashline_ecs::World;
use dashline_game::{Checkpoint, CheckpointHistory, CheckpointReason};

fn checkpoint(frame: u64) -> Checkpoint {
    Checkpoint::new(frame, World::new(), CheckpointReason::Manual)
}

#[test]
fn oldest_is_evicted() {
    let mut history = CheckpointHistory::new(3);
    for frame in 1..=5 {
        history.push(checkpoint(frame));
    }

    assert_eq!(history.len(), 3);
    assert!(history.get(2).is_none());
    assert_eq!(history.oldest().unwrap().frame(), 3);
    assert_eq!(history.latest().unwrap().frame(), 5);
    assert_eq!(history.frame_range(), Some((3, 5)));
}

#[test]
fn truncate_drops_the_future() {
    let mut history = CheckpointHistory::new(8);
    for frame in [10, 20, 30, 40] {
        history.push(checkpoint(frame));
    }

    history.truncate_after(25);
    assert_eq!(history.latest().unwrap().frame(), 20);
    let recent: Vec<u64> = history.recent(5).map(Checkpoint::frame).collect();
    assert_eq!(recent, vec![10, 20]);
}

#[test]
fn zero_capacity_still_keeps_one() {
    let mut history = CheckpointHistory::new(0);
    history.push(checkpoint(1));
    history.push(checkpoint(2));
    assert_eq!(history.capacity(), 1);
    assert_eq!(history.latest().unwrap().frame(), 2);
}
