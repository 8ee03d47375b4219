//! Worker-thread frame dispatch


use motion_coach::{dispatch::FrameDispatcher, session::Session};
use test_helpers::{config_with_windows, identical_reference, raised_right_wrist, standing_pose};

fn session(reference_len: usize) -> Session {
    Session::with_reference(identical_reference(reference_len), &config_with_windows(3)).unwrap()
}

#[test]
fn test_lockstep_dispatch_matches_direct_processing() {
    let mut direct = session(10);
    let mut dispatcher = FrameDispatcher::spawn(session(10)).unwrap();

    for index in 0..11 {
        let frame = if index % 2 == 0 { standing_pose() } else { raised_right_wrist() };
        assert!(dispatcher.submit(frame));

        let update = dispatcher.recv_update().unwrap();
        let expected = direct.process(&frame);
        assert_eq!(update.matched, expected.matched);
        assert_eq!(update.finished, expected.finished);
        assert_eq!(update.deviated, expected.deviated);
        assert!((update.score - expected.score).abs() < 1e-12);
    }

    assert_eq!(dispatcher.dropped_frames(), 0);
    let session = dispatcher.finish().unwrap();
    assert!(session.is_finished());
    assert_eq!(session.report(), direct.report());
}

#[test]
fn test_burst_drops_frames_instead_of_queueing() {
    let mut dispatcher = FrameDispatcher::spawn(session(1000)).unwrap();

    let submitted = 200;
    let accepted = (0..submitted).filter(|_| dispatcher.submit(standing_pose())).count();

    assert!(accepted >= 1);
    assert_eq!(dispatcher.dropped_frames(), submitted - accepted);

    let session = dispatcher.finish().unwrap();
    // Every accepted frame reached the comparator exactly once
    assert_eq!(session.comparator().user_counter(), accepted);
}

#[test]
fn test_no_update_before_submit() {
    let dispatcher = FrameDispatcher::spawn(session(10)).unwrap();
    assert!(dispatcher.try_recv_update().is_none());

    let session = dispatcher.finish().unwrap();
    assert_eq!(session.comparator().user_counter(), 0);
}
