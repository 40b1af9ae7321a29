// Host-side tests for the scroll → segment → effect → pose pipeline.

use glam::Vec3;
use rand::prelude::*;
use tunnel_core::*;

fn straight_path() -> PathModel<LineCurve> {
    PathModel::new(LineCurve::new(TUNNEL_START, TUNNEL_END))
}

fn state() -> TraversalState {
    TraversalState::new(&TunnelParams::default(), 12)
}

const ALL_READY: [bool; AUDIO_TRACK_COUNT] = [true; AUDIO_TRACK_COUNT];

/// Raw wheel delta that moves progress by `fraction`.
fn wheel_for(fraction: f32) -> f32 {
    fraction / SCROLL_SENSITIVITY
}

#[test]
fn progress_stays_clamped_for_random_deltas() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut acc = ScrollAccumulator::default();
    for _ in 0..10_000 {
        let delta: f32 = rng.gen_range(-50_000.0..50_000.0);
        let p = acc.apply_delta(delta);
        assert!((0.0..=1.0).contains(&p), "progress {p} escaped [0,1]");
    }
}

#[test]
fn dwelling_inside_a_segment_fires_once() {
    let path = straight_path();
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();

    let first = st.advance([wheel_for(0.3)], &path, &table, &ALL_READY[..]);
    assert_eq!(first.segment, Some(3));
    assert!(!first.commands.is_empty());

    for _ in 0..20 {
        let out = st.advance(std::iter::empty(), &path, &table, &ALL_READY[..]);
        assert!(out.commands.is_empty());
        assert_eq!(out.segment, Some(3));
    }
}

#[test]
fn random_walk_fires_only_on_segment_changes() {
    let path = straight_path();
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();
    let mut rng = StdRng::seed_from_u64(99);
    let mut last: Option<usize> = None;

    for _ in 0..2_000 {
        let delta: f32 = rng.gen_range(-400.0..380.0);
        let out = st.advance([delta], &path, &table, &ALL_READY[..]);
        let derived = segment_index(st.progress(), 12);
        let changed = !out.commands.is_empty();
        if out.wrapped {
            assert_eq!(st.progress(), 0.0);
            continue;
        }
        assert_eq!(changed, Some(derived) != last, "at progress {}", st.progress());
        last = Some(derived);
    }
}

#[test]
fn reaching_the_end_resets_exactly_once() {
    let path = straight_path();
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();

    st.advance([wheel_for(0.95)], &path, &table, &ALL_READY[..]);
    let end = st.advance([wheel_for(0.5)], &path, &table, &ALL_READY[..]);
    assert!(end.wrapped);
    assert_eq!(end.progress, 0.0);
    assert_eq!(end.pose.position, TUNNEL_START);
    assert_eq!(end.pose, CameraRig::default().snap_to_start(&path));

    let next = st.advance(std::iter::empty(), &path, &table, &ALL_READY[..]);
    assert!(!next.wrapped);
    assert_eq!(next.segment, Some(0));
    assert!(next.commands.contains(&EffectCommand::SetTubeColor(Color(0xff0000))));

    let after = st.advance(std::iter::empty(), &path, &table, &ALL_READY[..]);
    assert!(!after.wrapped);
    assert!(after.commands.is_empty());
}

#[test]
fn look_at_wraps_near_the_end_of_the_path() {
    let path = straight_path();
    let rig = CameraRig::default();
    let pose = rig.pose_at_progress(&path, 0.99);
    let expected = path.point_at_fraction(0.02).position;
    assert!(pose.look_at.distance(expected) < 1e-2);
    assert!(pose.look_at.z > -3.0, "look-at should be near the start");
}

#[test]
fn midpoint_progress_is_segment_six() {
    assert_eq!(segment_index(0.5, 12), 6);
    assert_eq!(segment_index(0.0, 12), 0);
    assert_eq!(segment_index(1.0, 12), 12);
}

#[test]
fn segment_five_to_six_applies_six_and_stops_previous() {
    let path = straight_path();
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();

    let five = st.advance([wheel_for(5.5 / 12.0)], &path, &table, &ALL_READY[..]);
    assert_eq!(five.segment, Some(5));

    let six = st.advance([wheel_for(1.0 / 12.0)], &path, &table, &ALL_READY[..]);
    assert_eq!(six.segment, Some(6));
    let effect = table.get(6).unwrap();
    assert_eq!(
        six.commands.as_slice(),
        &[
            EffectCommand::SetTubeColor(effect.tube_color),
            EffectCommand::SetBackgroundColor(effect.background_color),
            EffectCommand::StopTrack(0),
            EffectCommand::StartTrack(1),
        ]
    );
    assert_eq!(st.dispatcher().active_track(), Some(1));
}

#[test]
fn missing_audio_does_not_block_colors_or_motion() {
    let path = straight_path();
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();
    let none_ready = [false; AUDIO_TRACK_COUNT];

    let out = st.advance([wheel_for(0.27)], &path, &table, &none_ready[..]);
    assert_eq!(
        out.commands.as_slice(),
        &[
            EffectCommand::SetTubeColor(Color(0x008000)),
            EffectCommand::SetBackgroundColor(Color(0x008000)),
        ]
    );
    assert!(out.pose.position.z < 0.0);
    assert_eq!(st.dispatcher().active_track(), None);
}

#[test]
fn large_jump_skips_intermediate_segments() {
    let path = straight_path();
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();

    st.advance(std::iter::empty(), &path, &table, &ALL_READY[..]);
    let out = st.advance([wheel_for(0.8)], &path, &table, &ALL_READY[..]);
    let starts: Vec<_> = out
        .commands
        .iter()
        .filter(|c| matches!(c, EffectCommand::StartTrack(_)))
        .collect();
    assert_eq!(out.segment, Some(9));
    assert_eq!(starts, vec![&EffectCommand::StartTrack(4)]);
}

#[test]
fn curved_paths_drive_the_same_pipeline() {
    let curve = CatmullRomCurve::new(
        vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, -30.0),
            Vec3::new(-2.0, 1.0, -60.0),
            Vec3::new(0.0, 0.0, -90.0),
        ],
        0.5,
    )
    .unwrap();
    let path = PathModel::new(curve);
    let table = EffectTable::months(AUDIO_TRACK_COUNT);
    let mut st = state();
    let out = st.advance([wheel_for(0.52)], &path, &table, &ALL_READY[..]);
    assert_eq!(out.segment, Some(6));
    assert!(out.pose.position.distance(out.pose.look_at) > 0.0);
}
