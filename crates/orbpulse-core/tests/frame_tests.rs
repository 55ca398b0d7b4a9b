// Frame tick driven with synthetic time, a scripted loudness source and a
// recording renderer.

use orbpulse_core::*;

struct Scripted(Option<f32>);

impl LoudnessSource for Scripted {
    fn sample_loudness(&mut self) -> Option<f32> {
        self.0
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<FrameState>,
}

impl FrameRenderer for Recorder {
    fn render(&mut self, frame: &FrameState) -> anyhow::Result<()> {
        self.frames.push(*frame);
        Ok(())
    }
}

#[test]
fn loud_frame_reaches_both_uniform_sets() {
    let mut app = AppState::new(1280.0, 720.0);
    app.attach_logo();
    let mut renderer = Recorder::default();

    // sensitivity defaults to 1.5
    let f = app.tick(1.0, &mut Scripted(Some(40.0)), &mut renderer);

    assert_eq!(f, 60.0);
    assert_eq!(app.uniforms.main.frequency, 60.0);
    assert_eq!(app.uniforms.logo.frequency, 60.0);
    let frame = &renderer.frames[0];
    assert_eq!(frame.orb.frequency, 60.0);
    assert_eq!(frame.logo.map(|b| b.frequency), Some(60.0));
}

#[test]
fn silent_frames_follow_idle_wave() {
    let mut app = AppState::new(1280.0, 720.0);
    let mut renderer = Recorder::default();
    for step in 0..100 {
        let t = step as f32 * 0.1;
        let f = app.tick(t, &mut Scripted(None), &mut renderer);
        assert!((f - (t.sin() * 10.0 + 10.0)).abs() < 1e-5);
    }
}

#[test]
fn logo_updates_skipped_until_texture_resolves() {
    let mut app = AppState::new(1280.0, 720.0);
    let mut renderer = Recorder::default();
    let logo_before = app.uniforms.logo;

    app.tick(0.5, &mut Scripted(Some(100.0)), &mut renderer);
    assert!(app.scene.logo().is_none());
    assert_eq!(app.uniforms.logo, logo_before);
    assert!(renderer.frames[0].logo.is_none());

    app.attach_logo();
    app.tick(0.6, &mut Scripted(Some(100.0)), &mut renderer);
    assert!(renderer.frames[1].logo.is_some());
}

#[test]
fn logo_size_doubles_scale_independent_of_audio() {
    let mut app = AppState::new(1280.0, 720.0);
    app.attach_logo();
    let mut renderer = Recorder::default();
    let dispatcher = Dispatcher::standard();
    let probe = NoFullscreen;
    let ctx = HandlerContext {
        now: std::time::Duration::ZERO,
        probe: &probe,
    };

    app.tick(0.0, &mut Scripted(Some(40.0)), &mut renderer);
    let base = app.scene.logo().map(|l| l.scale).unwrap();

    dispatcher.dispatch(
        &mut app,
        &InputEvent::PanelChange {
            key: ParamKey::LogoSize,
            value: ParamValue::Number(5.0),
        },
        &ctx,
    );
    app.tick(0.0, &mut Scripted(Some(40.0)), &mut renderer);
    let doubled = app.scene.logo().map(|l| l.scale).unwrap();

    assert!((doubled / base - 2.0).abs() < 1e-5);
}

#[test]
fn camera_drifts_toward_pointer_each_frame() {
    let mut app = AppState::new(800.0, 600.0);
    app.scene.set_pointer(600.0, 100.0, 800.0, 600.0);
    let mut renderer = Recorder::default();
    let start = app.scene.camera.eye;
    app.tick(0.0, &mut Scripted(None), &mut renderer);
    let eye = app.scene.camera.eye;
    assert!(eye.x < start.x);
    assert_eq!(eye.z, start.z);
}

struct NoFullscreen;

impl FullscreenProbe for NoFullscreen {
    fn can_request(&self, _: &str) -> bool {
        false
    }
    fn can_exit(&self, _: &str) -> bool {
        false
    }
}
