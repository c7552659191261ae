use super::camera::FlyCamera;
use super::input::InputState;
use super::settings::Settings;
use super::time::FrameClock;

use crate::assets::AssetLoader;
use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::render::passes::{FrameStats, WaterPipeline};
use crate::render::renderer::SceneView;
use crate::scene::lights::LightRig;
use crate::scene::river::{RiverScene, SKYBOX_FACES};
use crate::video::backends::headless::CommandLog;
use crate::video::Video;
use crate::window::events::{Event, Key};
use crate::window::Window;

/// `Engine` is the root object of the program. It owns the window, the video
/// facade and the scene, and runs the frame loop.
pub struct Engine {
    settings: Settings,
    // Dropped before the window, which owns the GL context.
    video: Video,
    window: Window,
    log: Option<CommandLog>,
    clock: FrameClock,
    input: InputState,
    camera: FlyCamera,
    rig: LightRig,
    loader: AssetLoader,
    scene: RiverScene,
    pipeline: WaterPipeline,
    events: Vec<Event>,
    frames: u64,
}

impl Engine {
    /// Setup engine with specified settings. A headless engine renders into a
    /// `CommandLog` instead of a window.
    pub fn new(settings: Settings) -> Result<Self> {
        if settings.engine.headless {
            let window = Window::headless(settings.window.size);
            let (video, log) = Video::headless(window.dimensions());
            return Self::with(settings, window, video, Some(log));
        }

        let window = Window::new(settings.window.clone())?;
        let dimensions = window.dimensions();

        // The context of `window` is current, and `video` is dropped first.
        let video = unsafe { Video::new(|symbol| window.get_proc_address(symbol), dimensions)? };

        if let Err(err) = window.set_cursor_grab(true) {
            warn!("{}", err);
        }

        Self::with(settings, window, video, None)
    }

    fn with(
        settings: Settings,
        window: Window,
        mut video: Video,
        log: Option<CommandLog>,
    ) -> Result<Self> {
        let mut loader = AssetLoader::new(settings.assets.root.clone());
        let skybox = loader.load_cubemap(&mut video, &SKYBOX_FACES)?;
        let scene = RiverScene::load(&mut video, &mut loader, settings.water.height)?;

        let shaders = settings.assets.shaders.as_ref().map(|v| v.as_path());
        let pipeline = WaterPipeline::new(&mut video, &settings.water, skybox, shaders)?;

        Ok(Engine {
            camera: FlyCamera::new(&settings.camera),
            settings,
            video,
            window,
            log,
            clock: FrameClock::wall(),
            input: InputState::new(),
            rig: LightRig::river(),
            loader,
            scene,
            pipeline,
            events: Vec::new(),
            frames: 0,
        })
    }

    /// Replaces the frame clock, a fixed clock makes every frame deterministic.
    pub fn set_clock(&mut self, clock: FrameClock) {
        self.clock = clock;
    }

    /// The commands of a headless engine.
    pub fn log(&self) -> Option<CommandLog> {
        self.log.clone()
    }

    #[inline]
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    #[inline]
    pub fn video(&self) -> &Video {
        &self.video
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut RiverScene {
        &mut self.scene
    }

    /// The video facade and the scene, for adding objects to the scene.
    pub fn scene_and_video_mut(&mut self) -> (&mut RiverScene, &mut Video) {
        (&mut self.scene, &mut self.video)
    }

    #[inline]
    pub fn rig(&self) -> &LightRig {
        &self.rig
    }

    #[inline]
    pub fn rig_mut(&mut self) -> &mut LightRig {
        &mut self.rig
    }

    #[inline]
    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    #[inline]
    pub fn pipeline(&self) -> &WaterPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn pipeline_mut(&mut self) -> &mut WaterPipeline {
        &mut self.pipeline
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Runs the main loop until the window is closed or Escape is pressed.
    pub fn run(&mut self) -> Result<()> {
        info!("Running with {:?}.", self.settings.water);
        while self.advance()?.is_some() {}
        Ok(())
    }

    /// Runs at most `n` frames, returns the number of frames that ran.
    pub fn run_frames(&mut self, n: usize) -> Result<usize> {
        for i in 0..n {
            if self.advance()?.is_none() {
                return Ok(i);
            }
        }

        Ok(n)
    }

    /// Runs one frame. Returns `None` once the program should exit.
    pub fn advance(&mut self) -> Result<Option<FrameStats>> {
        let time = self.clock.advance();

        self.events.clear();
        self.window.poll_events(&mut self.events);
        self.input.update(&self.events);

        if self.input.close_requested() || self.input.is_key_press(Key::Escape) {
            return Ok(None);
        }

        self.apply_toggles();
        self.camera.apply(&self.input, time.delta);

        if let Some(dimensions) = self.input.resized() {
            self.video.resize(dimensions);
            self.pipeline.resize(&mut self.video, dimensions)?;
        }

        let dimensions = self.video.dimensions();
        if dimensions.x == 0 || dimensions.y == 0 {
            // Minimized, there is nothing to draw into.
            return Ok(Some(FrameStats::default()));
        }

        let aspect = dimensions.x as f32 / dimensions.y as f32;
        let view = SceneView::new(&self.camera, aspect);
        self.rig
            .update(time.elapsed, self.camera.position(), self.camera.forward());

        let stats = self.pipeline.render(
            &mut self.video,
            &self.scene,
            &view,
            &self.rig,
            time.elapsed,
        )?;

        self.window.swap_buffers()?;
        self.clock.limit(self.settings.engine.max_fps);
        self.frames += 1;

        trace!("Frame {} took {} draws.", time.frame, stats.draws());
        Ok(Some(stats))
    }

    fn apply_toggles(&mut self) {
        let toggles = &mut self.rig.toggles;

        if self.input.is_key_press(Key::F) {
            toggles.spot = !toggles.spot;
            info!("Spotlight {}.", on_off(toggles.spot));
        }

        if self.input.is_key_press(Key::Key1) {
            toggles.directional = !toggles.directional;
            info!("Directional light {}.", on_off(toggles.directional));
        }

        if self.input.is_key_press(Key::Key2) {
            toggles.point = !toggles.point;
            info!("Point light {}.", on_off(toggles.point));
        }

        if self.input.is_key_press(Key::Z) {
            let wireframe = !self.pipeline.wireframe();
            self.pipeline.set_wireframe(wireframe);
            info!("Wireframe {}.", on_off(wireframe));
        }
    }

    /// Releases every GPU object the engine created. Returns the number of
    /// objects that were still alive afterwards, which `Video` then drops.
    pub fn shutdown(self) -> Result<usize> {
        let Engine {
            mut video,
            pipeline,
            mut scene,
            mut loader,
            frames,
            ..
        } = self;

        pipeline.release(&mut video)?;
        scene.release(&mut video)?;
        loader.release(&mut video)?;

        let alive = video.alive();
        if alive > 0 {
            warn!("Shut down after {} frames with {} video objects alive.", frames, alive);
        } else {
            info!("Shut down after {} frames.", frames);
        }

        Ok(alive)
    }

    /// The size the window currently renders at.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.video.dimensions()
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}
