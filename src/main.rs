//! Bounce Arena entry point
//!
//! The browser build draws to a canvas and runs until the page goes away.
//! The native build has no window; it plays a scripted session headless.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use bounce_arena::Settings;
    use bounce_arena::consts::*;
    use bounce_arena::platform::FixedStep;
    use bounce_arena::renderer::{RenderState, colors, scene};
    use bounce_arena::sim::{InputEvent, Simulation};
    use bounce_arena::ui::{FontSelection, PanelLabel, labels};

    struct App {
        sim: Simulation,
        render_state: Option<RenderState>,
        pacer: FixedStep,
        last_time: f64,
        /// Input queued by DOM listeners, drained once per frame
        events: Vec<InputEvent>,
        canvas: HtmlCanvasElement,
        label_elements: Vec<HtmlElement>,
    }

    impl App {
        /// Convert a mouse event to canvas pixel coordinates
        fn canvas_point(&self, event: &MouseEvent) -> Vec2 {
            let client_w = self.canvas.client_width().max(1) as f32;
            let client_h = self.canvas.client_height().max(1) as f32;
            Vec2::new(
                event.offset_x() as f32 * CANVAS_WIDTH / client_w,
                event.offset_y() as f32 * CANVAS_HEIGHT / client_h,
            )
        }

        /// Drain input and run the ticks that are due
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            let events = std::mem::take(&mut self.events);
            let ticks = self.pacer.advance(dt);
            if ticks == 0 {
                self.sim.handle_events(events);
                return;
            }

            let report = self.sim.frame(events);
            if report.spawned > 0 || report.cleared {
                log::debug!("{} balls live", self.sim.balls.len());
            }
            for _ in 1..ticks {
                self.sim.tick();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.sim);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                        self.events.push(InputEvent::Quit);
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Refresh panel text in the DOM
        fn update_labels(&self) {
            for (el, label) in self.label_elements.iter().zip(labels(&self.sim.params)) {
                if el.text_content().as_deref() != Some(label.text.as_str()) {
                    el.set_text_content(Some(&label.text));
                }
            }
        }

        /// Release the GPU surface and panel text once stopped
        fn shutdown(&mut self) {
            self.render_state = None;
            for el in self.label_elements.drain(..) {
                el.remove();
            }
            log::info!("Renderer released, {} balls discarded", self.sim.balls.len());
        }
    }

    fn js_error(e: JsValue) -> anyhow::Error {
        anyhow!("{:?}", e)
    }

    /// Fetch and register the preferred label font
    async fn load_font(document: &Document, family: &str, url: &str) -> anyhow::Result<()> {
        let face = web_sys::FontFace::new_with_str(family, &format!("url({})", url))
            .map_err(js_error)?;
        JsFuture::from(face.load().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        document.fonts().add(&face).map_err(js_error)?;
        Ok(())
    }

    /// Create one absolutely positioned element per panel label
    fn create_label_elements(
        document: &Document,
        font: &FontSelection,
        initial: &[PanelLabel],
    ) -> anyhow::Result<Vec<HtmlElement>> {
        let container = document
            .get_element_by_id("labels")
            .context("no #labels container")?;

        initial
            .iter()
            .map(|label| -> anyhow::Result<HtmlElement> {
                let el: HtmlElement = document
                    .create_element("div")
                    .map_err(js_error)?
                    .dyn_into()
                    .map_err(|_| anyhow!("created element is not an HtmlElement"))?;
                let style = el.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("left", &format!("{}%", label.pos.x / CANVAS_WIDTH * 100.0));
                let _ = style.set_property("top", &format!("{}%", label.pos.y / CANVAS_HEIGHT * 100.0));
                let _ = style.set_property("font", &font.css(label.font_size));
                let _ = style.set_property("color", &colors::css(colors::LABEL));
                let _ = style.set_property("pointer-events", "none");
                el.set_text_content(Some(&label.text));
                container.append_child(&el).map_err(js_error)?;
                Ok(el)
            })
            .collect()
    }

    pub async fn run() -> anyhow::Result<()> {
        log::info!("Bounce Arena starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;
        document.set_title("Bouncing Ball Inside Circle");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas"))?;

        // Backing store matches the logical layout; CSS handles display size
        let width = CANVAS_WIDTH as u32;
        let height = CANVAS_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::from_settings(&settings, seed);

        let font = FontSelection::resolve(
            &settings.font_family,
            load_font(&document, &settings.font_family, &settings.font_url).await,
        );
        let label_elements = create_label_elements(&document, &font, &labels(&sim.params))?;

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .context("creating canvas surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("requesting GPU adapter")?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (CANVAS_WIDTH, CANVAS_HEIGHT))
                .await?;

        let app = Rc::new(RefCell::new(App {
            sim,
            render_state: Some(render_state),
            pacer: FixedStep::default(),
            last_time: 0.0,
            events: Vec::new(),
            canvas: canvas.clone(),
            label_elements,
        }));

        setup_input_handlers(&canvas, app.clone())?;

        // Start loop
        request_animation_frame(app);

        log::info!("Bounce Arena running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> anyhow::Result<()> {
        let window = web_sys::window().context("no window")?;

        // Mouse down on the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let p = a.canvas_point(&event);
                a.events.push(InputEvent::PointerDown(p));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move on the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let p = a.canvas_point(&event);
                a.events.push(InputEvent::PointerMove(p));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere ends a drag
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().events.push(InputEvent::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: single-character keys only
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    app.borrow_mut().events.push(InputEvent::KeyDown(c));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().events.push(InputEvent::Quit);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn app_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
            a.update_labels();

            if !a.sim.is_running() {
                a.shutdown();
                return;
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec2;

    use bounce_arena::Settings;
    use bounce_arena::consts::*;
    use bounce_arena::platform::TickClock;
    use bounce_arena::sim::{InputEvent, Simulation, Tunable};

    /// Run the ball arena without a window and log what happens
    #[derive(Parser, Debug)]
    #[command(name = "bounce-arena", version, about)]
    pub struct Cli {
        /// JSON settings file
        pub settings: Option<PathBuf>,

        /// Session length in seconds of simulated time
        #[arg(long, default_value_t = 10)]
        pub seconds: u32,

        /// Number of balls to drop
        #[arg(long, default_value_t = 8)]
        pub balls: u32,

        /// Run as fast as possible instead of pacing at the tick rate
        #[arg(long)]
        pub fast: bool,
    }

    /// Frames between scripted ball drops
    const SPAWN_INTERVAL: u64 = 20;

    /// Point on a slider track at a fraction of its width
    fn slider_point(sim: &Simulation, tunable: Tunable, fraction: f32) -> Vec2 {
        let track = sim.slider_layout(tunable).track;
        Vec2::new(track.x + track.w * fraction, track.y + track.h / 2.0)
    }

    /// Input for one frame of the scripted session
    fn scripted_events(sim: &Simulation, frame: u64, total: u64, balls: u32) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let arena = Vec2::new(ARENA_CENTER_X, ARENA_CENTER_Y);

        if frame % SPAWN_INTERVAL == 0 && frame / SPAWN_INTERVAL < balls as u64 {
            events.push(InputEvent::PointerDown(arena));
            events.push(InputEvent::PointerUp);
        }

        // Halfway through, widen the bounce circle past the delete circle
        if frame == total / 2 {
            let bounce = Tunable::BounceCircle;
            events.push(InputEvent::PointerDown(slider_point(sim, bounce, 0.4)));
            events.push(InputEvent::PointerMove(slider_point(sim, bounce, 0.5)));
            events.push(InputEvent::PointerUp);
        }

        if frame + 1 == total {
            events.push(InputEvent::Quit);
        }
        events
    }

    /// Ticks in a session of `seconds` simulated seconds, at least one second
    fn session_ticks(seconds: u32) -> u64 {
        u64::from(seconds.max(1)) * u64::from(TICK_RATE)
    }

    pub fn run(cli: Cli) -> anyhow::Result<()> {
        let settings = Settings::load(cli.settings.as_deref())?;
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let mut sim = Simulation::from_settings(&settings, seed);

        let total = session_ticks(cli.seconds);
        let mut clock = TickClock::new(TICK_RATE);
        let mut frame = 0;

        while sim.is_running() {
            let events = scripted_events(&sim, frame, total, cli.balls);
            let report = sim.frame(events);
            if report.removed > 0 {
                log::debug!("Tick {}: {} balls crossed the delete circle", sim.time_ticks(), report.removed);
            }

            frame += 1;
            if frame % TICK_RATE as u64 == 0 {
                log::info!(
                    "t={}s balls={} bounce={} delete={}",
                    frame / TICK_RATE as u64,
                    sim.balls.len(),
                    sim.params.bounce_radius,
                    sim.params.delete_radius
                );
            }
            if !cli.fast {
                clock.wait();
            }
        }

        log::info!("Session over after {} ticks, {} balls left", sim.time_ticks(), sim.balls.len());
        Ok(())
    }

}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_app::run().await {
        log::error!("Bounce Arena failed to start: {:#}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Bounce Arena (native, headless) starting...");

    headless::run(headless::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
