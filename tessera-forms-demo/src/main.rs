//! Headless slider host.
//!
//! Wires a slider to a simulated document, replays a gesture script and logs
//! what a renderer and an accessibility tree would receive after each step.
//!
//! ```text
//! RUST_LOG=tessera_forms=trace tessera-forms-demo --mode range --script "down:end:160 move:20 up:20"
//! ```

mod document;
mod script;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tessera_forms::{
    SharedSlider,
    slider::{
        InputSource, PointerEvent, PointerId, Slider, SliderArgs, SliderEvent, SliderValue,
        TrackBounds,
    },
};
use tracing::{info, warn};

use document::Document;
use script::Step;

const DEFAULT_SCRIPT: &str = "click:150 down:end:150 move:60 move:30 up:30 click:30 \
                              key:end:PageUp touch:start:40 move:10 cancel push:5 blur";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Single,
    Range,
}

#[derive(Parser, Debug)]
#[command(name = "tessera-forms-demo")]
#[command(version, about = "Replays pointer and keyboard gestures against a headless slider", long_about = None)]
struct Cli {
    /// Single value or start/end range
    #[arg(long, value_enum, default_value_t = Mode::Single)]
    mode: Mode,
    /// Lower bound
    #[arg(long, default_value_t = 0.0)]
    min: f64,
    /// Upper bound
    #[arg(long, default_value_t = 100.0)]
    max: f64,
    /// Step between selectable values
    #[arg(long, default_value_t = 1.0)]
    step: f64,
    /// Initial value of a single slider
    #[arg(long, default_value_t = 0.0)]
    value: f64,
    /// Initial start of a range slider
    #[arg(long, default_value_t = 25.0)]
    start: f64,
    /// Initial end of a range slider
    #[arg(long, default_value_t = 75.0)]
    end: f64,
    /// Steps moved by PageUp/PageDown
    #[arg(long, default_value_t = tessera_forms::slider::DEFAULT_PAGE_MULTIPLIER)]
    page: u32,
    /// Track width in pixels; the track starts at x = 0
    #[arg(long, default_value_t = 200.0)]
    width: f64,
    /// Apply every move immediately instead of once per frame
    #[arg(long)]
    no_coalesce: bool,
    /// Start disabled
    #[arg(long)]
    disabled: bool,
    /// Gesture script, see the `script` module for the step syntax
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    script: String,
}

impl Cli {
    fn slider_args(&self) -> SliderArgs {
        let args = match self.mode {
            Mode::Single => SliderArgs::single(self.min, self.max, self.step, self.value),
            Mode::Range => {
                SliderArgs::range(self.min, self.max, self.step, self.start, self.end)
            }
        };
        args.page_multiplier(self.page)
            .coalesce_moves(!self.no_coalesce)
            .disabled(self.disabled)
            .on_change(|value| info!(?value, "on_change"))
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,tessera_forms=info,tessera_forms_demo=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

/// Pointer currently held down by the script.
#[derive(Clone, Copy)]
struct ActivePointer {
    id: PointerId,
    source: InputSource,
}

struct Host {
    slider: SharedSlider,
    document: Document,
    next_pointer: u64,
    active: Option<ActivePointer>,
}

impl Host {
    fn new(slider: Slider) -> Self {
        let slider = SharedSlider::new(slider);
        let document = Document::default();
        let capture = document.capture_for(slider.downgrade());
        slider.with_mut(|slider| slider.set_capture(capture));
        Self {
            slider,
            document,
            next_pointer: 0,
            active: None,
        }
    }

    fn press(&mut self, source: InputSource) -> ActivePointer {
        self.next_pointer += 1;
        let pointer = ActivePointer {
            id: PointerId(self.next_pointer),
            source,
        };
        self.active = Some(pointer);
        pointer
    }

    fn held(&self, step: &Step) -> Option<ActivePointer> {
        if self.active.is_none() {
            warn!(?step, "no pointer is down, step ignored");
        }
        self.active
    }

    fn run(&mut self, step: &Step) {
        match *step {
            Step::MouseDown(thumb, x) => {
                let pointer = self.press(InputSource::Mouse);
                self.slider.dispatch(PointerEvent::down(pointer.id, thumb, x));
            }
            Step::TouchStart(thumb, x) => {
                let pointer = self.press(InputSource::Touch);
                self.slider
                    .dispatch(PointerEvent::touch_start(pointer.id, thumb, x));
            }
            Step::Move(x) => {
                if let Some(pointer) = self.held(step) {
                    let event = match pointer.source {
                        InputSource::Mouse => PointerEvent::moved(pointer.id, x),
                        InputSource::Touch => PointerEvent::touch_move(pointer.id, x),
                    };
                    self.document.dispatch(event);
                }
            }
            Step::Up(x) => {
                if let Some(pointer) = self.held(step) {
                    let event = match pointer.source {
                        InputSource::Mouse => PointerEvent::up(pointer.id, x),
                        InputSource::Touch => PointerEvent::touch_end(pointer.id, x),
                    };
                    self.document.dispatch(event);
                    self.active = None;
                }
            }
            Step::Cancel => {
                if let Some(pointer) = self.held(step) {
                    self.document.dispatch(PointerEvent::touch_cancel(pointer.id));
                    self.active = None;
                }
            }
            Step::Click(x) => {
                self.slider.dispatch(SliderEvent::TrackClick { client_x: x });
            }
            Step::Key(thumb, key) => {
                self.slider.dispatch(SliderEvent::KeyDown { thumb, key });
            }
            Step::PushSingle(value) => self.push(SliderValue::Single(value)),
            Step::PushRange(start, end) => self.push(SliderValue::Range { start, end }),
            Step::Frame => {
                self.slider.frame();
            }
            Step::Blur => {
                self.slider.dispatch(SliderEvent::FocusLost);
            }
        }
    }

    fn push(&self, value: SliderValue) {
        if let Err(err) = self.slider.with_mut(|slider| slider.set_value(value)) {
            warn!(%err, ?value, "host value rejected");
        }
    }

    fn report(&self, index: usize, step: &Step) {
        let (render, accessibility) = self
            .slider
            .with(|slider| (slider.render_data(), slider.accessibility()));
        info!(
            step = index + 1,
            ?step,
            value = ?self.slider.value(),
            listeners = self.document.listener_count(),
            "step applied"
        );
        for thumb in &render.thumbs {
            info!(
                endpoint = ?thumb.endpoint,
                fraction = thumb.fraction,
                label = %thumb.label,
                dragging = thumb.dragging,
                "thumb"
            );
        }
        info!(
            from = render.active_track.0,
            to = render.active_track.1,
            disabled = render.disabled,
            "active track"
        );
        for node in &accessibility {
            info!(
                key = node.key,
                now = node.value_now,
                min = node.value_min,
                max = node.value_max,
                text = %node.value_text,
                "accessibility"
            );
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let steps = script::parse(&cli.script).context("invalid gesture script")?;
    let mut slider = Slider::new(cli.slider_args()).context("invalid slider configuration")?;
    slider.set_track_bounds(TrackBounds::new(0.0, cli.width));

    let mut host = Host::new(slider);
    for (index, step) in steps.iter().enumerate() {
        host.run(step);
        if !cli.no_coalesce && *step != Step::Frame {
            host.slider.frame();
        }
        host.report(index, step);
    }

    println!("{:?}", host.slider.value());
    Ok(())
}
