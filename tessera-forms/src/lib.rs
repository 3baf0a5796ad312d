//! Headless form controls for tessera-ui.
//!
//! The crate holds the interaction logic of form controls; drawing them is
//! left to the renderer, which reports geometry, forwards input events and
//! reads back positions, labels and accessibility state.
//!
//! # Sliders
//!
//! [`slider::Slider`] maps pointer, touch, click and keyboard input onto a
//! single value or an ordered pair, keeping every stored value step-aligned
//! and inside its bounds.
//!
//! ```
//! use tessera_forms::slider::{Endpoint, Slider, SliderArgs, SliderEvent, SliderKey, SliderValue};
//!
//! let mut volume = Slider::new(SliderArgs::single(0.0, 10.0, 1.0, 5.0))?;
//! volume.handle(SliderEvent::KeyDown { thumb: Endpoint::End, key: SliderKey::PageUp });
//! assert_eq!(volume.value(), SliderValue::Single(10.0));
//!
//! let ticks: Vec<f64> = Slider::new(SliderArgs::single(0.0, 10.0, 2.0, 0.0))?.ticks().collect();
//! assert_eq!(ticks, [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
//! # Ok::<(), tessera_forms::slider::SliderConfigError>(())
//! ```
//!
//! Hosts that attach document-level listeners during drags share the slider
//! through [`shared::SharedSlider`] and hand a [`slider::PointerCapture`] to
//! it.
#![deny(missing_docs, clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prop;
pub mod shared;
pub mod slider;

pub use prop::CallbackWith;
pub use shared::{SharedSlider, WeakSlider};
