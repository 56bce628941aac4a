//! Animated fbm noise drawn behind a web page with WebGL2.
//!
//! The effect itself ([`BackgroundEffect`]) only talks to the [`gl`] traits;
//! the browser glue that owns the canvas, the resize listener and the frame
//! loop is compiled for wasm32 only.

pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod gl;
pub mod noise;
pub mod shaders;

pub use config::{EffectConfig, FramePacing};
pub use effect::{compile_stage, link_program, BackgroundEffect};
pub use error::EffectError;
pub use gl::{GlContext, StageKind, Surface};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::EffectConfig;

    mod render;
    mod webgl;

    pub use render::{start, BackgroundHandle};

    thread_local! {
        static ACTIVE: RefCell<Option<BackgroundHandle>> = const { RefCell::new(None) };
    }

    /// Page-load entry: failures are logged and the page keeps its static
    /// background.
    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        let defaults = EffectConfig::default();
        // `data-log-level` on the canvas may change the level later.
        console_log::init_with_level(log::Level::Trace).ok();
        log::set_max_level(defaults.log_level.to_level_filter());

        match render::start_on_page(defaults) {
            Ok(handle) => ACTIVE.with(|slot| *slot.borrow_mut() = Some(handle)),
            Err(err) => log::debug!("bg-shader: not started: {err}"),
        }
    }

    /// Stops the page-level background and releases its GPU objects.
    #[wasm_bindgen]
    pub fn stop_background() {
        if let Some(handle) = ACTIVE.with(|slot| slot.borrow_mut().take()) {
            handle.stop();
        }
    }
}
