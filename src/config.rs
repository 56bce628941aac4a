use std::str::FromStr;

pub const DEFAULT_CANVAS_ID: &str = "bg-canvas";

/// Window size assumed when the host cannot report one.
pub const FALLBACK_SIZE: (u32, u32) = (800, 600);

/// How the frame loop is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePacing {
    /// Once per display refresh via `requestAnimationFrame`.
    #[default]
    AnimationFrame,
    /// Fixed timer, e.g. 33 ms for ~30fps on low-power pages.
    Interval { millis: u32 },
}

impl FramePacing {
    /// Accepts `raf`, `animation-frame`, `<n>fps`, `<n>ms` or a bare `<n>` (ms).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "raf" | "animation-frame" => return Some(FramePacing::AnimationFrame),
            _ => {}
        }

        let millis = if let Some(fps) = value.strip_suffix("fps") {
            let fps: u32 = fps.trim().parse().ok()?;
            if fps == 0 {
                return None;
            }
            (1000 / fps).max(1)
        } else {
            let ms = value.strip_suffix("ms").unwrap_or(value.as_str());
            ms.trim().parse().ok()?
        };

        (millis > 0).then_some(FramePacing::Interval { millis })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectConfig {
    pub canvas_id: String,
    pub frame_pacing: FramePacing,
    pub log_level: log::Level,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            frame_pacing: FramePacing::default(),
            log_level: log::Level::Info,
        }
    }
}

impl EffectConfig {
    /// Applies `pacing` and `logLevel` overrides; unparseable values are ignored.
    ///
    /// In the browser `lookup` reads the canvas `dataset`, so the page sets
    /// `data-pacing="30fps"` or `data-log-level="debug"` on the element.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(pacing) = lookup("pacing") {
            match FramePacing::parse(&pacing) {
                Some(parsed) => self.frame_pacing = parsed,
                None => log::warn!("bg-shader: ignoring pacing `{pacing}`"),
            }
        }
        if let Some(level) = lookup("logLevel") {
            match log::Level::from_str(&level) {
                Ok(parsed) => self.log_level = parsed,
                Err(_) => log::warn!("bg-shader: ignoring log level `{level}`"),
            }
        }
        self
    }
}
