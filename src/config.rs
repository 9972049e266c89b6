//! Startup configuration.

/// Window settings and stage defaults, consumed once by [`crate::run`].
///
/// The configured size doubles as the scale baseline: when the drawable size
/// later differs from it, scale listeners receive the per-axis ratio.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Window title.
    pub title: String,

    /// Initial drawable width in pixels.
    pub width: u32,

    /// Initial drawable height in pixels.
    pub height: u32,

    /// Scene shown when the window opens.
    pub start_scene: String,

    /// Scene used when a requested scene is not defined.
    pub fallback_scene: Option<String>,

    /// Transition used when navigation does not name one.
    pub default_transition: Option<String>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the initial drawable size in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the scene shown when the window opens.
    pub fn start_scene(mut self, name: &str) -> Self {
        self.start_scene = name.to_string();
        self
    }

    /// Set the scene used when a requested scene is not defined.
    pub fn fallback_scene(mut self, name: &str) -> Self {
        self.fallback_scene = Some(name.to_string());
        self
    }

    /// Set the transition used when navigation does not name one.
    pub fn default_transition(mut self, name: &str) -> Self {
        self.default_transition = Some(name.to_string());
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Skene".to_string(),
            width: 800,
            height: 600,
            start_scene: String::new(),
            fallback_scene: None,
            default_transition: None,
        }
    }
}
