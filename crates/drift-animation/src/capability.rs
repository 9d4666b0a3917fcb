//! Render capability probing and animation mode selection.

/// Renderer substrings of GPUs that cannot sustain the full particle field.
const LOW_POWER_MARKERS: &[&str] = &[
    "mali-4",
    "mali-t",
    "adreno 3",
    "adreno 4",
    "powervr sgx",
    "intel hd graphics 4",
    "intel hd graphics 5",
    "swiftshader",
    "llvmpipe",
];

const MIN_TEXTURE_SIZE: u32 = 4096;

/// Whether `renderer` names a weak or software GPU, or the texture limit is
/// below 4096. Trademark marks such as `(R)` and `(TM)` are ignored.
pub fn is_low_power(renderer: &str, max_texture_size: u32) -> bool {
    let renderer = renderer.to_ascii_lowercase().replace("(r)", "").replace("(tm)", "");
    LOW_POWER_MARKERS.iter().any(|m| renderer.contains(m)) || max_texture_size < MIN_TEXTURE_SIZE
}

/// What the host renderer reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCapability {
    pub supported: bool,
    /// Graphics API major version, `None` when unsupported.
    pub version: Option<u8>,
    pub max_texture_size: u32,
    pub max_vertex_uniforms: u32,
    pub renderer: String,
    pub low_power: bool,
}

impl RenderCapability {
    /// Capability of a working context; low-power is derived from the inputs.
    pub fn detect(version: u8, max_texture_size: u32, max_vertex_uniforms: u32, renderer: &str) -> Self {
        let low_power = is_low_power(renderer, max_texture_size);
        if low_power {
            tracing::info!(renderer, max_texture_size, "low-power renderer detected");
        }
        Self {
            supported: true,
            version: Some(version),
            max_texture_size,
            max_vertex_uniforms,
            renderer: renderer.to_string(),
            low_power,
        }
    }

    /// No context could be created.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            version: None,
            max_texture_size: 0,
            max_vertex_uniforms: 0,
            renderer: String::new(),
            low_power: true,
        }
    }

    /// Version 2 context on a capable GPU.
    pub fn can_run_full_experience(&self) -> bool {
        self.supported && self.version == Some(2) && !self.low_power && self.max_texture_size >= MIN_TEXTURE_SIZE
    }
}

impl Default for RenderCapability {
    fn default() -> Self {
        Self::detect(2, MIN_TEXTURE_SIZE, 1024, "")
    }
}

/// Which presentation the host should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// No 3D: render the static page, do not construct the engine.
    Static,
    /// 3D with snap-to-keyframe camera.
    ReducedMotion,
    Full,
}

impl AnimationMode {
    pub fn select(capability: &RenderCapability, prefers_reduced_motion: bool) -> Self {
        if !capability.supported {
            AnimationMode::Static
        } else if prefers_reduced_motion {
            AnimationMode::ReducedMotion
        } else {
            AnimationMode::Full
        }
    }
}
