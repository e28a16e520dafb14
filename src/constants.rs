/// Page-level wiring and layer styling constants.
///
/// Tuning for motion and particles lives in `core::config`; this file only
/// covers how the backdrop attaches to the document.
// Shared CSS custom property read by sibling overlay layers
pub const GLOW_CSS_VAR: &str = "--bg-glow-opacity";

// Element ids
pub const DEFAULT_ROOT_ID: &str = "backdrop"; // auto-mount target
pub const CANVAS_ID: &str = "backdrop-particles";
pub const VARIANT_ATTR: &str = "data-variant";

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches / long stalls

// Layer styles
pub const ROOT_STYLE: &str =
    "position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:-1;pointer-events:none;";
pub const LAYER_STYLE: &str = "position:absolute;inset:0;";
pub const GRADIENT_FADE_MS: u32 = 500; // gradient fade-in on first frame
pub const GLOW_FADE_MS: u32 = 120; // glow follows the css variable

pub const GRADIENT_BACKGROUND: &str = "radial-gradient(ellipse 70% 55% at 50% 10%, rgba(99,230,255,0.10), transparent 55%), \
     radial-gradient(ellipse 55% 45% at 85% 70%, rgba(182,155,255,0.08), transparent 60%), \
     linear-gradient(180deg, rgba(6,8,20,0.92), rgba(3,4,12,0.92))";
pub const GLOW_BACKGROUND: &str = "radial-gradient(ellipse 60% 45% at 50% 25%, rgba(99,230,255,0.22), transparent 60%), \
     radial-gradient(ellipse 50% 40% at 80% 65%, rgba(182,155,255,0.18), transparent 65%)";
