//! Shared value types crossing the boundary between the host glue and
//! the runtime core: opaque GPU handles, per-frame host inputs, and the
//! user-facing control block.

/// Shaders may sample from four channels (`iChannel0-3`).
pub const CHANNEL_COUNT: usize = 4;

/// Only the first two channels are wired to host-supplied textures; the
/// remaining two slots are reserved.
pub const ACTIVE_CHANNELS: usize = 2;

/// Opaque GPU texture object owned by whichever side created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque framebuffer object handle supplied by the host for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferHandle(pub u32);

/// Location of a uniform inside a compiled program, as reported by the
/// GPU binding. Absent uniforms are represented by `Option::None`, never
/// by a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(pub i32);

/// One host-supplied input texture for the current frame.
///
/// `width`/`height` are the logical pixel size the shader should see.
/// `max_s`/`max_t` bound the valid texture-coordinate rectangle, which
/// can be smaller than 1.0 when the host stores the image on a padded
/// allocation. The channel cache blits through these coordinates so the
/// shader gets a texture where the full [0,1] range is valid.
#[derive(Debug, Clone, Copy)]
pub struct HostTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
    pub max_s: f32,
    pub max_t: f32,
}

impl HostTexture {
    /// A host texture whose full allocation is valid image data.
    pub fn whole(handle: TextureHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
            max_s: 1.0,
            max_t: 1.0,
        }
    }
}

/// Everything the host hands the core for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Input textures for the two active channels.
    pub textures: [Option<HostTexture>; ACTIVE_CHANNELS],
    /// The host's currently bound framebuffer, restored after cache blits.
    pub host_framebuffer: Option<FramebufferHandle>,
}

/// Normalized [0,1] slider values owned by the host UI. The core only
/// reads them; scaling to pixel space happens per binding.
#[derive(Debug, Clone, Copy)]
pub struct UserControls {
    pub speed: f32,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub mouse_left_x: f32,
    pub mouse_left_y: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Default for UserControls {
    fn default() -> Self {
        Self {
            speed: 0.5,
            mouse_x: 0.5,
            mouse_y: 0.5,
            mouse_left_x: 0.5,
            mouse_left_y: 0.5,
            red: 0.5,
            green: 0.5,
            blue: 0.5,
            alpha: 1.0,
        }
    }
}
