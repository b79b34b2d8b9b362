//! Runtime core of the shader video effect: loads a fragment shader in
//! either community dialect, resolves its uniform surface once, then
//! drives time, mouse, resolution, date, colour, and channel-texture
//! uniforms every frame through a narrow GPU binding contract supplied
//! by the host glue.

pub mod errors;
pub mod gpu;
pub mod types;

pub use errors::{FrameError, LoadError};
pub use gpu::{
    GpuBinding, LoadMode, LoadState, LogicalBinding, RenderContext, ShaderIdentity, ShaderSession,
    UniformBindings,
};
pub use types::{
    FrameInput, FramebufferHandle, HostTexture, TextureHandle, UniformLocation, UserControls,
    ACTIVE_CHANNELS, CHANNEL_COUNT,
};
