//! GPU-facing half of the runtime: the narrow binding contracts, the
//! uniform resolver, the channel texture cache, the session clock, and
//! the load/frame state machine that ties them together.

pub mod binding;
pub(crate) mod channels;
pub mod state;
pub(crate) mod timeline;
pub mod uniforms;

pub use binding::{GpuBinding, RenderContext};
pub use state::{LoadMode, LoadState, ShaderIdentity, ShaderSession};
pub use uniforms::{LogicalBinding, UniformBindings};
