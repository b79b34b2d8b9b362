//! The narrow contracts the core expects from the host's GL layer. The
//! core never issues raw GL; everything flows through these two traits,
//! which keeps the resolver, cache, and frame driver testable with
//! in-memory fakes.

use crate::types::{FramebufferHandle, HostTexture, TextureHandle, UniformLocation};

/// One compiled shader program plus its uniform interface.
///
/// `compile` replaces the current program only on success: when it
/// returns `false` the implementation must have released any partial
/// objects and left a previously compiled program intact, so a failed
/// load keeps the prior shader rendering.
pub trait GpuBinding {
    fn compile(&mut self, vertex: &str, fragment: &str) -> bool;

    /// Whether a program is compiled, linked, and usable.
    fn is_ready(&self) -> bool;

    fn bind_shader(&mut self) -> bool;
    fn unbind_shader(&mut self);

    /// Looks a uniform up by name in the bound program.
    fn find_uniform(&mut self, name: &str) -> Option<UniformLocation>;

    /// Releases the program and all GL objects it owns.
    fn free_resources(&mut self);

    // Uniform pushes. Valid only while the program is bound.
    fn set_f32(&mut self, location: UniformLocation, value: f32);
    fn set_vec2(&mut self, location: UniformLocation, value: [f32; 2]);
    fn set_vec3(&mut self, location: UniformLocation, value: [f32; 3]);
    fn set_vec4(&mut self, location: UniformLocation, value: [f32; 4]);
    fn set_f32_array(&mut self, location: UniformLocation, values: &[f32]);
    fn set_vec3_array(&mut self, location: UniformLocation, values: &[[f32; 3]]);
    /// Points a sampler uniform at a texture unit.
    fn set_sampler(&mut self, location: UniformLocation, unit: i32);
}

/// Frame-level GL state owned by the host: context, viewport, textures,
/// and the full-screen quad draw.
pub trait RenderContext {
    /// Whether a GL context is current. Checked at the top of every
    /// frame; a lost context skips the frame without mutating state.
    fn has_context(&self) -> bool;

    /// The live viewport size in pixels. Read every frame rather than
    /// cached because hosts resize between frames.
    fn viewport(&self) -> (f32, f32);

    /// Creates an RGBA texture of exactly `width`×`height` with REPEAT
    /// wrap on S/T/R and linear min/mag filtering.
    fn create_texture(&mut self, width: u32, height: u32) -> TextureHandle;

    fn delete_texture(&mut self, handle: TextureHandle);

    /// Renders `source` into `target` through an internal framebuffer,
    /// sampling only the host texture's valid coordinate rectangle
    /// (`max_s`/`max_t`). Rebinds `host_framebuffer` (or the default
    /// framebuffer) afterwards.
    fn blit_texture(
        &mut self,
        source: &HostTexture,
        target: TextureHandle,
        host_framebuffer: Option<FramebufferHandle>,
    );

    fn bind_texture(&mut self, unit: u32, handle: TextureHandle);
    fn unbind_texture(&mut self, unit: u32);

    /// Issues the full-screen quad draw for the bound program.
    fn draw_quad(&mut self);
}
