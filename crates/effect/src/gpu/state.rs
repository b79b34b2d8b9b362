//! Session state for one plugin instance: the load/reload orchestrator
//! and the per-frame uniform driver. All mutable state (resolved
//! locations, cached textures, clock baseline) lives in [`ShaderSession`]
//! and is threaded by exclusive reference through both operations; there
//! are no ambient globals.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use dialect::{classify_and_transform, read_shader_source, LastPathStore, VERTEX_PASSTHROUGH};

use crate::errors::{FrameError, LoadError};
use crate::types::{FrameInput, TextureHandle, UserControls, ACTIVE_CHANNELS, CHANNEL_COUNT};

use super::binding::{GpuBinding, RenderContext};
use super::channels::ChannelCache;
use super::timeline::SessionClock;
use super::uniforms::{date_vector, UniformBindings};

/// Whether a load request for the currently loaded file should recompile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Same-name requests are a no-op; hosts re-present the active path
    /// every frame and must not trigger a recompile each time.
    IfChanged,
    /// Recompile even when the name matches (user-initiated reload).
    Force,
}

/// Identity of the currently bound shader file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderIdentity {
    /// File stem, used for "is this a different shader" checks.
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been loaded yet (or the session was torn down).
    Unloaded,
    Loaded(ShaderIdentity),
    /// A load failed and there was no prior shader to keep.
    LoadFailed,
}

/// Per-instance session: owns the resolved uniform table, the channel
/// texture cache, and the simulation clock for the loaded shader.
pub struct ShaderSession {
    state: LoadState,
    bindings: UniformBindings,
    clock: SessionClock,
    channels: ChannelCache,
    store: Option<LastPathStore>,
}

impl ShaderSession {
    pub fn new() -> Self {
        Self {
            state: LoadState::Unloaded,
            bindings: UniformBindings::default(),
            clock: SessionClock::new(Instant::now()),
            channels: ChannelCache::default(),
            store: None,
        }
    }

    /// A session that persists the last good shader path through `store`.
    pub fn with_store(store: LastPathStore) -> Self {
        let mut session = Self::new();
        session.store = Some(store);
        session
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn identity(&self) -> Option<&ShaderIdentity> {
        match &self.state {
            LoadState::Loaded(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    /// Whether the loaded shader samples the given input channel, for
    /// hosts that report input connector usage.
    pub fn input_in_use(&self, channel: usize) -> bool {
        self.is_loaded()
            && channel < CHANNEL_COUNT
            && self.bindings.channel_textures[channel].is_some()
    }

    pub fn bindings(&self) -> &UniformBindings {
        &self.bindings
    }

    /// Loads (or reloads) a shader file as one atomic operation: read,
    /// classify/transform, compile against the fixed vertex shim,
    /// resolve uniforms, invalidate texture caches, reset the clock,
    /// persist the path. Every failure leaves the previous shader (and
    /// session state) untouched.
    pub fn load_shader(
        &mut self,
        gpu: &mut dyn GpuBinding,
        ctx: &mut dyn RenderContext,
        path: &Path,
        mode: LoadMode,
    ) -> Result<(), LoadError> {
        let name = shader_name(path);
        if mode == LoadMode::IfChanged {
            if let LoadState::Loaded(identity) = &self.state {
                if identity.name == name {
                    return Ok(());
                }
            }
        }

        match self.try_load(gpu, ctx, path, name) {
            Ok(()) => Ok(()),
            Err(err) => {
                // A failed load with no prior shader means nothing is bound.
                if !self.is_loaded() {
                    self.state = LoadState::LoadFailed;
                }
                Err(err)
            }
        }
    }

    fn try_load(
        &mut self,
        gpu: &mut dyn GpuBinding,
        ctx: &mut dyn RenderContext,
        path: &Path,
        name: String,
    ) -> Result<(), LoadError> {
        let raw = read_shader_source(path)?;
        let (fragment, dialect) = classify_and_transform(&raw)?;
        debug!(shader = %name, ?dialect, "transformed shader source");

        // The binding rolls a failed compile back to the prior program.
        if !gpu.compile(VERTEX_PASSTHROUGH, &fragment) {
            return Err(LoadError::Compile(path.to_path_buf()));
        }
        if !gpu.is_ready() || !gpu.bind_shader() {
            return Err(LoadError::Bind(path.to_path_buf()));
        }

        self.bindings = UniformBindings::resolve(gpu);
        gpu.unbind_shader();

        // Cached textures belong to the replaced program's channel usage.
        self.channels.invalidate_all(ctx);
        self.clock.reset(Instant::now());
        self.state = LoadState::Loaded(ShaderIdentity {
            name: name.clone(),
            path: path.to_path_buf(),
        });

        if let Some(store) = &self.store {
            if let Err(err) = store.write(path) {
                warn!(path = %path.display(), error = %err, "failed to persist shader path");
            }
        }

        info!(shader = %name, ?dialect, "shader loaded");
        Ok(())
    }

    /// Entry point for a completed file-selection dialog: loads the
    /// chosen path only when it names a different shader than the one
    /// currently bound. Returns whether a new shader was loaded.
    pub fn apply_selection(
        &mut self,
        gpu: &mut dyn GpuBinding,
        ctx: &mut dyn RenderContext,
        path: &Path,
    ) -> Result<bool, LoadError> {
        let name = shader_name(path);
        if let LoadState::Loaded(identity) = &self.state {
            if identity.name == name {
                return Ok(false);
            }
        }
        self.load_shader(gpu, ctx, path, LoadMode::IfChanged)?;
        Ok(true)
    }

    /// Runs one frame: mirrors host textures into the channel cache,
    /// advances the clock, pushes every resolved uniform, draws the
    /// quad, and restores texture/program bind state in reverse order.
    ///
    /// With no shader loaded this is a no-op. A missing context fails
    /// the frame without touching any state; the next frame re-checks.
    pub fn advance_frame(
        &mut self,
        gpu: &mut dyn GpuBinding,
        ctx: &mut dyn RenderContext,
        input: &FrameInput,
        controls: &UserControls,
        now: Instant,
    ) -> Result<(), FrameError> {
        if !ctx.has_context() {
            return Err(FrameError::NoActiveContext);
        }
        if !self.is_loaded() {
            return Ok(());
        }

        // Live viewport, not the size recorded at initialization.
        let (vp_width, vp_height) = ctx.viewport();

        // Mirror host textures first so the draw below binds valid handles.
        let mut channel_textures: [Option<TextureHandle>; ACTIVE_CHANNELS] =
            [None; ACTIVE_CHANNELS];
        for channel in 0..ACTIVE_CHANNELS {
            if self.bindings.channel_textures[channel].is_none() {
                continue;
            }
            if let Some(host) = &input.textures[channel] {
                channel_textures[channel] =
                    Some(self.channels.ensure(ctx, channel, host, input.host_framebuffer));
            }
        }

        let time = self.clock.advance(now, controls.speed);
        let date = date_vector();

        let mut channel_resolutions = [[0.0, 0.0, 1.0]; CHANNEL_COUNT];
        for channel in 0..ACTIVE_CHANNELS {
            if let Some((width, height)) = self.channels.resolution(channel) {
                channel_resolutions[channel] = [width, height, 1.0];
            }
        }
        // Reserved channels mirror the viewport every frame.
        channel_resolutions[2] = [vp_width, vp_height, 1.0];
        channel_resolutions[3] = [vp_width, vp_height, 1.0];

        gpu.bind_shader();

        for channel in 0..ACTIVE_CHANNELS {
            if let Some(location) = self.bindings.channel_textures[channel] {
                if channel_textures[channel].is_some() {
                    gpu.set_sampler(location, channel as i32);
                }
            }
        }

        if let Some(location) = self.bindings.time {
            gpu.set_f32(location, time);
        }
        if let Some(location) = self.bindings.resolution_2d {
            gpu.set_vec2(location, [vp_width, vp_height]);
        }
        if let Some(location) = self.bindings.mouse_2d {
            gpu.set_vec2(location, [controls.mouse_x, controls.mouse_y]);
        }
        if let Some(location) = self.bindings.surface_size {
            gpu.set_vec2(
                location,
                [
                    controls.mouse_left_x * vp_width,
                    controls.mouse_left_y * vp_height,
                ],
            );
        }
        if let Some(location) = self.bindings.mouse_4d {
            gpu.set_vec4(
                location,
                [
                    controls.mouse_x * vp_width,
                    controls.mouse_y * vp_height,
                    controls.mouse_left_x * vp_width,
                    controls.mouse_left_y * vp_height,
                ],
            );
        }
        if let Some(location) = self.bindings.resolution_3d {
            gpu.set_vec3(location, [vp_width, vp_height, 1.0]);
        }
        if let Some(location) = self.bindings.channel_resolutions {
            gpu.set_vec3_array(location, &channel_resolutions);
        }
        if let Some(location) = self.bindings.date {
            gpu.set_vec4(location, date);
        }
        if let Some(location) = self.bindings.channel_times {
            gpu.set_f32_array(location, &[time; CHANNEL_COUNT]);
        }
        if let Some(location) = self.bindings.input_colour {
            gpu.set_vec4(
                location,
                [controls.red, controls.green, controls.blue, controls.alpha],
            );
        }

        for channel in 0..ACTIVE_CHANNELS {
            if let Some(texture) = channel_textures[channel] {
                ctx.bind_texture(channel as u32, texture);
            }
        }

        ctx.draw_quad();

        // Unbind in reverse unit order, program last, so no bind state
        // leaks into the host's own draws.
        for channel in (0..ACTIVE_CHANNELS).rev() {
            if channel_textures[channel].is_some() {
                ctx.unbind_texture(channel as u32);
            }
        }
        gpu.unbind_shader();

        Ok(())
    }

    /// Tears the session down: frees the program and cached textures,
    /// persists the last good path, and clears the identity.
    pub fn free(&mut self, gpu: &mut dyn GpuBinding, ctx: &mut dyn RenderContext) {
        if self.is_loaded() {
            gpu.unbind_shader();
        }
        gpu.free_resources();
        self.channels.invalidate_all(ctx);

        if let (Some(store), LoadState::Loaded(identity)) = (&self.store, &self.state) {
            if let Err(err) = store.write(&identity.path) {
                warn!(path = %identity.path.display(), error = %err, "failed to persist shader path at teardown");
            }
        }

        self.bindings = UniformBindings::default();
        self.state = LoadState::Unloaded;
    }
}

impl Default for ShaderSession {
    fn default() -> Self {
        Self::new()
    }
}

fn shader_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
