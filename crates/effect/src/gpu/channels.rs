//! Per-channel texture cache. Host textures can live on padded
//! allocations whose wrap behavior breaks shaders that rely on REPEAT
//! sampling, so each active channel mirrors its host texture into a
//! locally owned texture of exactly the reported size. The copy runs
//! every frame; allocation only happens when the reported size changes,
//! which amortizes the expensive part across frames.

use tracing::debug;

use crate::types::{FramebufferHandle, HostTexture, TextureHandle, CHANNEL_COUNT};

use super::binding::RenderContext;

#[derive(Debug, Default, Clone, Copy)]
struct ChannelSlot {
    width: u32,
    height: u32,
    texture: Option<TextureHandle>,
}

#[derive(Debug, Default)]
pub(crate) struct ChannelCache {
    slots: [ChannelSlot; CHANNEL_COUNT],
}

impl ChannelCache {
    /// Returns a texture handle mirroring `source`, recreating the
    /// cached texture first if the host-reported size changed. The host
    /// texture is blitted into the cache texture every call.
    pub fn ensure(
        &mut self,
        ctx: &mut dyn RenderContext,
        channel: usize,
        source: &HostTexture,
        host_framebuffer: Option<FramebufferHandle>,
    ) -> TextureHandle {
        let slot = &mut self.slots[channel];

        if slot.width != source.width || slot.height != source.height {
            if let Some(stale) = slot.texture.take() {
                debug!(
                    channel,
                    old_width = slot.width,
                    old_height = slot.height,
                    new_width = source.width,
                    new_height = source.height,
                    "channel texture size changed; dropping cached texture"
                );
                ctx.delete_texture(stale);
            }
            slot.width = source.width;
            slot.height = source.height;
        }

        let texture = match slot.texture {
            Some(texture) => texture,
            None => {
                let texture = ctx.create_texture(source.width, source.height);
                slot.texture = Some(texture);
                texture
            }
        };

        ctx.blit_texture(source, texture, host_framebuffer);
        texture
    }

    /// Last size reported by the host for this channel, if any texture
    /// has ever arrived on it.
    pub fn resolution(&self, channel: usize) -> Option<(f32, f32)> {
        let slot = self.slots[channel];
        (slot.width > 0 && slot.height > 0).then(|| (slot.width as f32, slot.height as f32))
    }

    /// Destroys all cached textures and forgets the recorded sizes.
    /// Runs unconditionally on every successful load and at teardown.
    pub fn invalidate_all(&mut self, ctx: &mut dyn RenderContext) {
        for slot in &mut self.slots {
            if let Some(texture) = slot.texture.take() {
                ctx.delete_texture(texture);
            }
            slot.width = 0;
            slot.height = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::testsupport::{CtxOp, FakeContext};

    fn host(width: u32, height: u32) -> HostTexture {
        HostTexture::whole(TextureHandle(99), width, height)
    }

    #[test]
    fn reuses_cached_texture_while_size_is_stable() {
        let mut ctx = FakeContext::new();
        let mut cache = ChannelCache::default();

        let first = cache.ensure(&mut ctx, 0, &host(256, 256), None);
        let second = cache.ensure(&mut ctx, 0, &host(256, 256), None);
        assert_eq!(first, second);
        assert_eq!(ctx.created.len(), 1);
        // The mirror blit still runs every frame.
        assert_eq!(
            ctx.ops
                .iter()
                .filter(|op| matches!(op, CtxOp::Blit { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn size_change_destroys_and_recreates() {
        let mut ctx = FakeContext::new();
        let mut cache = ChannelCache::default();

        let old = cache.ensure(&mut ctx, 0, &host(256, 256), None);
        let new = cache.ensure(&mut ctx, 0, &host(512, 256), None);
        assert_ne!(old, new);
        assert_eq!(ctx.deleted, vec![old]);
        assert_eq!(ctx.created.last(), Some(&(new, 512, 256)));
        assert_eq!(cache.resolution(0), Some((512.0, 256.0)));
    }

    #[test]
    fn channels_are_independent() {
        let mut ctx = FakeContext::new();
        let mut cache = ChannelCache::default();

        let a = cache.ensure(&mut ctx, 0, &host(128, 128), None);
        let b = cache.ensure(&mut ctx, 1, &host(64, 64), None);
        assert_ne!(a, b);
        cache.ensure(&mut ctx, 1, &host(32, 32), None);
        // Channel 0 untouched by channel 1's resize.
        assert_eq!(ctx.deleted, vec![b]);
        assert_eq!(cache.resolution(0), Some((128.0, 128.0)));
    }

    #[test]
    fn invalidate_all_deletes_everything() {
        let mut ctx = FakeContext::new();
        let mut cache = ChannelCache::default();

        let a = cache.ensure(&mut ctx, 0, &host(128, 128), None);
        let b = cache.ensure(&mut ctx, 1, &host(64, 64), None);
        cache.invalidate_all(&mut ctx);
        assert!(ctx.deleted.contains(&a) && ctx.deleted.contains(&b));
        assert_eq!(cache.resolution(0), None);
        assert_eq!(cache.resolution(1), None);
    }
}
