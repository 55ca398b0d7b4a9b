use crate::constants::{bloom_extent, CLEAR_COLOR};
use orbpulse_core::{FrameRenderer, FrameState};
use web_sys as web;

mod helpers;
mod mesh;
mod post;
mod targets;
mod texture;

pub use texture::fetch_bitmap;
use targets::RenderTargets;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    post_groups: post::PostBindGroups,

    orb: mesh::OrbMesh,
    logo: mesh::LogoMesh,
    logo_texture: Option<texture::LogoTexture>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits; older WebGPU implementations reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = helpers::linear_sampler(&device, "linear_sampler");
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(orbpulse_core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = post::build_bind_groups(&device, &post, &linear_sampler, &targets);

        let orb = mesh::OrbMesh::new(&device);
        let logo = mesh::LogoMesh::new(&device);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            post_groups,
            orb,
            logo,
            logo_texture: None,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Upload the decoded logo; the logo draws from the next frame on.
    pub fn set_logo_image(&mut self, bitmap: web::ImageBitmap) {
        self.logo_texture = Some(texture::LogoTexture::upload(
            &self.device,
            &self.queue,
            &self.logo.texture_layout,
            &self.linear_sampler,
            bitmap,
        ));
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            self.post_groups =
                post::build_bind_groups(&self.device, &self.post, &self.linear_sampler, &self.targets);
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    fn draw(&mut self, frame: &FrameState) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.orb.write(&self.queue, &frame.orb);
        let logo_texture = match (&frame.logo, &self.logo_texture) {
            (Some(block), Some(tex)) => {
                self.logo.write(&self.queue, block);
                Some(&tex.bind_group)
            }
            _ => None,
        };
        let (bw, bh) = bloom_extent(self.width, self.height);
        post::write_post_uniforms(&self.queue, &self.post.buffers, [bw as f32, bh as f32], frame.bloom);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.orb.draw(&mut rpass);
            if let Some(tex) = logo_texture {
                self.logo.draw(&mut rpass, tex);
            }
        }

        let groups = &self.post_groups;
        // bright pass: hdr -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &groups.bright,
            None,
        );
        // blur horizontal: bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &groups.blur_h,
            None,
        );
        // blur vertical: bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &groups.blur_v,
            None,
        );
        // composite: hdr + bloom_a -> swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &groups.composite_scene,
            Some(&groups.composite_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl FrameRenderer for GpuState<'_> {
    fn render(&mut self, frame: &FrameState) -> anyhow::Result<()> {
        match self.draw(frame) {
            Ok(()) => Ok(()),
            // the surface is reconfigured and the frame skipped
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("surface error: {:?}", e)),
        }
    }
}
