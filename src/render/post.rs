use super::helpers;
use orbpulse_core::BloomSettings;

/// Matches `PostParams` in post.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) threshold: f32,
    pub(crate) strength: f32,
    pub(crate) radius: f32,
    pub(crate) _pad: f32,
}

/// One uniform buffer per pass so every pass sees its own values within a
/// single submission.
pub(crate) struct PostBuffers {
    bright: wgpu::Buffer,
    blur_h: wgpu::Buffer,
    blur_v: wgpu::Buffer,
    composite: wgpu::Buffer,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) buffers: PostBuffers,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

pub(crate) struct PostBindGroups {
    pub(crate) bright: wgpu::BindGroup,
    pub(crate) blur_h: wgpu::BindGroup,
    pub(crate) blur_v: wgpu::BindGroup,
    pub(crate) composite_scene: wgpu::BindGroup,
    pub(crate) composite_bloom: wgpu::BindGroup,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let [tex, sampler] = helpers::texture_sampler_entries();
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            tex,
            sampler,
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &helpers::texture_sampler_entries(),
    });
    let size = std::mem::size_of::<PostUniforms>();
    let buffers = PostBuffers {
        bright: helpers::uniform_buffer(device, "post_bright", size),
        blur_h: helpers::uniform_buffer(device, "post_blur_h", size),
        blur_v: helpers::uniform_buffer(device, "post_blur_v", size),
        composite: helpers::uniform_buffer(device, "post_composite", size),
    };
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline =
        helpers::make_post_pipeline(device, &pl_single, post_shader, "fs_bright", helpers::HDR_FORMAT, None);
    let blur_pipeline =
        helpers::make_post_pipeline(device, &pl_single, post_shader, "fs_blur", helpers::HDR_FORMAT, None);
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        buffers,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

fn source_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: Option<&wgpu::Buffer>,
) -> wgpu::BindGroup {
    let mut entries = vec![
        wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(view),
        },
        wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::Sampler(sampler),
        },
    ];
    if let Some(buf) = uniforms {
        entries.push(wgpu::BindGroupEntry {
            binding: 2,
            resource: buf.as_entire_binding(),
        });
    }
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &entries,
    })
}

/// Bind groups reference target views, so they are rebuilt on every resize.
pub(crate) fn build_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    targets: &super::targets::RenderTargets,
) -> PostBindGroups {
    let b = &post.buffers;
    PostBindGroups {
        bright: source_group(device, "bg_bright", &post.bgl0, &targets.hdr_view, sampler, Some(&b.bright)),
        blur_h: source_group(device, "bg_blur_h", &post.bgl0, &targets.bloom_a_view, sampler, Some(&b.blur_h)),
        blur_v: source_group(device, "bg_blur_v", &post.bgl0, &targets.bloom_b_view, sampler, Some(&b.blur_v)),
        composite_scene: source_group(
            device,
            "bg_composite_scene",
            &post.bgl0,
            &targets.hdr_view,
            sampler,
            Some(&b.composite),
        ),
        composite_bloom: source_group(device, "bg_composite_bloom", &post.bgl1, &targets.bloom_a_view, sampler, None),
    }
}

/// Upload this frame's parameters for all four passes.
pub(crate) fn write_post_uniforms(queue: &wgpu::Queue, buffers: &PostBuffers, bloom_res: [f32; 2], bloom: BloomSettings) {
    let base = PostUniforms {
        resolution: bloom_res,
        blur_dir: [0.0, 0.0],
        threshold: bloom.threshold,
        strength: bloom.strength,
        radius: bloom.radius,
        _pad: 0.0,
    };
    let h = PostUniforms {
        blur_dir: [1.0, 0.0],
        ..base
    };
    let v = PostUniforms {
        blur_dir: [0.0, 1.0],
        ..base
    };
    queue.write_buffer(&buffers.bright, 0, bytemuck::bytes_of(&base));
    queue.write_buffer(&buffers.blur_h, 0, bytemuck::bytes_of(&h));
    queue.write_buffer(&buffers.blur_v, 0, bytemuck::bytes_of(&v));
    queue.write_buffer(&buffers.composite, 0, bytemuck::bytes_of(&base));
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
