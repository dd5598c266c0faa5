use anyhow::{bail, Context, Result};
use eframe::glow::{self, HasContext};
use glam::{Mat4, Vec2};

use super::shader::{self, ShaderSources};
use crate::data::model::{ChannelLayout, LoadedImage};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    tex_coords: [f32; 2],
}

const VERTICES: [Vertex; 4] = [
    Vertex {
        position: [1.0, 1.0],
        tex_coords: [1.0, 1.0],
    }, // Top-right
    Vertex {
        position: [1.0, -1.0],
        tex_coords: [1.0, 0.0],
    }, // Bottom-right
    Vertex {
        position: [-1.0, -1.0],
        tex_coords: [0.0, 0.0],
    }, // Bottom-left
    Vertex {
        position: [-1.0, 1.0],
        tex_coords: [0.0, 1.0],
    }, // Top-left
];

const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Everything the quad program reads per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadUniforms {
    pub pvm: Mat4,
    /// Normalized image size.
    pub size: Vec2,
    pub zoom: Vec2,
    pub apply_texture: bool,
}

/// GL internal format, pixel format, and whether to splat red into green
/// and blue.
fn texture_formats(layout: ChannelLayout) -> (i32, u32, bool) {
    match layout {
        ChannelLayout::Gray => (glow::R8 as i32, glow::RED, true),
        ChannelLayout::Rgb => (glow::RGB8 as i32, glow::RGB, false),
        ChannelLayout::Rgba => (glow::RGBA8 as i32, glow::RGBA, false),
    }
}

/// The single textured quad and the GL objects behind it.
///
/// Holds at most one texture; uploading a new image frees the old one
/// after the new one exists.
pub struct QuadRenderer {
    program: glow::Program,
    vertex_array: glow::VertexArray,
    vertex_buffer: glow::Buffer,
    index_buffer: glow::Buffer,
    texture: Option<glow::Texture>,
}

impl QuadRenderer {
    pub fn new(gl: &glow::Context, sources: &ShaderSources) -> Result<Self> {
        unsafe {
            let program = shader::compile_program(gl, sources).context("building quad shader")?;

            let vertex_array = gl
                .create_vertex_array()
                .map_err(anyhow::Error::msg)
                .context("creating vertex array")?;
            let vertex_buffer = gl
                .create_buffer()
                .map_err(anyhow::Error::msg)
                .context("creating vertex buffer")?;
            let index_buffer = gl
                .create_buffer()
                .map_err(anyhow::Error::msg)
                .context("creating index buffer")?;

            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&VERTICES),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&INDICES),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<Vertex>() as i32;
            let uv_offset = std::mem::size_of::<[f32; 2]>() as i32;
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, uv_offset);
            gl.enable_vertex_attrib_array(0);
            gl.enable_vertex_attrib_array(1);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            log::debug!("Quad renderer ready");

            Ok(Self {
                program,
                vertex_array,
                vertex_buffer,
                index_buffer,
                texture: None,
            })
        }
    }

    /// Upload `image` as the displayed texture, then free the previous one.
    pub fn upload(&mut self, gl: &glow::Context, image: &LoadedImage) -> Result<()> {
        let expected = image.row_len() * image.height as usize;
        if image.pixels.len() != expected {
            bail!(
                "pixel buffer holds {} bytes, expected {expected}",
                image.pixels.len()
            );
        }

        unsafe {
            let max_size = gl.get_parameter_i32(glow::MAX_TEXTURE_SIZE).max(0) as u32;
            if image.width > max_size || image.height > max_size {
                bail!(
                    "{}x{} exceeds the GPU texture limit of {max_size}",
                    image.width,
                    image.height
                );
            }

            let texture = gl
                .create_texture()
                .map_err(anyhow::Error::msg)
                .context("creating texture")?;
            let (internal_format, format, splat_red) = texture_formats(image.layout);

            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                image.width as i32,
                image.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            if splat_red {
                gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_SWIZZLE_G, glow::RED as i32);
                gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_SWIZZLE_B, glow::RED as i32);
            }
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
            gl.bind_texture(glow::TEXTURE_2D, None);

            if let Some(previous) = self.texture.replace(texture) {
                gl.delete_texture(previous);
                log::debug!("Released previous texture");
            }
        }

        log::debug!(
            "Uploaded {}x{} {} texture",
            image.width,
            image.height,
            image.layout.short_label()
        );
        Ok(())
    }

    /// Draw the quad into the current viewport.
    pub fn paint(&self, gl: &glow::Context, uniforms: &QuadUniforms) {
        let texture = self.texture.filter(|_| uniforms.apply_texture);

        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            gl.use_program(Some(self.program));

            let location = |name: &str| gl.get_uniform_location(self.program, name);
            gl.uniform_matrix_4_f32_slice(
                location("pvm").as_ref(),
                false,
                &uniforms.pvm.to_cols_array(),
            );
            gl.uniform_2_f32(location("size").as_ref(), uniforms.size.x, uniforms.size.y);
            gl.uniform_2_f32(location("zoomX").as_ref(), uniforms.zoom.x, uniforms.zoom.y);
            gl.uniform_1_i32(location("applyTexture").as_ref(), texture.is_some() as i32);

            if let Some(texture) = texture {
                gl.active_texture(glow::TEXTURE0);
                gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                gl.uniform_1_i32(location("photoTexture").as_ref(), 0);
            }

            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_elements(glow::TRIANGLES, INDICES.len() as i32, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);

            if texture.is_some() {
                gl.bind_texture(glow::TEXTURE_2D, None);
            }
        }
    }

    /// Free every GL object. Called once on exit.
    pub fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            if let Some(texture) = self.texture.take() {
                gl.delete_texture(texture);
            }
            gl.delete_buffer(self.vertex_buffer);
            gl.delete_buffer(self.index_buffer);
            gl.delete_vertex_array(self.vertex_array);
            gl.delete_program(self.program);
        }
        log::debug!("Quad renderer destroyed");
    }
}
