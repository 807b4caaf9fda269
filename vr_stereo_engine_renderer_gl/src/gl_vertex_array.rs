/// GlVertexArray - GPU copy of a VertexData (one VBO per element + index buffer)

use std::rc::Rc;

use glow::HasContext;
use vr_stereo_engine::stereo3d::resource::VertexData;
use vr_stereo_engine::stereo3d::{Error, Result};
use vr_stereo_engine::engine_err;

use crate::gl_shader::attribute_location;

const SOURCE: &str = "stereo3d::gl::VertexArray";

/// Vertex array object with its buffers
pub struct GlVertexArray {
    gl: Rc<glow::Context>,
    vertex_array: glow::NativeVertexArray,
    buffers: Vec<glow::NativeBuffer>,
    index_buffer: glow::NativeBuffer,
    index_count: usize,
}

impl GlVertexArray {
    /// Upload vertex data
    ///
    /// Each element goes to its own buffer bound at the semantic's fixed
    /// attribute location.
    pub fn upload(gl: Rc<glow::Context>, data: &VertexData) -> Result<Self> {
        unsafe {
            let vertex_array = gl.create_vertex_array().map_err(|msg| {
                engine_err!(Error::BackendError, SOURCE, "glCreateVertexArray failed: {}", msg)
            })?;
            gl.bind_vertex_array(Some(vertex_array));

            let mut buffers = Vec::with_capacity(data.elements().len());
            for element in data.elements() {
                let buffer = match gl.create_buffer() {
                    Ok(buffer) => buffer,
                    Err(msg) => {
                        gl.bind_vertex_array(None);
                        for buffer in buffers {
                            gl.delete_buffer(buffer);
                        }
                        gl.delete_vertex_array(vertex_array);
                        return Err(engine_err!(Error::BackendError, SOURCE, "glCreateBuffer failed: {}", msg));
                    }
                };
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
                gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(element.data()), glow::STATIC_DRAW);

                let location = attribute_location(element.semantic());
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, element.components() as i32, glow::FLOAT, false, 0, 0);
                buffers.push(buffer);
            }

            let index_buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(msg) => {
                    gl.bind_vertex_array(None);
                    for buffer in buffers {
                        gl.delete_buffer(buffer);
                    }
                    gl.delete_vertex_array(vertex_array);
                    return Err(engine_err!(Error::BackendError, SOURCE, "glCreateBuffer failed: {}", msg));
                }
            };
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(data.indices()), glow::STATIC_DRAW);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl,
                vertex_array,
                buffers,
                index_buffer,
                index_count: data.indices().len(),
            })
        }
    }

    /// Draw the indexed triangles
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vertex_array));
            self.gl.draw_elements(glow::TRIANGLES, self.index_count as i32, glow::UNSIGNED_INT, 0);
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
            for buffer in self.buffers.drain(..) {
                self.gl.delete_buffer(buffer);
            }
            self.gl.delete_buffer(self.index_buffer);
        }
    }
}
