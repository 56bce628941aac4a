//! The slice of the WebGL2 API the effect needs.
//!
//! The effect is generic over [`Surface`] so it can be driven by a real canvas
//! in the browser and by a recording double in host tests.

use std::fmt;

/// Which half of a shader program a stage is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

pub trait GlContext {
    type Shader;
    type Program;
    type Uniform;
    type VertexArray;

    fn create_shader(&self, kind: StageKind) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: Option<&Self::Program>);
    fn delete_program(&self, program: &Self::Program);

    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Uniform>;
    fn uniform2f(&self, location: Option<&Self::Uniform>, x: f32, y: f32);
    fn uniform1f(&self, location: Option<&Self::Uniform>, x: f32);

    fn create_vertex_array(&self) -> Option<Self::VertexArray>;
    fn bind_vertex_array(&self, vao: Option<&Self::VertexArray>);
    fn delete_vertex_array(&self, vao: &Self::VertexArray);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// `drawArrays(TRIANGLES, first, count)`.
    fn draw_triangles(&self, first: i32, count: i32);
}

/// The drawing target: owns its pixel size and hands out a context.
pub trait Surface {
    type Context: GlContext;

    fn acquire_context(&self) -> Option<Self::Context>;
    fn set_size(&self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
}
