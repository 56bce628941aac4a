use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::gl::{GlContext, StageKind, Surface};

impl GlContext for GL {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Uniform = WebGlUniformLocation;
    type VertexArray = WebGlVertexArrayObject;

    fn create_shader(&self, kind: StageKind) -> Option<WebGlShader> {
        let kind = match kind {
            StageKind::Vertex => GL::VERTEX_SHADER,
            StageKind::Fragment => GL::FRAGMENT_SHADER,
        };
        GL::create_shader(self, kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        GL::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        GL::compile_shader(self, shader);
    }

    fn compile_status(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        GL::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        GL::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        GL::attach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        GL::link_program(self, program);
    }

    fn link_status(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        GL::use_program(self, program);
    }

    fn delete_program(&self, program: &WebGlProgram) {
        GL::delete_program(self, Some(program));
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn uniform2f(&self, location: Option<&WebGlUniformLocation>, x: f32, y: f32) {
        GL::uniform2f(self, location, x, y);
    }

    fn uniform1f(&self, location: Option<&WebGlUniformLocation>, x: f32) {
        GL::uniform1f(self, location, x);
    }

    fn create_vertex_array(&self) -> Option<WebGlVertexArrayObject> {
        GL::create_vertex_array(self)
    }

    fn bind_vertex_array(&self, vao: Option<&WebGlVertexArrayObject>) {
        GL::bind_vertex_array(self, vao);
    }

    fn delete_vertex_array(&self, vao: &WebGlVertexArrayObject) {
        GL::delete_vertex_array(self, Some(vao));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        GL::viewport(self, x, y, width, height);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.draw_arrays(GL::TRIANGLES, first, count);
    }
}

impl Surface for HtmlCanvasElement {
    type Context = GL;

    fn acquire_context(&self) -> Option<GL> {
        self.get_context("webgl2").ok()??.dyn_into::<GL>().ok()
    }

    fn set_size(&self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }

    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}
