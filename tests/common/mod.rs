//! Recording doubles for the GL seam plus a thread-local log capture.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Once;

use bg_shader::{GlContext, StageKind, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(StageKind),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformLocation(String),
    Uniform2f(String, f32, f32),
    Uniform1f(String, f32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    Viewport(i32, i32, i32, i32),
    DrawTriangles(i32, i32),
}

#[derive(Debug, Clone)]
pub struct MockShader {
    pub id: u32,
    pub kind: StageKind,
}

/// Driver behaviour the mock reports back.
#[derive(Debug, Clone, Copy)]
pub struct Driver {
    pub vertex_compiles: bool,
    pub fragment_compiles: bool,
    pub links: bool,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            vertex_compiles: true,
            fragment_compiles: true,
            links: true,
        }
    }
}

#[derive(Clone, Default)]
pub struct MockGl {
    pub driver: Driver,
    calls: Rc<RefCell<Vec<Call>>>,
    next_id: Rc<Cell<u32>>,
}

impl MockGl {
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn draws(&self) -> usize {
        self.count(|call| matches!(call, Call::DrawTriangles(..)))
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    /// Every `u_time` upload, in order.
    pub fn time_uploads(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Uniform1f(name, t) if name == "u_time" => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn resolution_uploads(&self) -> Vec<(f32, f32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Uniform2f(name, x, y) if name == "u_resolution" => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GlContext for MockGl {
    type Shader = MockShader;
    type Program = u32;
    type Uniform = String;
    type VertexArray = u32;

    fn create_shader(&self, kind: StageKind) -> Option<MockShader> {
        self.record(Call::CreateShader(kind));
        Some(MockShader { id: self.id(), kind })
    }

    fn shader_source(&self, _shader: &MockShader, _source: &str) {}

    fn compile_shader(&self, shader: &MockShader) {
        self.record(Call::CompileShader(shader.id));
    }

    fn compile_status(&self, shader: &MockShader) -> bool {
        match shader.kind {
            StageKind::Vertex => self.driver.vertex_compiles,
            StageKind::Fragment => self.driver.fragment_compiles,
        }
    }

    fn shader_info_log(&self, shader: &MockShader) -> Option<String> {
        Some(format!("ERROR: 0:1: {} stage rejected", shader.kind))
    }

    fn delete_shader(&self, shader: &MockShader) {
        self.record(Call::DeleteShader(shader.id));
    }

    fn create_program(&self) -> Option<u32> {
        let id = self.id();
        self.record(Call::CreateProgram(id));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &MockShader) {
        self.record(Call::AttachShader(*program, shader.id));
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
    }

    fn link_status(&self, _program: &u32) -> bool {
        self.driver.links
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        Some("error: varying mismatch".to_string())
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(Call::UseProgram(program.copied()));
    }

    fn delete_program(&self, program: &u32) {
        self.record(Call::DeleteProgram(*program));
    }

    fn uniform_location(&self, _program: &u32, name: &str) -> Option<String> {
        self.record(Call::UniformLocation(name.to_string()));
        Some(name.to_string())
    }

    fn uniform2f(&self, location: Option<&String>, x: f32, y: f32) {
        let name = location.cloned().unwrap_or_default();
        self.record(Call::Uniform2f(name, x, y));
    }

    fn uniform1f(&self, location: Option<&String>, x: f32) {
        let name = location.cloned().unwrap_or_default();
        self.record(Call::Uniform1f(name, x));
    }

    fn create_vertex_array(&self) -> Option<u32> {
        let id = self.id();
        self.record(Call::CreateVertexArray(id));
        Some(id)
    }

    fn bind_vertex_array(&self, vao: Option<&u32>) {
        self.record(Call::BindVertexArray(vao.copied()));
    }

    fn delete_vertex_array(&self, vao: &u32) {
        self.record(Call::DeleteVertexArray(*vao));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangles(first, count));
    }
}

/// A canvas stand-in; `gl` is `None` when the context is unavailable.
pub struct MockSurface {
    pub gl: Option<MockGl>,
    size: Cell<(u32, u32)>,
    pub context_requests: Cell<u32>,
}

impl MockSurface {
    pub fn new(gl: Option<MockGl>) -> Self {
        Self {
            gl,
            size: Cell::new((300, 150)),
            context_requests: Cell::new(0),
        }
    }
}

impl Surface for MockSurface {
    type Context = MockGl;

    fn acquire_context(&self) -> Option<MockGl> {
        self.context_requests.set(self.context_requests.get() + 1);
        self.gl.clone()
    }

    fn set_size(&self, width: u32, height: u32) {
        self.size.set((width, height));
    }

    fn size(&self) -> (u32, u32) {
        self.size.get()
    }
}

// Each test runs on its own thread, so records never cross tests.
thread_local! {
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger already set");
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

pub fn logged() -> Vec<(log::Level, String)> {
    RECORDS.with(|records| records.borrow().clone())
}

pub fn logged_at(level: log::Level) -> Vec<String> {
    logged()
        .into_iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message)
        .collect()
}
