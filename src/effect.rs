//! The animated background: one compiled program and its per-frame inputs.

use crate::clock::FrameClock;
use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::gl::{GlContext, StageKind, Surface};
use crate::shaders::{
    FRAGMENT_SHADER, FULLSCREEN_VERTICES, RESOLUTION_UNIFORM, TIME_UNIFORM, VERTEX_SHADER,
};

type Ctx<S> = <S as Surface>::Context;
type Shader<G> = <G as GlContext>::Shader;
type Program<G> = <G as GlContext>::Program;
type Uniform<G> = <G as GlContext>::Uniform;
type VertexArray<G> = <G as GlContext>::VertexArray;

/// Uniform slots resolved once after link.
struct UniformBindings<U> {
    resolution: Option<U>,
    time: Option<U>,
}

/// A running background on one surface.
///
/// Only exists once both stages compiled and the program linked; every
/// failure on the way is logged where it happens and reported as an
/// [`EffectError`].
pub struct BackgroundEffect<S: Surface> {
    surface: S,
    gl: Ctx<S>,
    program: Program<Ctx<S>>,
    vao: VertexArray<Ctx<S>>,
    uniforms: UniformBindings<Uniform<Ctx<S>>>,
    clock: FrameClock,
    frames: u64,
}

impl<S: Surface> BackgroundEffect<S> {
    pub fn initialize(
        surface: Option<S>,
        window_size: (u32, u32),
        config: &EffectConfig,
    ) -> Result<Self, EffectError> {
        let Some(surface) = surface else {
            log::warn!("bg-shader: no `{}` element, skipping", config.canvas_id);
            return Err(EffectError::SurfaceMissing(config.canvas_id.clone()));
        };
        let Some(gl) = surface.acquire_context() else {
            log::warn!("bg-shader: WebGL2 not available, using solid background");
            return Err(EffectError::ContextUnavailable);
        };

        let (width, height) = apply_size(&surface, &gl, window_size.0, window_size.1);
        log::debug!("bg-shader: surface {width}x{height}");

        // Both stages are compiled so each failure gets its diagnostic.
        let vertex = compile_stage(&gl, StageKind::Vertex, VERTEX_SHADER);
        let fragment = compile_stage(&gl, StageKind::Fragment, FRAGMENT_SHADER);
        let (vertex, fragment) = match (vertex, fragment) {
            (Ok(vertex), Ok(fragment)) => (vertex, fragment),
            (Ok(vertex), Err(err)) => {
                gl.delete_shader(&vertex);
                return Err(err);
            }
            (Err(err), Ok(fragment)) => {
                gl.delete_shader(&fragment);
                return Err(err);
            }
            (Err(err), Err(_)) => return Err(err),
        };

        let program = link_program(&gl, vertex, fragment)?;
        gl.use_program(Some(&program));

        let uniforms = UniformBindings {
            resolution: gl.uniform_location(&program, RESOLUTION_UNIFORM),
            time: gl.uniform_location(&program, TIME_UNIFORM),
        };
        if uniforms.resolution.is_none() || uniforms.time.is_none() {
            log::debug!("bg-shader: uniform optimised out of the program");
        }

        // WebGL2 wants a bound VAO even when no attributes are read.
        let Some(vao) = gl.create_vertex_array() else {
            log::error!("bg-shader: failed to create vertex array");
            gl.use_program(None);
            gl.delete_program(&program);
            return Err(EffectError::Allocation("vertex array"));
        };
        gl.bind_vertex_array(Some(&vao));

        log::info!("bg-shader: running (WebGL2)");
        Ok(Self {
            surface,
            gl,
            program,
            vao,
            uniforms,
            clock: FrameClock::new(),
            frames: 0,
        })
    }

    /// Matches the surface and viewport to the window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = apply_size(&self.surface, &self.gl, width, height);
        log::debug!("bg-shader: resized to {width}x{height}");
    }

    /// Draws one frame at host time `now_secs` and returns the elapsed time
    /// pushed to `u_time`. Scheduling the next frame is the caller's job.
    pub fn render_frame(&mut self, now_secs: f64) -> f32 {
        let time = self.clock.elapsed(now_secs);
        let (width, height) = self.surface.size();

        self.gl
            .uniform2f(self.uniforms.resolution.as_ref(), width as f32, height as f32);
        self.gl.uniform1f(self.uniforms.time.as_ref(), time);
        self.gl.draw_triangles(0, FULLSCREEN_VERTICES);

        self.frames += 1;
        time
    }

    /// Releases the program and vertex array. The surface is left to the page.
    pub fn teardown(self) {
        self.gl.bind_vertex_array(None);
        self.gl.delete_vertex_array(&self.vao);
        self.gl.use_program(None);
        self.gl.delete_program(&self.program);
        log::debug!("bg-shader: released after {} frames", self.frames);
    }

    pub fn size(&self) -> (u32, u32) {
        self.surface.size()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

fn apply_size<S: Surface>(surface: &S, gl: &Ctx<S>, width: u32, height: u32) -> (u32, u32) {
    let width = width.max(1);
    let height = height.max(1);
    surface.set_size(width, height);
    gl.viewport(0, 0, width as i32, height as i32);
    (width, height)
}

/// Compiles one stage; on failure the driver's log is reported and the
/// shader released.
pub fn compile_stage<G: GlContext>(
    gl: &G,
    kind: StageKind,
    source: &str,
) -> Result<Shader<G>, EffectError> {
    let Some(shader) = gl.create_shader(kind) else {
        log::error!("bg-shader: failed to create {kind} shader");
        return Err(EffectError::Allocation("shader"));
    };
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl.compile_status(&shader) {
        return Ok(shader);
    }

    let log = gl.shader_info_log(&shader).unwrap_or_default();
    log::error!("bg-shader: {kind} shader compile error: {log}");
    gl.delete_shader(&shader);
    Err(EffectError::Compile { stage: kind, log })
}

/// Links two compiled stages. The stages are consumed: they are flagged for
/// deletion either way and live on only while attached to the program.
pub fn link_program<G: GlContext>(
    gl: &G,
    vertex: Shader<G>,
    fragment: Shader<G>,
) -> Result<Program<G>, EffectError> {
    let Some(program) = gl.create_program() else {
        log::error!("bg-shader: failed to create program");
        gl.delete_shader(&vertex);
        gl.delete_shader(&fragment);
        return Err(EffectError::Allocation("program"));
    };
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    let linked = gl.link_status(&program);
    gl.delete_shader(&vertex);
    gl.delete_shader(&fragment);
    if linked {
        return Ok(program);
    }

    let log = gl.program_info_log(&program).unwrap_or_default();
    log::error!("bg-shader: program link error: {log}");
    gl.delete_program(&program);
    Err(EffectError::Link(log))
}
