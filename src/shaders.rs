//! GLSL ES 3.00 sources for the background program.

pub const RESOLUTION_UNIFORM: &str = "u_resolution";
pub const TIME_UNIFORM: &str = "u_time";

/// Vertices in the oversized triangle emitted by [`VERTEX_SHADER`].
pub const FULLSCREEN_VERTICES: i32 = 3;

/// Emits a single triangle that overdraws the whole clip space; no buffers.
pub const VERTEX_SHADER: &str = r#"#version 300 es
void main() {
    vec2 positions[3] = vec2[3](
        vec2(-1.0, -1.0),
        vec2( 3.0, -1.0),
        vec2(-1.0,  3.0)
    );
    gl_Position = vec4(positions[gl_VertexID], 0.0, 1.0);
}
"#;

/// Dark fbm smoke. Kept in step with [`crate::noise::shade`].
pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
uniform vec2 u_resolution;
uniform float u_time;
out vec4 fragColor;

float hash(vec2 p) {
    vec3 p3 = fract(vec3(p.x, p.y, p.x) * 0.13);
    p3 += dot(p3, p3.yzx + 3.333);
    return fract((p3.x + p3.y) * p3.z);
}

float noise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    vec2 u = f * f * (3.0 - 2.0 * f);
    float a = hash(i);
    float b = hash(i + vec2(1.0, 0.0));
    float c = hash(i + vec2(0.0, 1.0));
    float d = hash(i + vec2(1.0, 1.0));
    return mix(mix(a, b, u.x), mix(c, d, u.x), u.y);
}

float fbm(vec2 p) {
    float value = 0.0;
    float amplitude = 0.5;
    float frequency = 1.0;
    for (int i = 0; i < 5; i++) {
        value += amplitude * noise(p * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
        p += vec2(1.7, 9.2);
    }
    return value;
}

void main() {
    vec2 uv = gl_FragCoord.xy / u_resolution.y;
    float t = u_time * 0.08;

    float n1 = fbm(uv * 3.0 + vec2(t * 0.3, t * 0.2));
    float n2 = fbm(uv * 5.0 - vec2(t * 0.2, t * 0.15) + vec2(n1 * 0.5));
    float n3 = fbm(uv * 2.0 + vec2(n2 * 0.3, n1 * 0.3) + vec2(t * 0.1));

    float pattern = n1 * 0.4 + n2 * 0.35 + n3 * 0.25;

    // near-black base so the shapes only just lift off the page
    float base = 0.02;
    float variation = pattern * 0.12;
    float wisp = smoothstep(0.55, 0.7, n2) * 0.08;

    fragColor = vec4(vec3(base + variation + wisp), 1.0);
}
"#;
