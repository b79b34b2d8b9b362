//! Classifies raw fragment-shader text as one of the two community
//! dialects and rewrites it so that both present the same uniform surface
//! to the compiler. Sandbox-style shaders declare their own uniforms, so
//! only the extra `inputColour` declaration is prepended. Toy-style
//! shaders receive the full implicit uniform block, and revised-entry
//! shaders additionally get a `main` shim that forwards to `mainImage`.
//!
//! Everything here is plain substring matching and concatenation. A
//! Sandbox shader that carries `uniform float time;` inside a comment is
//! still classified Sandbox, and `fragColor` inside a comment passes the
//! sanity check. That looseness is load-bearing: existing shader files
//! depend on it, so tightening it would be a behavior change.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialectError {
    #[error("source contains neither 'fragColor' nor 'gl_FragColor'; not a fragment shader")]
    NotAShader,
}

/// Which entry-point convention a Toy-style shader uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToyEntryPoint {
    /// The shader defines `void main` itself.
    Legacy,
    /// The shader defines `void mainImage(out vec4, in vec2)` and needs the shim.
    Revised,
}

/// Source convention detected for a loaded shader. Determined once per
/// load and never re-derived mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderDialect {
    /// GLSL Sandbox style: uniforms declared in the source itself.
    Sandbox,
    /// ShaderToy style: uniforms implicit, supplied by convention.
    Toy(ToyEntryPoint),
}

/// Extra declaration injected for both dialects so the user colour
/// controls are reachable. Sandbox shaders get only this line.
pub const INPUT_COLOUR_UNIFORM: &str = "uniform vec4 inputColour;\n";

/// The implicit uniform surface a Toy-style shader expects. Prepended
/// verbatim ahead of the user source.
pub const TOY_UNIFORM_BLOCK: &str = "uniform vec3 iResolution;\n\
uniform float iGlobalTime;\n\
uniform vec4 iMouse;\n\
uniform vec4 iDate;\n\
uniform float iChannelTime[4];\n\
uniform vec3 iChannelResolution[4];\n\
uniform sampler2D iChannel0;\n\
uniform sampler2D iChannel1;\n\
uniform sampler2D iChannel2;\n\
uniform sampler2D iChannel3;\n";

/// Entry-point shim appended when the source defines `mainImage`,
/// forwarding the fixed-function fragment coordinate.
const TOY_MAIN_SHIM: &str = "void main(void) {\n\
    mainImage(gl_FragColor, gl_FragCoord.xy);\n\
}\n";

/// Fixed pass-through vertex stage paired with every transformed
/// fragment source at compile time.
pub const VERTEX_PASSTHROUGH: &str = "void main()\n\
{\n\
    gl_Position = gl_ModelViewProjectionMatrix * gl_Vertex;\n\
    gl_TexCoord[0] = gl_MultiTexCoord0;\n\
    gl_FrontColor = gl_Color;\n\
}\n";

/// Substring whose presence (exact, including the semicolon) marks a
/// Sandbox-style shader.
const SANDBOX_MARKER: &str = "uniform float time;";

/// Detects the dialect of `raw` and produces the final fragment source
/// ready for compilation.
///
/// Fails with [`DialectError::NotAShader`] when the text mentions
/// neither `fragColor` nor `gl_FragColor` anywhere.
pub fn classify_and_transform(raw: &str) -> Result<(String, ShaderDialect), DialectError> {
    if !raw.contains("fragColor") && !raw.contains("gl_FragColor") {
        return Err(DialectError::NotAShader);
    }

    if raw.contains(SANDBOX_MARKER) {
        let mut source = String::with_capacity(INPUT_COLOUR_UNIFORM.len() + raw.len());
        source.push_str(INPUT_COLOUR_UNIFORM);
        source.push_str(raw);
        debug!(dialect = "sandbox", "classified shader source");
        return Ok((source, ShaderDialect::Sandbox));
    }

    let entry = if raw.contains("void mainImage") {
        ToyEntryPoint::Revised
    } else {
        ToyEntryPoint::Legacy
    };

    let mut source = String::with_capacity(
        TOY_UNIFORM_BLOCK.len() + INPUT_COLOUR_UNIFORM.len() + raw.len() + TOY_MAIN_SHIM.len(),
    );
    source.push_str(TOY_UNIFORM_BLOCK);
    source.push_str(INPUT_COLOUR_UNIFORM);
    source.push_str(raw);
    if entry == ToyEntryPoint::Revised {
        source.push_str(TOY_MAIN_SHIM);
    }

    debug!(dialect = "toy", entry = ?entry, "classified shader source");
    Ok((source, ShaderDialect::Toy(entry)))
}
