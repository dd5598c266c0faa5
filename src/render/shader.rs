use std::path::Path;

use anyhow::{bail, Result};
use eframe::egui_glow::ShaderVersion;
use eframe::glow::{self, HasContext};

const BUILTIN_VERTEX: &str = include_str!("../../shaders/default.vert");
const BUILTIN_FRAGMENT: &str = include_str!("../../shaders/default.frag");

/// Attribute slots bound before linking.
pub const ATTRIBUTES: [(u32, &str); 2] = [(0, "aPos"), (1, "aTexCoord")];

#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Read `default.vert` and `default.frag` from `dir`. A file that cannot
    /// be read is replaced by the copy compiled into the binary.
    pub fn load(dir: &Path) -> Self {
        Self {
            vertex: read_or_builtin(&dir.join("default.vert"), BUILTIN_VERTEX),
            fragment: read_or_builtin(&dir.join("default.frag"), BUILTIN_FRAGMENT),
        }
    }
}

fn read_or_builtin(path: &Path, builtin: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            log::debug!("Loaded shader {}", path.display());
            source
        }
        Err(e) => {
            log::warn!("Cannot read shader {}: {e}; using built-in source", path.display());
            builtin.to_owned()
        }
    }
}

/// Prefix a shader body with the context's `#version` line.
pub fn with_version(version_declaration: &str, body: &str) -> String {
    format!("{version_declaration}\n{body}")
}

/// Compile and link the quad program.
///
/// # Safety
/// `gl` must be the current context.
pub unsafe fn compile_program(gl: &glow::Context, sources: &ShaderSources) -> Result<glow::Program> {
    let version = ShaderVersion::get(gl);
    let declaration = version.version_declaration();
    if !version.is_new_shader_interface() {
        bail!("context only offers `{declaration}`, need GLSL 1.40 or ES 3.00");
    }

    let program = gl.create_program().map_err(anyhow::Error::msg)?;

    let stages = [
        (glow::VERTEX_SHADER, "vertex", &sources.vertex),
        (glow::FRAGMENT_SHADER, "fragment", &sources.fragment),
    ];

    let mut shaders = Vec::with_capacity(stages.len());
    for (kind, name, body) in stages {
        let shader = match gl.create_shader(kind) {
            Ok(shader) => shader,
            Err(e) => {
                release(gl, program, &shaders);
                bail!("cannot create {name} shader: {e}");
            }
        };
        gl.shader_source(shader, &with_version(declaration, body));
        gl.compile_shader(shader);
        shaders.push(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            release(gl, program, &shaders);
            bail!("{name} shader failed to compile: {log}");
        }
        gl.attach_shader(program, shader);
    }

    for (index, name) in ATTRIBUTES {
        gl.bind_attrib_location(program, index, name);
    }
    gl.link_program(program);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        release(gl, program, &shaders);
        bail!("shader program failed to link: {log}");
    }

    for shader in shaders {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }

    Ok(program)
}

unsafe fn release(gl: &glow::Context, program: glow::Program, shaders: &[glow::Shader]) {
    for &shader in shaders {
        gl.delete_shader(shader);
    }
    gl.delete_program(program);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_sources_declare_the_uniform_contract() {
        let sources = ShaderSources {
            vertex: BUILTIN_VERTEX.to_owned(),
            fragment: BUILTIN_FRAGMENT.to_owned(),
        };
        for uniform in ["pvm", "size", "zoomX"] {
            assert!(sources.vertex.contains(uniform), "vertex missing {uniform}");
        }
        for uniform in ["applyTexture", "photoTexture"] {
            assert!(sources.fragment.contains(uniform), "fragment missing {uniform}");
        }
        for (_, attribute) in ATTRIBUTES {
            assert!(sources.vertex.contains(attribute));
        }
    }

    #[test]
    fn files_on_disk_take_precedence() {
        let dir = tempdir().expect("failed to create temp dir");
        std::fs::write(dir.path().join("default.vert"), "// custom vertex").expect("write");

        let sources = ShaderSources::load(dir.path());
        assert_eq!(sources.vertex, "// custom vertex");
        // Fragment file is absent.
        assert_eq!(sources.fragment, BUILTIN_FRAGMENT);
    }

    #[test]
    fn missing_directory_falls_back_entirely() {
        let dir = tempdir().expect("failed to create temp dir");
        let sources = ShaderSources::load(&dir.path().join("nowhere"));
        assert_eq!(sources.vertex, BUILTIN_VERTEX);
        assert_eq!(sources.fragment, BUILTIN_FRAGMENT);
    }

    #[test]
    fn version_line_comes_first() {
        let src = with_version("#version 330", "void main() {}");
        assert!(src.starts_with("#version 330\n"));
        assert!(src.ends_with("void main() {}"));
    }
}
