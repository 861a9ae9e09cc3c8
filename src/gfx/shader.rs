use std::{fmt, fs, io, path::Path, path::PathBuf};

use eframe::glow;
use glam::Mat4;

pub enum ShaderUniformTypes<'a> {
    Mat4(&'a Mat4),
    /// Also used for sampler units.
    I32(&'a i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not read shader source {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not create {stage} shader: {reason}")]
    CreateStage { stage: ShaderStage, reason: String },
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("could not create program: {0}")]
    CreateProgram(String),
    #[error("program linking failed:\n{log}")]
    Link { log: String },
}

/// The handful of GL entry points needed to turn two sources into a program.
///
/// Implemented for [`glow::Context`]; kept narrow so the compile/link sequence
/// can run against something other than a live context.
pub trait ShaderBackend {
    type Stage: Copy;
    type Program: Copy;

    fn create_stage(&self, stage: ShaderStage) -> Result<Self::Stage, String>;
    /// Uploads `source` into `shader`, compiles it and returns the compile status.
    fn compile_stage(&self, shader: Self::Stage, source: &str) -> bool;
    fn stage_log(&self, shader: Self::Stage) -> String;
    fn delete_stage(&self, shader: Self::Stage);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_stage(&self, program: Self::Program, shader: Self::Stage);
    fn detach_stage(&self, program: Self::Program, shader: Self::Stage);
    /// Links `program` and returns the link status.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
}

impl ShaderBackend for glow::Context {
    type Stage = glow::Shader;
    type Program = glow::Program;

    fn create_stage(&self, stage: ShaderStage) -> Result<Self::Stage, String> {
        use glow::HasContext as _;
        unsafe { self.create_shader(stage.gl_type()) }
    }

    fn compile_stage(&self, shader: Self::Stage, source: &str) -> bool {
        use glow::HasContext as _;
        unsafe {
            self.shader_source(shader, source);
            self.compile_shader(shader);
            self.get_shader_compile_status(shader)
        }
    }

    fn stage_log(&self, shader: Self::Stage) -> String {
        use glow::HasContext as _;
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_stage(&self, shader: Self::Stage) {
        use glow::HasContext as _;
        unsafe { self.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { glow::HasContext::create_program(self) }
    }

    fn attach_stage(&self, program: Self::Program, shader: Self::Stage) {
        use glow::HasContext as _;
        unsafe { self.attach_shader(program, shader) }
    }

    fn detach_stage(&self, program: Self::Program, shader: Self::Stage) {
        use glow::HasContext as _;
        unsafe { self.detach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) -> bool {
        use glow::HasContext as _;
        unsafe {
            glow::HasContext::link_program(self, program);
            self.get_program_link_status(program)
        }
    }

    fn program_log(&self, program: Self::Program) -> String {
        use glow::HasContext as _;
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { glow::HasContext::delete_program(self, program) }
    }
}

fn compile_stage<B: ShaderBackend>(
    backend: &B,
    stage: ShaderStage,
    source: &str,
) -> Result<B::Stage, ShaderError> {
    let shader = backend
        .create_stage(stage)
        .map_err(|reason| ShaderError::CreateStage { stage, reason })?;

    if !backend.compile_stage(shader, source) {
        let log = backend.stage_log(shader);
        backend.delete_stage(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

/// Compiles both stages and links them. Transient stage objects are released
/// whatever the outcome; only a linked program is ever returned.
pub fn build_program<B: ShaderBackend>(
    backend: &B,
    vtx: &str,
    frag: &str,
) -> Result<B::Program, ShaderError> {
    let vtx_shader = compile_stage(backend, ShaderStage::Vertex, vtx)?;
    let frag_shader = match compile_stage(backend, ShaderStage::Fragment, frag) {
        Ok(shader) => shader,
        Err(e) => {
            backend.delete_stage(vtx_shader);
            return Err(e);
        }
    };

    let program = match backend.create_program() {
        Ok(program) => program,
        Err(reason) => {
            backend.delete_stage(vtx_shader);
            backend.delete_stage(frag_shader);
            return Err(ShaderError::CreateProgram(reason));
        }
    };

    backend.attach_stage(program, vtx_shader);
    backend.attach_stage(program, frag_shader);
    let linked = backend.link_program(program);

    backend.detach_stage(program, vtx_shader);
    backend.detach_stage(program, frag_shader);
    backend.delete_stage(vtx_shader);
    backend.delete_stage(frag_shader);

    if !linked {
        let log = backend.program_log(program);
        backend.delete_program(program);
        return Err(ShaderError::Link { log });
    }

    Ok(program)
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone)]
#[repr(C)]
pub struct Shader(glow::Program);

impl Shader {
    pub fn from_src(gl: &glow::Context, vtx: &str, frag: &str) -> Result<Self, ShaderError> {
        let program = build_program(gl, vtx, frag)?;
        log::debug!("linked shader program {program:?}");
        Ok(Self(program))
    }

    pub fn from_files(
        gl: &glow::Context,
        vtx_path: &Path,
        frag_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vtx = read_source(vtx_path)?;
        let frag = read_source(frag_path)?;
        log::info!(
            "building shader from {} and {}",
            vtx_path.display(),
            frag_path.display()
        );
        Self::from_src(gl, &vtx, &frag)
    }

    pub fn attrib_location(&self, gl: &glow::Context, name: &str) -> Option<u32> {
        unsafe {
            use glow::HasContext as _;
            gl.get_attrib_location(self.0, name)
        }
    }

    pub fn set_uniform(&self, gl: &glow::Context, name: &str, uniform: ShaderUniformTypes) {
        unsafe {
            use glow::HasContext as _;
            let location = gl.get_uniform_location(self.0, name);
            match uniform {
                ShaderUniformTypes::Mat4(uniform) => {
                    gl.uniform_matrix_4_f32_slice(
                        location.as_ref(),
                        false,
                        &uniform.to_cols_array(),
                    );
                }
                ShaderUniformTypes::I32(uniform) => {
                    gl.uniform_1_i32(location.as_ref(), *uniform);
                }
            }
        }
    }

    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.use_program(Some(self.0));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        ShaderBackend::delete_program(gl, self.0);
    }
}
