use std::fmt;

use crate::shader::ShaderStage;

/// Errors raised while bringing up the window, the GPU context or the scene.
///
/// Fatal variants abort before the frame loop starts. Recoverable variants are
/// collected as diagnostics; the loop still runs with the affected program or
/// draw item disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// The window could not be created.
    WindowCreation(String),
    /// No adapter, device or surface could be obtained for the window.
    GpuLoader(String),
    /// A shader stage failed to compile. `log` is the capped compiler log.
    ShaderCompile {
        program: String,
        stage: ShaderStage,
        log: String,
    },
    /// A program failed to link. `log` is the capped linker log.
    ProgramLink { program: String, log: String },
    /// A draw item references a program or mesh that does not exist.
    InvalidScene(String),
    /// A program expects a vertex input the mesh layout does not provide.
    IncompatibleLayout {
        program: String,
        mesh: String,
        location: u32,
    },
}

impl InitError {
    /// Whether the error prevents the frame loop from starting.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::WindowCreation(_) | Self::GpuLoader(_) | Self::InvalidScene(_)
        )
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowCreation(msg) => write!(f, "failed to create window: {msg}"),
            Self::GpuLoader(msg) => write!(f, "failed to initialize GPU: {msg}"),
            Self::ShaderCompile { program, stage, log } => {
                write!(f, "{stage} shader of program `{program}` failed to compile:\n{log}")
            }
            Self::ProgramLink { program, log } => {
                write!(f, "program `{program}` failed to link:\n{log}")
            }
            Self::InvalidScene(msg) => write!(f, "invalid scene: {msg}"),
            Self::IncompatibleLayout { program, mesh, location } => write!(
                f,
                "mesh `{mesh}` provides no compatible attribute for location {location} of program `{program}`"
            ),
        }
    }
}

impl std::error::Error for InitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(InitError::WindowCreation("x".into()).is_fatal());
        assert!(InitError::GpuLoader("x".into()).is_fatal());
        assert!(InitError::InvalidScene("x".into()).is_fatal());
        assert!(!InitError::ProgramLink { program: "p".into(), log: "l".into() }.is_fatal());
        assert!(
            !InitError::ShaderCompile {
                program: "p".into(),
                stage: ShaderStage::Vertex,
                log: "l".into(),
            }
            .is_fatal()
        );
    }

    #[test]
    fn display_includes_log() {
        let err = InitError::ShaderCompile {
            program: "sweep".into(),
            stage: ShaderStage::Fragment,
            log: "expected `;`".into(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader of program `sweep` failed to compile:\nexpected `;`"
        );
    }
}
