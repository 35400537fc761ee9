//! WiX installer build execution.
//!
//! Compiles a `.wxs` source into a `.wixobj` object with `candle`, then
//! links the object into an `.msi` with `light`. [`WixDriver`] walks an
//! explicit [`CompileState`] machine so callers can see exactly how far a
//! build got when it fails.

use super::{
    process::{Invocation, ProcessRunner},
    toolset::{self, CANDLE, LIGHT, ToolchainStatus},
    utils,
};
use crate::bundler::{
    error::{Error, Result},
    settings::Arch,
};
use std::path::{Path, PathBuf};

/// WiX extension providing the stock `WixUI_*` dialog sets.
const UI_EXTENSION: &str = "WixUIExtension";

/// Progress of one toolchain run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompileState {
    /// Nothing has happened yet
    #[default]
    Uninitialized,
    /// Probing for `candle` and `light`
    CheckingToolchain,
    /// At least one tool is unusable
    ToolchainMissing,
    /// Both tools answered the probe
    ToolchainReady,
    /// `candle` is running
    Compiling,
    /// `candle` produced the object file
    Stage1Done {
        /// Object file written by `candle`
        wixobj: PathBuf,
    },
    /// `light` is running
    Linking {
        /// Object file being linked
        wixobj: PathBuf,
    },
    /// Both stages succeeded
    Done {
        /// Object file written by `candle`
        wixobj: PathBuf,
        /// Installer written by `light`
        msi: PathBuf,
    },
    /// A stage exited non-zero or could not be spawned
    Failed,
}

/// Inputs and outputs of one toolchain run.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Source document
    pub wxs: PathBuf,
    /// Object file to produce
    pub wixobj: PathBuf,
    /// Installer to produce
    pub msi: PathBuf,
    /// Working directory for both stages
    pub working_dir: PathBuf,
    /// Target architecture passed to `candle -arch`
    pub arch: Arch,
    /// Link the stock UI extension
    pub ui: bool,
}

/// Drives `candle` and `light` through a [`ProcessRunner`].
pub struct WixDriver<'a> {
    runner: &'a dyn ProcessRunner,
    state: CompileState,
    status: Option<ToolchainStatus>,
}

impl std::fmt::Debug for WixDriver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WixDriver")
            .field("state", &self.state)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl<'a> WixDriver<'a> {
    /// Creates a driver in [`CompileState::Uninitialized`].
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self {
            runner,
            state: CompileState::Uninitialized,
            status: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CompileState {
        &self.state
    }

    /// Result of the last toolchain probe, if any.
    pub fn toolchain(&self) -> Option<&ToolchainStatus> {
        self.status.as_ref()
    }

    /// Probe for both tools.
    ///
    /// Moves to [`CompileState::ToolchainReady`] or
    /// [`CompileState::ToolchainMissing`]; the latter returns
    /// [`Error::ToolchainMissing`].
    pub async fn check_toolchain(&mut self) -> Result<&ToolchainStatus> {
        self.state = CompileState::CheckingToolchain;

        let status = toolset::probe_toolchain(self.runner).await;
        let installed = status.ensure_installed();
        self.state = if installed.is_ok() {
            CompileState::ToolchainReady
        } else {
            CompileState::ToolchainMissing
        };

        let status = self.status.insert(status);
        installed.map(|()| &*status)
    }

    /// Stage 1: run `candle` to produce the object file.
    pub async fn compile(&mut self, request: &CompileRequest) -> Result<PathBuf> {
        if self.state != CompileState::ToolchainReady {
            return Err(Error::Precondition(format!(
                "cannot compile from state {:?}; check the toolchain first",
                self.state
            )));
        }

        log::info!("Running candle...");
        self.state = CompileState::Compiling;

        let invocation = Invocation::new(
            self.program(CANDLE),
            [
                "-nologo".to_string(),
                "-arch".to_string(),
                utils::map_arch(request.arch).to_string(),
                "-out".to_string(),
                path_arg(&request.wixobj),
                path_arg(&request.wxs),
            ],
        )
        .current_dir(&request.working_dir);

        self.run_stage(&invocation, "wixobj").await?;

        self.state = CompileState::Stage1Done {
            wixobj: request.wixobj.clone(),
        };
        Ok(request.wixobj.clone())
    }

    /// Stage 2: run `light` to link the object file into the installer.
    pub async fn link(&mut self, request: &CompileRequest) -> Result<PathBuf> {
        let wixobj = match &self.state {
            CompileState::Stage1Done { wixobj } => wixobj.clone(),
            other => {
                return Err(Error::Precondition(format!(
                    "cannot link from state {other:?}; the object file has not been compiled"
                )));
            }
        };

        log::info!("Running light...");
        self.state = CompileState::Linking {
            wixobj: wixobj.clone(),
        };

        let mut args = vec!["-nologo".to_string()];
        if request.ui {
            args.push("-ext".to_string());
            args.push(UI_EXTENSION.to_string());
        }
        args.push("-out".to_string());
        args.push(path_arg(&request.msi));
        args.push(path_arg(&wixobj));

        let invocation =
            Invocation::new(self.program(LIGHT), args).current_dir(&request.working_dir);

        self.run_stage(&invocation, "msi").await?;

        self.state = CompileState::Done {
            wixobj,
            msi: request.msi.clone(),
        };
        Ok(request.msi.clone())
    }

    /// Probe, compile and link in order, stopping at the first failure.
    pub async fn run(&mut self, request: &CompileRequest) -> Result<(PathBuf, PathBuf)> {
        self.check_toolchain().await?;
        let wixobj = self.compile(request).await?;
        let msi = self.link(request).await?;
        Ok((wixobj, msi))
    }

    /// Resolved path from the probe, falling back to the bare tool name.
    fn program(&self, name: &str) -> String {
        let probe = self.status.as_ref().and_then(|status| match name {
            CANDLE => status.candle.path.as_ref(),
            LIGHT => status.light.path.as_ref(),
            _ => None,
        });
        probe
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string())
    }

    async fn run_stage(&mut self, invocation: &Invocation, artifact: &str) -> Result<()> {
        let output = match self.runner.run(invocation).await {
            Ok(output) => output,
            Err(e) => {
                self.state = CompileState::Failed;
                return Err(e);
            }
        };

        if !output.success() {
            self.state = CompileState::Failed;
            log::debug!(
                "{} exited with code {}",
                invocation.program,
                output.exit_code()
            );
            return Err(Error::Compilation {
                artifact: artifact.to_string(),
                code: output.exit_code(),
                stderr: output.stderr,
                stdout: output.stdout,
            });
        }

        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
