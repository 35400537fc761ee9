//! Shared fixtures: a sample application tree and a scripted toolchain.

#![allow(dead_code)]

use async_trait::async_trait;
use kodegen_bundler_msi::bundler::{
    PackageSettings, Result, Settings, SettingsBuilder,
    wix::{Invocation, ProcessOutput, ProcessRunner},
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Files written by [`app_fixture`].
pub const FIXTURE_FILES: usize = 7;

/// Lays out a small Electron-style application.
pub fn app_fixture(root: &Path) {
    fs::create_dir_all(root.join("locales")).unwrap();
    fs::create_dir_all(root.join("resources/app/node_modules")).unwrap();

    fs::write(root.join("acme.exe"), b"MZ").unwrap();
    fs::write(root.join("fail.exe"), b"MZ").unwrap();
    fs::write(root.join("LICENSE"), b"MIT").unwrap();
    fs::write(root.join("locales/de-DE.pak"), b"pak").unwrap();
    fs::write(root.join("locales/en-US.pak"), b"pak").unwrap();
    fs::write(root.join("resources/app.asar"), b"asar").unwrap();
    fs::write(root.join("resources/app/node_modules/index.js"), b"js").unwrap();
}

pub fn package() -> PackageSettings {
    PackageSettings {
        product_name: "Acme".into(),
        version: "1.0.0".into(),
        description: "ACME is the best company ever".into(),
        manufacturer: "Acme Technologies".into(),
        homepage: None,
    }
}

pub fn settings(app_dir: &Path, output: &Path, exe: &str) -> Settings {
    SettingsBuilder::new()
        .app_directory(app_dir)
        .exe(exe)
        .output_directory(output)
        .package_settings(package())
        .build()
        .unwrap()
}

/// Stand-in for candle and light.
///
/// Probes answer with a WiX banner, stages write their `-out` file, and a
/// stage whose program matches `fail` exits 1 with canned output.
pub struct FakeRunner {
    installed: bool,
    fail: Option<&'static str>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn installed() -> Self {
        Self {
            installed: true,
            fail: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            installed: false,
            ..Self::installed()
        }
    }

    pub fn failing(program: &'static str) -> Self {
        Self {
            fail: Some(program),
            ..Self::installed()
        }
    }

    /// Every invocation, probes included.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Compile and link invocations only.
    pub fn stage_calls(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|inv| inv.args.first().map(String::as_str) != Some("-?"))
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed.then(|| PathBuf::from(program))
    }

    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(invocation.clone());

        if invocation.args.first().map(String::as_str) == Some("-?") {
            return Ok(ProcessOutput {
                code: Some(0),
                stdout: " version 3.11.0.1701".into(),
                stderr: String::new(),
            });
        }

        if self.fail == Some(invocation.program.as_str()) {
            return Ok(ProcessOutput {
                code: Some(1),
                stdout: "A bit of data".into(),
                stderr: "A bit of error".into(),
            });
        }

        let out = invocation
            .args
            .iter()
            .position(|arg| arg == "-out")
            .and_then(|i| invocation.args.get(i + 1))
            .expect("stage invocation without -out");
        fs::write(out, format!("{} output", invocation.program)).unwrap();

        Ok(ProcessOutput {
            code: Some(0),
            ..Default::default()
        })
    }
}
