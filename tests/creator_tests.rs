mod common;

use common::{FIXTURE_FILES, FakeRunner, app_fixture, settings};
use kodegen_bundler_msi::bundler::{Error, MsiCreator};
use std::{fs, sync::Arc};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn ids(wxs: &str, marker: &str) -> Vec<String> {
    wxs.split(marker)
        .skip(1)
        .map(|s| s[..s.find('"').unwrap()].to_string())
        .collect()
}

#[test]
fn creator_can_be_constructed() {
    let dir = tempfile::tempdir().unwrap();
    let creator = MsiCreator::new(settings(dir.path(), &dir.path().join("out"), "acme"));
    assert_eq!(creator.settings().product_name(), "Acme");
    assert!(creator.artifacts().wxs_file.is_none());
}

#[tokio::test]
async fn create_writes_a_complete_wxs() {
    let app = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    app_fixture(app.path());

    let mut creator = MsiCreator::new(settings(app.path(), &out.path().join("msi"), "acme"));
    let wxs_file = creator.create().await.unwrap();

    assert_eq!(wxs_file, out.path().join("msi").join("Acme.wxs"));
    assert_eq!(creator.artifacts().wxs_file.as_ref(), Some(&wxs_file));

    let wxs = fs::read_to_string(&wxs_file).unwrap();
    assert!(wxs.len() > 50);
    assert_eq!(
        count(&wxs, r#"<Wix xmlns="http://schemas.microsoft.com/wix/2006/wi">"#),
        1
    );
    assert_eq!(count(&wxs, "<Package"), 1);
    assert_eq!(count(&wxs, r#"<Directory Id="APPLICATIONROOTDIRECTORY""#), 1);
    assert_eq!(count(&wxs, r#"<Directory Id="ApplicationProgramsFolder""#), 1);

    // Files + shortcut
    let components = count(&wxs, "</Component>");
    assert_eq!(components, FIXTURE_FILES + 1);
    assert_eq!(count(&wxs, "<ComponentRef"), components);
    assert_eq!(ids(&wxs, "<Component Id=\""), ids(&wxs, "<ComponentRef Id=\""));
}

#[tokio::test]
async fn recreating_an_unchanged_tree_keeps_identifiers() {
    let app = tempfile::tempdir().unwrap();
    app_fixture(app.path());

    let (out_a, out_b) = (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap());

    let mut first = MsiCreator::new(settings(app.path(), out_a.path(), "acme"));
    let mut second = MsiCreator::new(settings(app.path(), out_b.path(), "acme"));
    let a = fs::read_to_string(first.create().await.unwrap()).unwrap();
    let b = fs::read_to_string(second.create().await.unwrap()).unwrap();

    assert_eq!(ids(&a, " Id=\""), ids(&b, " Id=\""));
    assert_eq!(ids(&a, " Guid=\""), ids(&b, " Guid=\""));
}

#[tokio::test]
async fn nested_output_directory_is_never_packaged() {
    let app = tempfile::tempdir().unwrap();
    app_fixture(app.path());
    let out = app.path().join("out");

    let runner = Arc::new(FakeRunner::installed());
    let mut creator = MsiCreator::with_runner(settings(app.path(), &out, "acme"), runner);

    let first = fs::read_to_string(creator.create().await.unwrap()).unwrap();
    creator.compile().await.unwrap();
    assert!(out.join("Acme.msi").exists());
    let second = fs::read_to_string(creator.create().await.unwrap()).unwrap();

    assert_eq!(count(&first, "</Component>"), FIXTURE_FILES + 1);
    assert_eq!(count(&second, "</Component>"), FIXTURE_FILES + 1);
    assert_eq!(first, second);
    assert!(!second.contains("Name=\"out\""));
    for artifact in ["Acme.wxs", "Acme.wixobj", "Acme.msi"] {
        assert!(!second.contains(&format!("Name=\"{artifact}\"")), "{artifact}");
    }
}

#[tokio::test]
async fn empty_directory_yields_shortcut_only_package() {
    let app = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let mut creator = MsiCreator::new(settings(app.path(), out.path(), "acme"));
    let wxs = fs::read_to_string(creator.create().await.unwrap()).unwrap();

    assert_eq!(count(&wxs, "</Component>"), 1);
    assert_eq!(count(&wxs, "<ComponentRef"), 1);
}

#[tokio::test]
async fn missing_app_directory_is_file_system_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut creator = MsiCreator::new(settings(
        &dir.path().join("nope"),
        &dir.path().join("out"),
        "acme",
    ));

    let err = creator.create().await.unwrap_err();
    assert!(err.is_file_system(), "{err}");
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_cycle_fails_create() {
    let app = tempfile::tempdir().unwrap();
    app_fixture(app.path());
    std::os::unix::fs::symlink(app.path(), app.path().join("locales/loop")).unwrap();

    let out = tempfile::tempdir().unwrap();
    let mut creator = MsiCreator::new(settings(app.path(), out.path(), "acme"));
    let err = creator.create().await.unwrap_err();
    assert!(err.is_file_system());
    assert!(err.to_string().contains("symbolic link cycle"));
}

#[tokio::test]
async fn compile_without_wxs_spawns_nothing() {
    let app = tempfile::tempdir().unwrap();
    let runner = Arc::new(FakeRunner::installed());
    let mut creator = MsiCreator::with_runner(
        settings(app.path(), app.path(), "acme"),
        runner.clone(),
    );

    let err = creator.compile().await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
    assert_eq!(err.to_string(), "wxs file not found. Did you run create() yet?");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn compile_without_toolchain_names_both_tools() {
    let app = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    app_fixture(app.path());

    let runner = Arc::new(FakeRunner::missing());
    let mut creator =
        MsiCreator::with_runner(settings(app.path(), out.path(), "acme"), runner.clone());
    creator.create().await.unwrap();

    let err = creator.compile().await.unwrap_err();
    assert_eq!(err.to_string(), "Could not find light.exe or candle.exe");
    assert!(runner.stage_calls().is_empty());
    assert!(!creator.probe_toolchain().await.is_installed());
}

#[tokio::test]
async fn compile_creates_wixobj_and_msi() {
    let app = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    app_fixture(app.path());

    let runner = Arc::new(FakeRunner::installed());
    let mut creator =
        MsiCreator::with_runner(settings(app.path(), out.path(), "acme"), runner.clone());
    let wxs_file = creator.create().await.unwrap();
    let compiled = creator.compile().await.unwrap();

    assert_eq!(compiled.wixobj_file, out.path().join("Acme.wixobj"));
    assert_eq!(compiled.msi_file, out.path().join("Acme.msi"));
    assert!(compiled.wixobj_file.exists());
    assert!(compiled.msi_file.exists());
    assert_eq!(compiled.checksum.len(), 64);

    let artifacts = creator.artifacts();
    assert_eq!(artifacts.wxs_file.as_ref(), Some(&wxs_file));
    assert_eq!(artifacts.msi_file.as_ref(), Some(&compiled.msi_file));
    assert_eq!(artifacts.checksum.as_ref(), Some(&compiled.checksum));

    let stages = runner.stage_calls();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].program, "candle");
    assert_eq!(stages[1].program, "light");
    assert_eq!(stages[0].working_dir.as_deref(), Some(out.path()));
    assert!(stages[0].args.contains(&wxs_file.to_string_lossy().into_owned()));
}

#[tokio::test]
async fn candle_failure_reports_code_and_streams() {
    let app = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    app_fixture(app.path());

    let runner = Arc::new(FakeRunner::failing("candle"));
    let mut creator =
        MsiCreator::with_runner(settings(app.path(), out.path(), "fail"), runner.clone());
    creator.create().await.unwrap();

    let err = creator.compile().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not create wixobj file. Code: 1 StdErr: A bit of error StdOut: A bit of data"
    );

    // light never runs after a failed compile
    assert_eq!(runner.stage_calls().len(), 1);
    assert!(!out.path().join("Acme.msi").exists());
    assert!(creator.artifacts().msi_file.is_none());
}

#[tokio::test]
async fn light_failure_names_msi() {
    let app = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    app_fixture(app.path());

    let runner = Arc::new(FakeRunner::failing("light"));
    let mut creator =
        MsiCreator::with_runner(settings(app.path(), out.path(), "acme"), runner.clone());
    creator.create().await.unwrap();

    let err = creator.compile().await.unwrap_err();
    assert!(err.to_string().starts_with("Could not create msi file. Code: 1"));
}
