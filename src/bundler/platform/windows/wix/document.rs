//! WiX source document rendering.
//!
//! Turns a scanned [`DirectoryNode`] tree plus [`Settings`] into the text of
//! a `.wxs` file. Every component written into the directory hierarchy and
//! the shortcut component are collected while rendering, and the feature's
//! `ComponentRef` list is produced from that same collection, so the
//! declarations and references cannot drift apart.

use super::{
    ids::{
        self, IdAllocator, PROGRAMS_FOLDER_ID, ROOT_DIRECTORY_ID, SHORTCUT_COMPONENT_ID,
        SHORTCUT_GUID_SEED, SHORTCUT_ID,
    },
    template::WXS_TEMPLATE,
    tree::{DirectoryNode, FileEntry},
    utils,
};
use crate::bundler::{
    error::{Error, Result},
    settings::Settings,
};
use handlebars::Handlebars;
use serde_json::json;
use std::fmt::Write;
use uuid::Uuid;

/// Indentation depth of the application root's children in the template.
const HIERARCHY_INDENT: usize = 5;

/// Render the complete `.wxs` document.
///
/// `version` must already be normalized with
/// [`utils::format_version_for_msi`].
///
/// # Arguments
/// - `tree` - Scanned application directory
/// - `settings` - Package metadata and WiX toggles
/// - `version` - Four-part MSI version
/// - `ids` - Allocator the tree was built with
///
/// # Returns
/// The document text
pub fn render(
    tree: &DirectoryNode,
    settings: &Settings,
    version: &str,
    ids: &mut IdAllocator,
) -> Result<String> {
    let mut component_refs = Vec::with_capacity(tree.file_count() + 1);

    let mut hierarchy = String::new();
    write_directory_contents(&mut hierarchy, tree, HIERARCHY_INDENT, &mut component_refs)
        .map_err(|e| Error::GenericError(format!("failed to write directory hierarchy: {e}")))?;
    let hierarchy = hierarchy.trim_end_matches('\n');

    let shortcut_guid = ids.allocate_guid(SHORTCUT_GUID_SEED);
    component_refs.push(SHORTCUT_COMPONENT_ID.to_string());

    let upgrade_code = match settings.wix().upgrade_code.as_deref() {
        Some(code) => Uuid::parse_str(code.trim_matches(|c| c == '{' || c == '}'))
            .map_err(|e| Error::Precondition(format!("invalid upgrade code '{code}': {e}")))?,
        None => ids.upgrade_code(),
    };

    let component_count = component_refs.len();
    let arch = settings.arch();
    let data = json!({
        "product_name": settings.product_name(),
        "manufacturer": settings.manufacturer(),
        "description": settings.description(),
        "version": version,
        "language": settings.wix().language,
        "upgrade_code": ids::format_guid(&upgrade_code),
        "installer_version": utils::installer_version(arch),
        "install_scope": utils::map_install_scope(settings.wix().install_scope),
        "platform": utils::map_arch(arch),
        "homepage": settings.homepage(),
        "program_files_folder": utils::program_files_folder(arch),
        "root_directory_id": ROOT_DIRECTORY_ID,
        "programs_folder_id": PROGRAMS_FOLDER_ID,
        "shortcut_folder": settings.shortcut_folder(),
        "exe": settings.exe_name(),
        "hierarchy": hierarchy,
        "shortcut": {
            "id": SHORTCUT_ID,
            "component_id": SHORTCUT_COMPONENT_ID,
            "guid": ids::format_guid(&shortcut_guid),
            "registry_key": format!(
                "Software\\{}\\{}",
                settings.manufacturer(),
                settings.product_name()
            ),
        },
        "component_refs": component_refs,
        "ui": settings.wix().ui,
    });

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(utils::xml_escape);
    handlebars.register_template_string("product.wxs", WXS_TEMPLATE)?;

    let document = handlebars.render("product.wxs", &data)?;

    log::debug!("Rendered wxs document with {component_count} components");

    Ok(document)
}

/// Writes the files and subdirectories of `node` (but not `node` itself).
fn write_directory_contents(
    out: &mut String,
    node: &DirectoryNode,
    indent: usize,
    component_refs: &mut Vec<String>,
) -> std::fmt::Result {
    let pad = "  ".repeat(indent);

    for file in &node.files {
        write_component(out, file, &pad)?;
        component_refs.push(file.component_id.clone());
    }

    for child in &node.directories {
        writeln!(
            out,
            r#"{pad}<Directory Id="{}" Name="{}">"#,
            utils::xml_escape(&child.id),
            utils::xml_escape(&child.name)
        )?;
        write_directory_contents(out, child, indent + 1, component_refs)?;
        writeln!(out, "{pad}</Directory>")?;
    }

    Ok(())
}

fn write_component(out: &mut String, file: &FileEntry, pad: &str) -> std::fmt::Result {
    writeln!(
        out,
        r#"{pad}<Component Id="{}" Guid="{}">"#,
        utils::xml_escape(&file.component_id),
        ids::format_guid(&file.guid)
    )?;
    writeln!(
        out,
        r#"{pad}  <File Id="{}" Name="{}" Source="{}" KeyPath="yes" />"#,
        utils::xml_escape(&file.file_id),
        utils::xml_escape(&file.name),
        utils::xml_escape(&file.source.display().to_string())
    )?;
    writeln!(out, "{pad}</Component>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        platform::windows::wix::tree,
        settings::{Arch, PackageSettings, SettingsBuilder, WixSettings},
    };
    use std::{fs, path::Path};

    fn settings(app_dir: &Path, wix: WixSettings) -> Settings {
        SettingsBuilder::new()
            .app_directory(app_dir)
            .exe("acme")
            .output_directory(app_dir.join("out"))
            .package_settings(PackageSettings {
                product_name: "Acme".into(),
                version: "1.0.0".into(),
                description: "ACME is the best company ever".into(),
                manufacturer: "Acme Technologies".into(),
                homepage: None,
            })
            .wix_settings(wix)
            .arch(Arch::X86_64)
            .build()
            .unwrap()
    }

    fn render_dir(app_dir: &Path, wix: WixSettings) -> String {
        let settings = settings(app_dir, wix);
        let mut ids = IdAllocator::new(settings.manufacturer(), settings.product_name());
        let tree = tree::build(app_dir, &mut ids).unwrap();
        render(&tree, &settings, "1.0.0.0", &mut ids).unwrap()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn renders_required_structure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("acme.exe"), b"MZ").unwrap();
        fs::create_dir(dir.path().join("locales")).unwrap();
        fs::write(dir.path().join("locales/en-US.pak"), b"pak").unwrap();

        let wxs = render_dir(dir.path(), WixSettings::default());

        assert_eq!(
            count(&wxs, r#"<Wix xmlns="http://schemas.microsoft.com/wix/2006/wi">"#),
            1
        );
        assert_eq!(count(&wxs, "<Package"), 1);
        assert_eq!(count(&wxs, r#"<Directory Id="APPLICATIONROOTDIRECTORY""#), 1);
        assert_eq!(count(&wxs, r#"<Directory Id="ApplicationProgramsFolder""#), 1);
        assert_eq!(count(&wxs, "</Component>"), 3);
        assert_eq!(count(&wxs, "<ComponentRef"), 3);
        assert!(wxs.contains(r#"Name="locales""#));
        assert!(wxs.contains(r#"Target="[APPLICATIONROOTDIRECTORY]acme.exe""#));
        assert!(wxs.contains(r#"Version="1.0.0.0""#));
        assert!(wxs.contains(r#"Platform="x64""#));
        assert!(wxs.contains("ProgramFiles64Folder"));
        assert!(!wxs.contains("UIRef"));
    }

    #[test]
    fn every_component_is_referenced_once() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            fs::create_dir_all(dir.path().join(name).join("nested")).unwrap();
            fs::write(dir.path().join(name).join("nested/file.dat"), b"x").unwrap();
            fs::write(dir.path().join(name).join("file.dat"), b"x").unwrap();
        }

        let wxs = render_dir(dir.path(), WixSettings::default());

        let declared: Vec<&str> = wxs
            .split("<Component Id=\"")
            .skip(1)
            .map(|s| &s[..s.find('"').unwrap()])
            .collect();
        let referenced: Vec<&str> = wxs
            .split("<ComponentRef Id=\"")
            .skip(1)
            .map(|s| &s[..s.find('"').unwrap()])
            .collect();

        assert_eq!(declared.len(), 7);
        assert_eq!(declared, referenced);
    }

    #[test]
    fn empty_tree_renders_shortcut_only() {
        let dir = tempfile::tempdir().unwrap();
        let wxs = render_dir(dir.path(), WixSettings::default());
        assert_eq!(count(&wxs, "</Component>"), 1);
        assert_eq!(count(&wxs, "<ComponentRef"), 1);
    }

    #[test]
    fn ui_toggle_and_metadata_are_escaped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("R&D <notes>.txt"), b"x").unwrap();

        let configured = settings(
            dir.path(),
            WixSettings {
                ui: true,
                upgrade_code: Some("{6c1f2c8d-1e1a-4b58-9e1b-0c2a4e7f9a10}".into()),
                ..Default::default()
            },
        );
        let mut ids = IdAllocator::new(configured.manufacturer(), configured.product_name());
        let tree = tree::build(dir.path(), &mut ids).unwrap();
        let wxs = render(&tree, &configured, "1.0.0.0", &mut ids).unwrap();

        assert!(wxs.contains(r#"<UIRef Id="WixUI_Minimal" />"#));
        assert!(wxs.contains(r#"Name="R&amp;D &lt;notes&gt;.txt""#));
        assert!(wxs.contains(r#"UpgradeCode="6C1F2C8D-1E1A-4B58-9E1B-0C2A4E7F9A10""#));

        let invalid = SettingsBuilder::new()
            .app_directory(dir.path())
            .exe("acme")
            .output_directory(dir.path().join("out"))
            .package_settings(PackageSettings {
                product_name: "Acme".into(),
                version: "1.0.0".into(),
                manufacturer: "Acme".into(),
                ..Default::default()
            })
            .wix_settings(WixSettings {
                upgrade_code: Some("not-a-guid".into()),
                ..Default::default()
            })
            .build()
            .unwrap();
        let err = render(&tree, &invalid, "1.0.0.0", &mut ids).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn rerendering_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("acme.exe"), b"MZ").unwrap();
        fs::create_dir(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("bin/helper.dll"), b"dll").unwrap();

        let first = render_dir(dir.path(), WixSettings::default());
        let second = render_dir(dir.path(), WixSettings::default());
        assert_eq!(first, second);
    }
}
