//! WiX identifier and GUID allocation.
//!
//! Identifiers are derived from the entity's relative path rather than from
//! an insertion counter, so rebuilding an unchanged tree (even one the file
//! system enumerates in a different order) yields the same `Id` attributes.
//! Component GUIDs are UUID v5 values in a per-package namespace; Windows
//! Installer relies on them to track a file across upgrades and removals.

use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Identifier of the application root directory element.
pub const ROOT_DIRECTORY_ID: &str = "APPLICATIONROOTDIRECTORY";

/// Identifier of the start menu folder holding the shortcut.
pub const PROGRAMS_FOLDER_ID: &str = "ApplicationProgramsFolder";

/// Identifier of the synthesized shortcut component.
pub const SHORTCUT_COMPONENT_ID: &str = "ApplicationShortcut";

/// Identifier of the shortcut element itself.
pub const SHORTCUT_ID: &str = "ApplicationStartMenuShortcut";

/// Seed used for the shortcut component GUID.
///
/// `<` cannot appear in a Windows file name, so no file path maps to it.
pub const SHORTCUT_GUID_SEED: &str = "<shortcut>";

/// Identifiers the document template uses verbatim.
const RESERVED_IDS: &[&str] = &[
    "TARGETDIR",
    "ProgramFilesFolder",
    "ProgramFiles64Folder",
    "ProgramMenuFolder",
    "MainApplication",
    ROOT_DIRECTORY_ID,
    PROGRAMS_FOLDER_ID,
    SHORTCUT_COMPONENT_ID,
    SHORTCUT_ID,
];

/// WiX limits identifiers to 72 characters.
const MAX_ID_LEN: usize = 72;

/// Hex characters of the seed hash appended to every derived identifier.
const HASH_LEN: usize = 8;

/// Headroom kept for a `_<n>` collision suffix.
const SUFFIX_RESERVE: usize = 4;

/// Root namespace for every package namespace.
const BUNDLER_NAMESPACE: Uuid = Uuid::from_u128(0x5f0e_4a3c_9b6d_4c1e_8a72_d3e9_1b40_6c55);

/// Kind of element an identifier is allocated for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum IdKind {
    /// `<Directory>` element
    Directory,
    /// `<Component>` element
    Component,
    /// `<File>` element
    File,
}

impl IdKind {
    fn prefix(&self) -> &'static str {
        match self {
            IdKind::Directory => "dir_",
            IdKind::Component => "cmp_",
            IdKind::File => "fil_",
        }
    }
}

/// Allocates identifiers and GUIDs for one build.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::wix::{IdAllocator, IdKind};
///
/// let mut ids = IdAllocator::new("Acme Technologies", "Acme");
/// let id = ids.allocate_id(IdKind::Component, "resources/app.asar");
/// assert!(id.starts_with("cmp_app.asar_"));
/// ```
#[derive(Debug)]
pub struct IdAllocator {
    namespace: Uuid,
    used: HashSet<String>,
    ordinals: HashMap<IdKind, usize>,
    guid_ordinal: usize,
}

impl IdAllocator {
    /// Creates an allocator whose GUID namespace is keyed by manufacturer and product.
    pub fn new(manufacturer: &str, product_name: &str) -> Self {
        let namespace = Uuid::new_v5(
            &BUNDLER_NAMESPACE,
            format!("{manufacturer}/{product_name}").as_bytes(),
        );

        Self {
            namespace,
            used: RESERVED_IDS.iter().map(|id| id.to_string()).collect(),
            ordinals: HashMap::new(),
            guid_ordinal: 0,
        }
    }

    /// Allocates a schema-valid identifier derived from `seed`.
    ///
    /// The first occurrence of a derived identifier is returned unchanged;
    /// later collisions get a `_2`, `_3`, ... suffix.
    pub fn allocate_id(&mut self, kind: IdKind, seed: &str) -> String {
        let ordinal = self.ordinals.entry(kind).or_insert(0);
        *ordinal += 1;
        let seed = if seed.is_empty() {
            format!("#{ordinal}")
        } else {
            seed.to_string()
        };

        let base = derive_id(kind, &seed);
        let mut candidate = base.clone();
        let mut n = 2usize;
        while self.used.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }

        self.used.insert(candidate.clone());
        candidate
    }

    /// Returns the component GUID for `seed`.
    ///
    /// Same seed and same package namespace always give the same GUID.
    pub fn allocate_guid(&mut self, seed: &str) -> Uuid {
        if seed.is_empty() {
            self.guid_ordinal += 1;
            return Uuid::new_v5(&self.namespace, format!("#{}", self.guid_ordinal).as_bytes());
        }
        Uuid::new_v5(&self.namespace, seed.as_bytes())
    }

    /// Default upgrade code for the package.
    pub fn upgrade_code(&self) -> Uuid {
        Uuid::new_v5(&self.namespace, b"UpgradeCode")
    }
}

/// Builds `<prefix><name>_<hash>` from a path-like seed.
fn derive_id(kind: IdKind, seed: &str) -> String {
    let prefix = kind.prefix();
    let name_budget = MAX_ID_LEN - prefix.len() - 1 - HASH_LEN - SUFFIX_RESERVE;

    let last_segment = seed
        .rsplit(|c: char| c == '/' || c == '\\')
        .find(|segment| !segment.is_empty())
        .unwrap_or(seed);

    let name: String = last_segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .take(name_budget)
        .collect();

    let digest = Sha256::digest(seed.as_bytes());
    let hash = hex::encode(&digest[..HASH_LEN / 2]);

    format!("{prefix}{name}_{hash}")
}

/// Formats a GUID the way WiX sources conventionally spell them.
pub fn format_guid(guid: &Uuid) -> String {
    guid.hyphenated().to_string().to_uppercase()
}
