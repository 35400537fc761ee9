//! Application directory scanning.
//!
//! Walks the application directory into a tree of [`DirectoryNode`]s and
//! [`FileEntry`] leaves. Entries keep the order the file system lists them
//! in; identifiers come from [`IdAllocator`] keyed by relative path, so the
//! order only matters for the shape of the rendered document.

use super::ids::{IdAllocator, IdKind, ROOT_DIRECTORY_ID};
use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

/// One directory of the installable tree.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    /// WiX `Directory` identifier
    pub id: String,
    /// Directory name (empty for the root)
    pub name: String,
    /// Path relative to the application directory
    pub relative_path: PathBuf,
    /// Child directories in enumeration order
    pub directories: Vec<DirectoryNode>,
    /// Files directly inside this directory, in enumeration order
    pub files: Vec<FileEntry>,
}

/// One installable file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path of the file on disk
    pub source: PathBuf,
    /// Path relative to the application directory
    pub relative_path: PathBuf,
    /// File name
    pub name: String,
    /// WiX `Component` identifier
    pub component_id: String,
    /// WiX `File` identifier
    pub file_id: String,
    /// Component GUID
    pub guid: Uuid,
}

impl DirectoryNode {
    fn new(id: String, name: String, relative_path: PathBuf) -> Self {
        Self {
            id,
            name,
            relative_path,
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Number of files in this directory and all descendants.
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .directories
                .iter()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }

    /// Number of descendant directories (the node itself excluded).
    pub fn directory_count(&self) -> usize {
        self.directories.len()
            + self
                .directories
                .iter()
                .map(DirectoryNode::directory_count)
                .sum::<usize>()
    }

    /// Looks up a file directly inside this directory by name.
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// Builds the installable tree rooted at `root`.
///
/// Symbolic links are followed; a link that points back at one of its own
/// ancestors fails with [`Error::FileSystem`].
///
/// # Errors
///
/// - `root` does not exist, cannot be read, or is not a directory
/// - an entry cannot be read or a symbolic link cycle is found
pub fn build(root: &Path, ids: &mut IdAllocator) -> Result<DirectoryNode> {
    build_excluding(root, &[], ids)
}

/// Like [`build`], but leaves out every entry whose absolute path is in
/// `exclude` (directories are pruned with their contents).
///
/// Paths must be absolute and spelled the way `root` is absolutized.
pub fn build_excluding(
    root: &Path,
    exclude: &[PathBuf],
    ids: &mut IdAllocator,
) -> Result<DirectoryNode> {
    let root = root
        .absolutize()
        .fs_context("resolving application directory", root)?
        .into_owned();

    let metadata =
        std::fs::metadata(&root).fs_context("reading application directory", &root)?;
    if !metadata.is_dir() {
        return Err(Error::FileSystem(format!(
            "application directory {} is not a directory",
            root.display()
        )));
    }

    log::debug!("Scanning application directory {}", root.display());

    // Open directories from the root down to the current entry's parent
    let mut stack = vec![DirectoryNode::new(
        ROOT_DIRECTORY_ID.to_string(),
        String::new(),
        PathBuf::new(),
    )];

    let walker = WalkDir::new(&root)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| {
            let skip = e.depth() > 0 && exclude.iter().any(|x| x.as_path() == e.path());
            if skip {
                log::debug!("Excluding {} from the installable tree", e.path().display());
            }
            !skip
        });

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(&root, e))?;

        // Close directories that are not ancestors of this entry
        while stack.len() > entry.depth() {
            close_directory(&mut stack);
        }

        let relative_path = entry.path().strip_prefix(&root)?.to_path_buf();
        let seed = seed_for(&relative_path);
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            let id = ids.allocate_id(IdKind::Directory, &seed);
            stack.push(DirectoryNode::new(id, name, relative_path));
        } else if entry.file_type().is_file() {
            let file = FileEntry {
                source: entry.path().to_path_buf(),
                component_id: ids.allocate_id(IdKind::Component, &seed),
                file_id: ids.allocate_id(IdKind::File, &seed),
                guid: ids.allocate_guid(&seed),
                relative_path,
                name,
            };
            if let Some(parent) = stack.last_mut() {
                parent.files.push(file);
            }
        } else {
            log::debug!("Skipping special file {}", entry.path().display());
        }
    }

    while stack.len() > 1 {
        close_directory(&mut stack);
    }

    stack
        .pop()
        .ok_or_else(|| Error::GenericError("directory stack underflow".into()))
}

fn close_directory(stack: &mut Vec<DirectoryNode>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.directories.push(done);
        }
    }
}

/// Relative path with `/` separators, independent of the host platform.
fn seed_for(relative_path: &Path) -> String {
    relative_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn walk_error(root: &Path, error: walkdir::Error) -> Error {
    if let Some(ancestor) = error.loop_ancestor() {
        let path = error.path().unwrap_or(root);
        return Error::FileSystem(format!(
            "symbolic link cycle detected: {} points back to {}",
            path.display(),
            ancestor.display()
        ));
    }
    Error::WalkdirError(error)
}
