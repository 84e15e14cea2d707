use crate::read_content;
use crate::schema::InMemorySchemaStore;
use crate::schema::SchemaStore;
use crate::schema::SchemaStoreError;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A [`SchemaStore`] loaded from the `.graphql`/`.graphqls` files under a
/// directory.
///
/// Files directly in the root directory define global types; files in a
/// subdirectory define types in the namespace named by its relative path
/// (`tenants/acme/schema.graphql` lands in namespace `tenants/acme`).
#[derive(Clone, Debug)]
pub struct DirSchemaStore {
    root: PathBuf,
    file_count: usize,
    definitions: InMemorySchemaStore,
}

impl DirSchemaStore {
    pub const DEFAULT_EXTENSIONS: [&str; 2] = ["graphql", "graphqls"];

    pub fn load(root: impl AsRef<Path>) -> Result<Self, SchemaStoreError> {
        Self::load_with_extensions(root, &Self::DEFAULT_EXTENSIONS)
    }

    pub fn load_with_extensions(
        root: impl AsRef<Path>,
        extensions: &[&str],
    ) -> Result<Self, SchemaStoreError> {
        let root = root.as_ref().to_path_buf();
        let mut definitions = InMemorySchemaStore::new();
        let mut file_count = 0;

        tracing::debug!(root = %root.display(), "loading schema directory");
        for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|err| SchemaStoreError::Walk {
                root: root.clone(),
                err,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let matches_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext));
            if !matches_ext {
                tracing::trace!(path = %path.display(), "skipping non-schema file");
                continue;
            }

            let namespace = namespace_for(&root, path);
            let sdl = read_content(path)?;
            let added = definitions.add_sdl_file(namespace.as_deref(), &sdl, path.to_path_buf())?;
            tracing::trace!(
                path = %path.display(),
                namespace = namespace.as_deref().unwrap_or(""),
                added,
                "loaded schema file",
            );
            file_count += 1;
        }
        tracing::debug!(
            file_count,
            definitions = definitions.len(),
            "schema directory loaded",
        );

        Ok(Self {
            root,
            file_count,
            definitions,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn definitions(&self) -> &InMemorySchemaStore {
        &self.definitions
    }
}

impl SchemaStore for DirSchemaStore {
    fn fetch_type_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError> {
        self.definitions.fetch_type_definition(namespace, name)
    }

    fn fetch_implementors(
        &self,
        namespace: Option<&str>,
        interface: &str,
    ) -> Result<Vec<String>, SchemaStoreError> {
        self.definitions.fetch_implementors(namespace, interface)
    }
}

fn namespace_for(root: &Path, file_path: &Path) -> Option<String> {
    let relative_dir = file_path.parent()?.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative_dir
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
