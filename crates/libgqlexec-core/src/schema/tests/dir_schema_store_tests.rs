use crate::schema::DirSchemaStore;
use crate::schema::SchemaStore;
use crate::schema::SchemaStoreError;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "libgqlexec-core-{name}-{}",
        std::process::id(),
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_root_and_namespaced_files() {
    let dir = scratch_dir("namespaces");
    std::fs::write(dir.join("query.graphql"), "type Query { me: User }").unwrap();
    std::fs::write(dir.join("user.graphqls"), "type User { name: String }").unwrap();
    std::fs::write(dir.join("notes.txt"), "type Ignored { x: Int }").unwrap();
    std::fs::create_dir_all(dir.join("tenants/acme")).unwrap();
    std::fs::write(
        dir.join("tenants/acme/user.graphql"),
        "type User { name: String tier: Int }",
    )
    .unwrap();

    let store = DirSchemaStore::load(&dir).unwrap();
    assert_eq!(store.file_count(), 3);
    assert_eq!(store.fetch_type_definition(None, "Ignored").unwrap(), None);
    assert_eq!(
        store.fetch_type_definition(None, "User").unwrap().as_deref(),
        Some("type User { name: String }"),
    );
    assert_eq!(
        store.fetch_type_definition(Some("tenants/acme"), "User").unwrap().as_deref(),
        Some("type User { name: String tier: Int }"),
    );
    assert_eq!(
        store.fetch_type_definition(Some("tenants/acme"), "Query").unwrap().as_deref(),
        Some("type Query { me: User }"),
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn parse_errors_carry_the_file_path() {
    let dir = scratch_dir("bad-file");
    let bad = dir.join("bad.graphql");
    std::fs::write(&bad, "type Broken {").unwrap();

    let err = DirSchemaStore::load(&dir).unwrap_err();
    let SchemaStoreError::InvalidSchemaText { file_path, errors } = err else {
        panic!("expected InvalidSchemaText, got {err:?}");
    };
    assert_eq!(file_path.as_deref(), Some(bad.as_path()));
    assert!(errors[0].span().file_path.is_some());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_root_is_a_walk_error() {
    let dir = std::env::temp_dir().join("libgqlexec-core-does-not-exist");
    let err = DirSchemaStore::load(&dir).unwrap_err();
    assert!(matches!(err, SchemaStoreError::Walk { .. }));
}
