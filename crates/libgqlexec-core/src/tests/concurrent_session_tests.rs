use crate::execution::StaticResolver;
use crate::schema::InMemorySchemaStore;
use crate::Session;
use crate::SessionConfig;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

#[test]
fn warmed_session_serves_operations_from_many_threads() {
    let store = InMemorySchemaStore::from_sdl(
        "type Query { allPersons(last: Int): [Person!] }
         type Person { name: String! age: Int }",
    )
    .unwrap();
    let mut session = Session::new(store, SessionConfig::default());
    session.register_resolver(
        "Query/allPersons",
        StaticResolver::new(r#"[{ name: "Jack Smith", age: 53 }]"#),
    );
    let query = "query($last: Int!) { allPersons(last: $last) { name age } }";
    let mut warmup = IndexMap::new();
    warmup.insert("last".to_string(), InputValue::Int(1));
    session.prepare(query, &warmup).unwrap();
    let cached_types = session.type_cache().len();

    let session = &session;
    let outputs: Vec<String> = (0..32i64)
        .into_par_iter()
        .map(|last| {
            let mut variables = IndexMap::new();
            variables.insert("last".to_string(), InputValue::Int(last));
            let prepared = session.prepare_shared(query, &variables).unwrap();
            assert_eq!(prepared.variables()["last"], InputValue::Int(last));
            futures::executor::block_on(session.execute(&prepared, CancellationToken::new())).to_string()
        })
        .collect();

    assert_eq!(outputs.len(), 32);
    assert!(outputs.iter().all(|out| out == r#"{ data: { allPersons: [{ name: "Jack Smith", age: 53 }] } }"#));
    assert_eq!(session.type_cache().len(), cached_types);
}
