use crate::validation::ResponsePath;

#[test]
fn paths_join_with_slashes() {
    let path = ResponsePath::root("Query").field("allPersons").field("posts");
    assert_eq!(path.as_str(), "Query/allPersons/posts");
    assert_eq!(path.leaf(), "posts");
    assert_eq!(path.segments().collect::<Vec<_>>(), vec!["Query", "allPersons", "posts"]);
}

#[test]
fn type_conditions_are_spliced_in() {
    let path = ResponsePath::root("Query")
        .field("hero")
        .type_condition("Droid")
        .field("primaryFunction");
    assert_eq!(path.to_string(), "Query/hero/Droid/primaryFunction");
}

#[test]
fn root_path_leaf_is_the_root_type() {
    assert_eq!(ResponsePath::root("Mutation").leaf(), "Mutation");
    assert_eq!(ResponsePath::from("Query/a"), ResponsePath::root("Query").field("a"));
}
