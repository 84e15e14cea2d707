mod graphql_parse_error_tests;
mod graphql_parser_schema_tests;
mod graphql_parser_type_ref_tests;
mod graphql_parser_value_tests;
mod utils;
