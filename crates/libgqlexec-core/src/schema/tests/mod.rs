mod dir_schema_store_tests;
mod type_cache_tests;
