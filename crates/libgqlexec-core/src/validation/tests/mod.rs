mod field_validator_tests;
mod input_coercion_tests;
mod response_path_tests;
mod utils;
mod variable_binder_tests;
