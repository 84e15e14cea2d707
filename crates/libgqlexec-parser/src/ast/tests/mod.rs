mod display_tests;
mod document_tests;
mod type_ref_tests;
mod value_tests;
