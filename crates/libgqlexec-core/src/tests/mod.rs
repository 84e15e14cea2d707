mod concurrent_session_tests;
mod end_to_end_tests;
