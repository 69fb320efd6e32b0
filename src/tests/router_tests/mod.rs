mod dashboard_tests;
mod text_tests;
mod tickets_tests;
