mod applications_tests;
mod auth_tests;
mod banks_tests;
mod merchants_tests;
mod outlets_tests;
mod public_tests;
