mod mocks;
mod check_tests;
