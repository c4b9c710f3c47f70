
#[cfg(test)]
mod webhook_tests;
