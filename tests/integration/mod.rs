mod concurrency;
mod error_cases;
