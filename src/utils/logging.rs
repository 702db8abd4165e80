use std::sync::atomic::{AtomicBool, Ordering};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use once_cell::sync::Lazy;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_TO_FILE: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Lazy<Mutex<Option<std::fs::File>>> = Lazy::new(|| Mutex::new(None));

const DEFAULT_LOG_FILE: &str = "popularity.log";

/// Initializes logging based on environment variables:
/// - POPULARITY_LOGGING: enables/disables logging (true/false, unset means false)
/// - POPULARITY_LOG_TO_FILE: append to a file instead of stdout (true/false)
/// - POPULARITY_LOG_FILE: path of that file, defaults to `popularity.log`
///
/// To enable logging in tests, run: POPULARITY_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    match env::var("POPULARITY_LOGGING") {
        Ok(value) => {
            match value.as_str() {
                "true" => {
                    ENABLE_LOGGING.store(true, Ordering::SeqCst);
                    if env::var("POPULARITY_LOG_TO_FILE").unwrap_or_else(|_| "false".to_string()) == "true" {
                        let path = env::var("POPULARITY_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
                        match OpenOptions::new().create(true).append(true).open(&path) {
                            Ok(file) => {
                                if let Ok(mut guard) = LOG_FILE.lock() {
                                    *guard = Some(file);
                                    LOG_TO_FILE.store(true, Ordering::SeqCst);
                                }
                            }
                            Err(e) => eprintln!("Failed to open log file {}: {}, logging to stdout", path, e),
                        }
                    }
                },
                "false" => ENABLE_LOGGING.store(false, Ordering::SeqCst),
                _ => panic!("\nError: POPULARITY_LOGGING environment variable must be 'true' or 'false'\n\nTo run the program, use one of:\n  POPULARITY_LOGGING=true cargo run\n  POPULARITY_LOGGING=false cargo run\n"),
            }
        }
        Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
    }
}

pub fn log(prefix: &str, message: &str) {
    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }
    let line = format!("  [{}]   {}", prefix, message);
    if LOG_TO_FILE.load(Ordering::SeqCst) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                if writeln!(file, "{}", line).is_ok() {
                    return;
                }
            }
        }
    }
    println!("{}", line);
}
