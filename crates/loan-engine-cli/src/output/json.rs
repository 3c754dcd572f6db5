use serde_json::Value;

/// Pretty-print the result envelope (or bare yearly-bucket array) as JSON.
/// This is the lossless format; schedules keep every period record.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
