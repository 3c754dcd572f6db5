use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: comparison outputs reduce to their savings, schedule and
/// payment outputs to their headline number, falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Comparison outputs: the savings are the answer
    if let Some(Value::Object(comparison)) = result_obj.get("comparison") {
        if let Some(shortfall) = comparison.get("shortfall").filter(|v| !v.is_null()) {
            println!("shortfall: {}", format_minimal(shortfall));
            return;
        }
        let periods = comparison.get("periods_saved").map(format_minimal);
        let interest = comparison.get("interest_saved").map(format_minimal);
        if let (Some(periods), Some(interest)) = (periods, interest) {
            println!("periods_saved: {}", periods);
            println!("interest_saved: {}", interest);
            return;
        }
    }

    // Priority list of headline output fields
    let priority_keys = ["monthly_payment", "total_interest", "periods_to_payoff"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
