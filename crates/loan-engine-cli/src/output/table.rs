use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Schedule results render as a summary plus one row per period; payoff
/// comparisons render the savings plus a baseline/accelerated side-by-side;
/// anything else falls back to a field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_field_value_table(value);
            }
        }
        Value::Array(arr) => print_record_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        Value::Object(map) if map.contains_key("schedule") => {
            print_simulation(map);
        }
        Value::Object(map) if map.contains_key("baseline") => {
            print_payoff_comparison(map);
        }
        _ => print_field_value_table(result),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Simulation result: scalar summary first, then the period rows.
fn print_simulation(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if key != "schedule" {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(schedule)) = map.get("schedule") {
        println!();
        print_record_table(schedule);
    }
}

/// Payoff comparison: savings first, then both runs side by side.
fn print_payoff_comparison(map: &serde_json::Map<String, Value>) {
    if let Some(Value::Object(comparison)) = map.get("comparison") {
        let mut builder = Builder::default();
        builder.push_record(["Saving", "Value"]);
        for (key, val) in comparison {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }

    let summary_fields = ["periods_to_payoff", "total_paid", "total_interest", "status"];
    let mut builder = Builder::default();
    builder.push_record(["Field", "Baseline", "Accelerated"]);
    if let Some(payment) = map.get("monthly_payment") {
        builder.push_record([
            "monthly_payment",
            &format_value(payment),
            &format_value(payment),
        ]);
    }
    for field in summary_fields {
        let base = map
            .get("baseline")
            .and_then(|b| b.get(field))
            .map(format_value)
            .unwrap_or_default();
        let accel = map
            .get("accelerated")
            .and_then(|a| a.get(field))
            .map(format_value)
            .unwrap_or_default();
        builder.push_record([field, &base, &accel]);
    }
    println!("\n{}", Table::from(builder));
}

/// One row per object, headers from the first object's keys.
fn print_record_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_field_value_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
