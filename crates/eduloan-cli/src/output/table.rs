use serde_json::Value;
use tabled::{Table, builder::Builder};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    // Print the result section
    match result {
        Value::Object(res_map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            let mut nested: Vec<(&String, &Vec<Value>)> = Vec::new();
            for (key, val) in res_map {
                match val {
                    // Row collections (projections, yearly schedules) get their own table
                    Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                        nested.push((key, rows));
                    }
                    _ => {
                        builder.push_record([key.as_str(), &format_value(val)]);
                    }
                }
            }
            let table = Table::from(builder);
            println!("{}", table);

            for (key, rows) in nested {
                println!("\n{}:", key);
                print_array_table(rows);
            }
        }
        Value::Array(rows) => print_array_table(rows),
        _ => print_flat_object(&Value::Object(envelope.clone())),
    }

    // Print warnings if any
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

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(v))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        // Simple array of values
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(v)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
