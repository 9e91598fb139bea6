//! Validating JSON payloads with runtypes-validator

use runtypes_validator::prelude::*;

fn main() {
    let shape = union![
        object! { kind: literal("circle"), radius: number() },
        object! { kind: literal("rect"), width: number(), height: number() },
    ];

    let payloads = [
        r#"{ "kind": "circle", "radius": 2 }"#,
        r#"{ "kind": "rect", "width": 3 }"#,
        r#"{ "kind": "blob" }"#,
        r#"[1, 2, 3]"#,
    ];

    for text in payloads {
        let json: serde_json::Value = match serde_json::from_str(text) {
            Ok(json) => json,
            Err(e) => {
                println!("✗ {text} is not JSON: {e}");
                continue;
            }
        };
        match shape.check(&Value::from(json)) {
            Ok(_) => println!("✓ {text}"),
            Err(e) => println!("✗ {text}\n    {e}"),
        }
    }

    println!("\n{shape}");
}
