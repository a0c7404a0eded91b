use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table::TableOptions::from_env();

    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        // Paged listings render their rows plus a footer line.
        Value::Object(mut map) if map.get("items").is_some_and(Value::is_array) => {
            let items = match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let footer = format!(
                "page {} of {} ({} total)",
                map.get("page").map_or_else(|| "-".to_string(), value_to_cell),
                map.get("pages").map_or_else(|| "-".to_string(), value_to_cell),
                map.get("total").map_or_else(|| "-".to_string(), value_to_cell),
            );
            Ok(format!("{}\n{footer}", render_array_table(&items, options)))
        }
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        status: &'static str,
    }

    #[derive(Serialize)]
    struct Page {
        items: Vec<Example>,
        total: u64,
        page: u32,
        pages: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            id: "itm-1",
            status: "found",
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "itm-1");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            id: "itm-1",
            status: "found",
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example {
            id: "itm-1",
            status: "found",
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("itm-1"));
    }

    #[test]
    fn paged_listing_renders_rows_and_footer() {
        let value = Page {
            items: vec![
                Example {
                    id: "itm-1",
                    status: "found",
                },
                Example {
                    id: "itm-2",
                    status: "lost",
                },
            ],
            total: 14,
            page: 2,
            pages: 2,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("id") && lines[0].contains("status"));
        assert!(out.contains("itm-2"));
        assert_eq!(lines.last().copied(), Some("page 2 of 2 (14 total)"));
    }

    #[test]
    fn empty_listing_says_so() {
        let value: Vec<Example> = Vec::new();
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
