use std::path::Path;

use anyhow::Result;
use capconf::{ParseResult, ParsedQueue};

use super::Session;
use crate::cli::ColorWhen;
use crate::ui::json::write_event;
use crate::ui::views::parse as view;

pub fn cmd_parse(file: &Path, json: bool, verbose: u8, color: Option<ColorWhen>) -> Result<()> {
    let session = Session::load(json, verbose, color)?;
    let ui = session.ui;
    let file_label = file.display().to_string();

    if json {
        let mut out = std::io::stdout().lock();
        let _ = write_event(
            &mut out,
            &serde_json::json!({
                "event": "start",
                "command": "parse",
                "file": file_label,
            }),
        );
    }

    let result = session.parse_input(file)?;

    if json {
        emit_json(&result);
    } else {
        if !ui.quiet {
            print!(
                "{}",
                view::render_parse_header(&file_label, &result, ui.color, ui.unicode)
            );
            println!();
            print!(
                "{}",
                view::render_queue_tree(&result, ui.verbose > 0, ui.color, ui.unicode)
            );
            let globals =
                view::render_global_properties(result.global_properties(), ui.color, ui.unicode);
            if !globals.is_empty() {
                print!("\n{}", globals);
            }
            let issues = view::render_parse_issues(&result, ui.color, ui.unicode);
            if !issues.is_empty() {
                print!("\n{}", issues);
            }
            println!();
        }
        print!(
            "{}",
            view::render_parse_summary(&result, &file_label, ui.color, ui.unicode)
        );
    }

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn queue_event(queue: &ParsedQueue) -> serde_json::Value {
    serde_json::json!({
        "event": "queue",
        "command": "parse",
        "path": queue.path,
        "name": queue.name,
        "parent": queue.parent,
        "capacity": queue.capacity.raw(),
        "mode": queue.capacity.mode(),
        "maximum_capacity": queue.maximum_capacity.raw(),
        "state": queue.state,
        "accessible_node_labels": queue.accessible_node_labels,
        "default_node_label_expression": queue.default_node_label_expression,
        "children": queue.children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
    })
}

fn emit_json(result: &ParseResult) {
    let mut out = std::io::stdout().lock();

    for queue in result.queues().iter().flat_map(ParsedQueue::iter) {
        let _ = write_event(&mut out, &queue_event(queue));
    }
    super::emit_parse_issues(&mut out, "parse", result);

    let _ = write_event(
        &mut out,
        &serde_json::json!({
            "event": "complete",
            "command": "parse",
            "queues": result.queue_count(),
            "legacy_mode": result.is_legacy_mode(),
            "global_properties": result.global_properties(),
            "errors": result.errors().len(),
            "warnings": result.warnings().len(),
            "success": !result.has_errors(),
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use capconf::parse_flat_config;
    use std::collections::BTreeMap;

    #[test]
    fn queue_event_fields() {
        let flat: BTreeMap<String, String> = [
            ("root.queues", "a"),
            ("root.a.capacity", "2w"),
            ("root.a.accessible-node-labels", "gpu,ssd"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let result = parse_flat_config(&flat);
        let queue = result.find_queue("root.a").unwrap();

        let event = queue_event(queue);
        assert_eq!(event["event"], "queue");
        assert_eq!(event["path"], "root.a");
        assert_eq!(event["parent"], "root");
        assert_eq!(event["capacity"], "2w");
        assert_eq!(event["mode"], "weight");
        assert_eq!(event["state"], "RUNNING");
        assert_eq!(event["accessible_node_labels"][1], "ssd");
    }
}
