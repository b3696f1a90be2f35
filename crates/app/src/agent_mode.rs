//! Headless `--agent` mode: a blocking loop that reads JSON commands from
//! stdin and writes JSON responses to stdout.
//!
//! Stdout carries only the protocol; no log subscriber is installed in this
//! mode and session messages go to stderr.

use std::io::{BufRead, Write};

use simulation::economy::ClickOutcome;

use crate::engine::Engine;
use crate::protocol::{make_response, AgentCommand, AgentResponse, ResponsePayload};

/// Serve commands from `input` until `quit` or end of input.
pub fn run_agent_mode<R: BufRead, W: Write>(
    engine: &mut Engine,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    write_response(&mut output, &make_response(ResponsePayload::Ready))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, engine),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);

        write_response(&mut output, &response)?;

        if is_goodbye {
            break;
        }
    }
    Ok(())
}

fn write_response<W: Write>(output: &mut W, response: &AgentResponse) -> std::io::Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    writeln!(output)?;
    output.flush()
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub fn process_command(cmd: AgentCommand, engine: &mut Engine) -> AgentResponse {
    let payload = match cmd {
        AgentCommand::Place { x, z, kind } => match engine.try_place(x, z, kind) {
            Ok(id) => ResponsePayload::Placed { id },
            Err(e) => rejected(e),
        },

        AgentCommand::Delete { x, z } => match engine.try_delete(x, z) {
            Ok(refund) => ResponsePayload::Deleted { refund },
            Err(e) => rejected(e),
        },

        AgentCommand::Upgrade { id } => match engine.try_upgrade(&id) {
            Ok(cost) => ResponsePayload::Upgraded { id, cost },
            Err(e) => rejected(e),
        },

        AgentCommand::Click { x, z } => match engine.try_click(x, z) {
            Ok(ClickOutcome::Placed(id)) => ResponsePayload::Placed { id },
            Ok(ClickOutcome::Deleted(refund)) => ResponsePayload::Deleted { refund },
            Err(e) => rejected(e),
        },

        AgentCommand::SelectTool { kind } => {
            engine.select_tool(kind);
            ResponsePayload::Ok
        }

        AgentCommand::ToggleDelete => {
            engine.toggle_delete_mode();
            ResponsePayload::Ok
        }

        AgentCommand::Advance { ms } => {
            let ticks = engine.advance(ms);
            ResponsePayload::Advanced {
                ticks,
                clock_ms: engine.state().clock_ms,
                unlocked: engine.take_notifications(),
            }
        }

        AgentCommand::Hud => ResponsePayload::Hud { hud: engine.hud() },

        AgentCommand::Buildings => ResponsePayload::Buildings {
            buildings: engine.buildings(),
        },

        AgentCommand::Save => match engine.save_now() {
            Ok(()) => ResponsePayload::Saved,
            Err(e) => ResponsePayload::Error {
                message: format!("Save failed: {e}"),
            },
        },

        AgentCommand::NewGame => {
            engine.new_game();
            ResponsePayload::Ok
        }

        AgentCommand::Quit => ResponsePayload::Goodbye,
    };
    make_response(payload)
}

fn rejected(e: simulation::CommandError) -> ResponsePayload {
    ResponsePayload::Rejected {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_ADVANCE_MS;
    use serde_json::Value;

    fn run_session(input: &str) -> Vec<Value> {
        let mut engine = Engine::in_memory();
        let mut out = Vec::new();
        run_agent_mode(&mut engine, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn session_starts_ready_and_ends_on_quit() {
        let responses = run_session("{\"cmd\":\"quit\"}\n{\"cmd\":\"hud\"}\n");
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["type"], "ready");
        assert_eq!(responses[1]["type"], "goodbye");
    }

    #[test]
    fn blank_lines_are_skipped_and_garbage_is_an_error() {
        let responses = run_session("\n   \nnot json\n");
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["type"], "error");
        assert!(responses[1]["message"]
            .as_str()
            .unwrap()
            .starts_with("Parse error"));
    }

    #[test]
    fn place_advance_and_query() {
        let input = [
            r#"{"cmd":"place","x":0,"z":0,"kind":"house"}"#,
            r#"{"cmd":"place","x":0,"z":0,"kind":"road"}"#,
            r#"{"cmd":"advance","ms":3000}"#,
            r#"{"cmd":"buildings"}"#,
            r#"{"cmd":"hud"}"#,
        ]
        .join("\n");
        let responses = run_session(&input);

        assert_eq!(responses[1]["type"], "placed");
        assert_eq!(responses[1]["id"], "house-0-0-0");
        assert_eq!(responses[2]["type"], "rejected");
        assert!(responses[2]["reason"].as_str().unwrap().contains("occupied"));
        assert_eq!(responses[3]["type"], "advanced");
        assert_eq!(responses[3]["ticks"], 30);
        assert_eq!(responses[4]["buildings"][0]["under_construction"], false);
        assert_eq!(responses[5]["hud"]["population"], 4);
    }

    #[test]
    fn delete_reports_refund() {
        let mut engine = Engine::in_memory();
        process_command(
            AgentCommand::Place {
                x: 1,
                z: 1,
                kind: simulation::BuildingType::Road,
            },
            &mut engine,
        );
        let response = process_command(AgentCommand::Delete { x: 1, z: 1 }, &mut engine);
        match response.payload {
            ResponsePayload::Deleted { refund } => assert_eq!(refund, 50),
            other => panic!("expected Deleted, got {other:?}"),
        }
    }

    #[test]
    fn huge_advance_is_capped() {
        let mut engine = Engine::in_memory();
        let response = process_command(AgentCommand::Advance { ms: u64::MAX / 2 }, &mut engine);
        match response.payload {
            ResponsePayload::Advanced { ticks, .. } => assert_eq!(ticks, MAX_ADVANCE_MS / 100),
            other => panic!("expected Advanced, got {other:?}"),
        }
    }

    #[test]
    fn click_places_with_selected_tool() {
        let input = [
            r#"{"cmd":"click","x":0,"z":0}"#,
            r#"{"cmd":"select_tool","kind":"road"}"#,
            r#"{"cmd":"click","x":0,"z":0}"#,
            r#"{"cmd":"toggle_delete"}"#,
            r#"{"cmd":"click","x":0,"z":0}"#,
        ]
        .join("\n");
        let responses = run_session(&input);

        assert_eq!(responses[1]["type"], "rejected");
        assert_eq!(responses[1]["reason"], "no tool selected");
        assert_eq!(responses[3]["type"], "placed");
        assert_eq!(responses[5]["type"], "deleted");
        assert_eq!(responses[5]["refund"], 50);
    }
}
