//! Agent text protocol types for the `--agent` headless mode.
//!
//! Each stdin line is one [`AgentCommand`]; each stdout line is one
//! [`AgentResponse`]. The I/O loop lives in [`crate::agent_mode`].

use serde::{Deserialize, Serialize};

use simulation::buildings::BuildingView;
use simulation::catalog::BuildingType;
use simulation::hud::HudSnapshot;

// ---------------------------------------------------------------------------
// Commands (stdin → simulation)
// ---------------------------------------------------------------------------

/// A single command sent by the external agent over stdin. The `cmd` field
/// is the discriminator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Place a building of `kind` at `(x, z)`.
    Place { x: i32, z: i32, kind: BuildingType },

    /// Demolish the building at `(x, z)`.
    Delete { x: i32, z: i32 },

    /// Upgrade the building with the given id.
    Upgrade { id: String },

    /// Click `(x, z)` with the current tool.
    Click { x: i32, z: i32 },

    /// Arm placement of `kind`, or clear the tool when `kind` is absent.
    SelectTool {
        #[serde(default)]
        kind: Option<BuildingType>,
    },

    /// Toggle delete mode.
    ToggleDelete,

    /// Advance simulation time by `ms` milliseconds.
    Advance { ms: u64 },

    /// Request the HUD snapshot.
    Hud,

    /// Request every building.
    Buildings,

    /// Write the city to the save store now.
    Save,

    /// Replace the city with a new one.
    NewGame,

    /// End the session.
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (simulation → stdout)
// ---------------------------------------------------------------------------

/// Every response carries the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    /// The engine is ready to accept commands.
    Ready,

    Placed { id: String },

    Deleted { refund: u64 },

    Upgraded { id: String, cost: u64 },

    /// Time moved; lists achievements unlocked along the way.
    Advanced {
        ticks: u64,
        clock_ms: u64,
        unlocked: Vec<String>,
    },

    Hud { hud: HudSnapshot },

    Buildings { buildings: Vec<BuildingView> },

    Saved,

    /// Generic acknowledgement (tool changes, new game).
    Ok,

    /// A valid command the game refused (locked, funds, occupied, ...).
    Rejected { reason: String },

    /// The line could not be parsed, or the command failed.
    Error { message: String },

    /// The session is ending (response to `quit`).
    Goodbye,
}

/// Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_place_command() {
        let json = r#"{"cmd":"place","x":3,"z":-1,"kind":"house"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            AgentCommand::Place {
                x: 3,
                z: -1,
                kind: BuildingType::House
            }
        );
    }

    #[test]
    fn deserialize_select_tool_without_kind_clears() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"cmd":"select_tool"}"#).unwrap();
        assert_eq!(cmd, AgentCommand::SelectTool { kind: None });
        let cmd: AgentCommand =
            serde_json::from_str(r#"{"cmd":"select_tool","kind":"powerplant"}"#).unwrap();
        assert_eq!(
            cmd,
            AgentCommand::SelectTool {
                kind: Some(BuildingType::Powerplant)
            }
        );
    }

    #[test]
    fn deserialize_unit_commands() {
        for (json, expected) in [
            (r#"{"cmd":"toggle_delete"}"#, AgentCommand::ToggleDelete),
            (r#"{"cmd":"click","x":1,"z":2}"#, AgentCommand::Click { x: 1, z: 2 }),
            (r#"{"cmd":"hud"}"#, AgentCommand::Hud),
            (r#"{"cmd":"buildings"}"#, AgentCommand::Buildings),
            (r#"{"cmd":"save"}"#, AgentCommand::Save),
            (r#"{"cmd":"new_game"}"#, AgentCommand::NewGame),
            (r#"{"cmd":"quit"}"#, AgentCommand::Quit),
        ] {
            let cmd: AgentCommand = serde_json::from_str(json).unwrap();
            assert_eq!(cmd, expected, "{json}");
        }
    }

    #[test]
    fn unknown_building_type_is_parse_error() {
        let json = r#"{"cmd":"place","x":0,"z":0,"kind":"castle"}"#;
        assert!(serde_json::from_str::<AgentCommand>(json).is_err());
    }

    #[test]
    fn unknown_command_is_parse_error() {
        assert!(serde_json::from_str::<AgentCommand>(r#"{"cmd":"fly"}"#).is_err());
    }

    #[test]
    fn serialize_response_flattens_payload() {
        let resp = make_response(ResponsePayload::Placed {
            id: "house-0-0-0".into(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["protocol_version"], 1);
        assert_eq!(json["type"], "placed");
        assert_eq!(json["id"], "house-0-0-0");
    }

    #[test]
    fn serialize_rejected() {
        let resp = make_response(ResponsePayload::Rejected {
            reason: "occupied".into(),
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""type":"rejected""#), "{json}");
    }
}
