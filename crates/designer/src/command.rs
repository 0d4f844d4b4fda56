//! JSON command protocol for scripted sessions.
//!
//! Each command mirrors one user interaction in the editor.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use shared::{DecalSettingsPatch, GarmentType, Zone};

use crate::harness::DesignerSession;
use crate::viewport::camera::ViewportRect;

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DesignerCommand {
    /// Switch the edited zone (and the camera framing).
    SelectZone { zone: Zone },
    /// Switch garment type.
    SetGarment { garment: GarmentType },
    /// Set garment colour (hex).
    SetColor { color: String },
    /// Attach an image after type/size validation.
    UploadImage {
        zone: Zone,
        content_type: String,
        size: u64,
        image: String,
    },
    /// Detach a zone's image.
    RemoveImage { zone: Zone },
    /// Merge a partial settings update.
    UpdateSettings {
        zone: Zone,
        settings: DecalSettingsPatch,
    },
    /// Restore a zone's default settings.
    ResetSettings { zone: Zone },
    /// Clear every zone.
    ResetAll,
    /// Begin dragging a zone's decal.
    DragStart { zone: Zone },
    /// Pointer hit on the zone's carrier surface (model space).
    DragMove { zone: Zone, point: [f32; 3] },
    /// Finish dragging.
    DragEnd { zone: Zone },
    /// Pointer inside the 2D position grid; `rect` is `[x, y, width, height]`.
    GridMove {
        zone: Zone,
        pointer: [f32; 2],
        rect: [f32; 4],
    },
    /// Resolve placements: one zone, or every zone with an image.
    Resolve {
        #[serde(default)]
        zone: Option<Zone>,
    },
    /// Inspect the session.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the session.
pub fn execute_command(session: &mut DesignerSession, cmd: DesignerCommand) -> CommandResponse {
    match cmd {
        DesignerCommand::SelectZone { zone } => {
            session.select_zone(zone);
            CommandResponse::ok_with_data(serde_json::json!({ "zone": zone }))
        }

        DesignerCommand::SetGarment { garment } => {
            session.set_garment(garment);
            CommandResponse::ok_with_data(serde_json::json!({
                "garment": garment,
                "archetype": session.archetype(),
                "bounds": session.bounds(),
            }))
        }

        DesignerCommand::SetColor { color } => {
            let name = shared::swatch_name(&color);
            session.set_color(color);
            CommandResponse::ok_with_data(serde_json::json!({ "swatch": name }))
        }

        DesignerCommand::UploadImage {
            zone,
            content_type,
            size,
            image,
        } => match session.upload(zone, &content_type, size, image) {
            Ok(kind) => CommandResponse::ok_with_data(serde_json::json!({
                "zone": zone,
                "kind": kind,
                "needs_sanitizing": kind.needs_sanitizing(),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        DesignerCommand::RemoveImage { zone } => {
            let removed = session.remove_image(zone);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        DesignerCommand::UpdateSettings { zone, settings } => {
            session.update_settings(zone, &settings);
            CommandResponse::ok_with_data(serde_json::json!({
                "settings": session.decal(zone).settings,
            }))
        }

        DesignerCommand::ResetSettings { zone } => {
            session.reset_settings(zone);
            CommandResponse::ok()
        }

        DesignerCommand::ResetAll => {
            session.reset_all();
            CommandResponse::ok()
        }

        DesignerCommand::DragStart { zone } => {
            if session.drag_start(zone) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("zone {zone} has no image to drag"))
            }
        }

        DesignerCommand::DragMove { zone, point } => {
            let moved = session.drag_move_point(zone, Vec3::from(point));
            CommandResponse::ok_with_data(serde_json::json!({
                "applied": moved.is_some(),
                "settings": session.decal(zone).settings,
            }))
        }

        DesignerCommand::DragEnd { zone } => {
            let ended = session.drag_end(zone);
            CommandResponse::ok_with_data(serde_json::json!({ "ended": ended }))
        }

        DesignerCommand::GridMove { zone, pointer, rect } => {
            let [x, y, width, height] = rect;
            session.grid_move(zone, Vec2::from(pointer), ViewportRect::new(x, y, width, height));
            CommandResponse::ok_with_data(serde_json::json!({
                "settings": session.decal(zone).settings,
            }))
        }

        DesignerCommand::Resolve { zone: Some(zone) } => {
            CommandResponse::ok_with_data(serde_json::json!({
                "zone": zone,
                "transform": session.placement_for(zone),
            }))
        }

        DesignerCommand::Resolve { zone: None } => {
            let placements: serde_json::Map<String, serde_json::Value> = session
                .placements()
                .into_iter()
                .map(|(zone, transform)| (zone.to_string(), serde_json::json!(transform)))
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({ "placements": placements }))
        }

        DesignerCommand::Inspect => {
            let zones: Vec<serde_json::Value> = session
                .store
                .decals()
                .iter()
                .map(|(zone, decal)| {
                    serde_json::json!({
                        "zone": zone,
                        "has_image": decal.image.is_some(),
                        "settings": decal.settings,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "garment": session.garment,
                "color": session.color,
                "archetype": session.archetype(),
                "active_zone": session.active_zone,
                "dragging": session.drag.active_zone(),
                "bounds": session.bounds(),
                "zones": zones,
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(session: &mut DesignerSession, json: &str) -> Result<CommandResponse, String> {
    let cmd: DesignerCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    session: &mut DesignerSession,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<DesignerCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_reset_all() {
        let cmd: DesignerCommand = serde_json::from_str(r#"{"command": "reset_all"}"#).unwrap();
        assert!(matches!(cmd, DesignerCommand::ResetAll));
    }

    #[test]
    fn test_command_serde_update_settings() {
        let json = r#"{"command": "update_settings", "zone": "leftSleeve", "settings": {"scale": 1.2, "flipX": true}}"#;
        let cmd: DesignerCommand = serde_json::from_str(json).unwrap();
        match cmd {
            DesignerCommand::UpdateSettings { zone, settings } => {
                assert_eq!(zone, Zone::LeftSleeve);
                assert_eq!(settings.scale, Some(1.2));
                assert_eq!(settings.flip_x, Some(true));
                assert_eq!(settings.rotation, None);
            }
            _ => panic!("Expected UpdateSettings"),
        }
    }

    #[test]
    fn test_command_serde_resolve_without_zone() {
        let cmd: DesignerCommand = serde_json::from_str(r#"{"command": "resolve"}"#).unwrap();
        assert!(matches!(cmd, DesignerCommand::Resolve { zone: None }));
    }

    #[test]
    fn test_execute_upload_rejected() {
        let mut s = DesignerSession::new();
        let json = r#"{"command": "upload_image", "zone": "front", "content_type": "image/gif", "size": 10, "image": "x"}"#;
        let resp = execute_json(&mut s, json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Please upload a PNG, JPG, or SVG file."));
    }

    #[test]
    fn test_execute_drag_without_image_fails() {
        let mut s = DesignerSession::new();
        let resp = execute_json(&mut s, r#"{"command": "drag_start", "zone": "back"}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_inspect() {
        let mut s = DesignerSession::new();
        let resp = execute_json(&mut s, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["garment"], "hoodie");
        assert_eq!(data["archetype"], "boxProxy");
        assert_eq!(data["zones"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_execute_grid_move() {
        let mut s = DesignerSession::new();
        let json = r#"{"command": "grid_move", "zone": "rightSleeve", "pointer": [10.0, 30.0], "rect": [10.0, 10.0, 40.0, 40.0]}"#;
        let resp = execute_json(&mut s, json).unwrap();
        assert!(resp.success);
        let settings = &resp.data.unwrap()["settings"];
        assert_eq!(settings["positionX"], -1.0);
        assert_eq!(settings["positionY"], 0.0);
        assert_eq!(s.decal(Zone::RightSleeve).settings.position_x(), -1.0);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut s = DesignerSession::new();
        assert!(execute_json(&mut s, "not valid json").is_err());
    }
}
