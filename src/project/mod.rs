use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Typed accessor capability shared by every project resource. The linker
/// resolves symbolic references through this interface instead of poking at
/// fields by name.
pub trait Resource {
    fn name(&self) -> &str;
    fn id(&self) -> i32;
}

macro_rules! impl_resource {
    ($($ty:ty),+ $(,)?) => {
        $(impl Resource for $ty {
            fn name(&self) -> &str {
                &self.name
            }
            fn id(&self) -> i32 {
                self.id
            }
        })+
    };
}

/// Root of a project description: one ordered collection per resource kind.
/// Resource names are unique within their kind and are the only way resources
/// refer to each other; numeric ids are assigned by whichever tool produced
/// the description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sprites: Vec<Sprite>,
    #[serde(default)]
    pub sounds: Vec<Sound>,
    #[serde(default)]
    pub backgrounds: Vec<Background>,
    #[serde(default)]
    pub paths: Vec<PathResource>,
    #[serde(default)]
    pub scripts: Vec<Script>,
    #[serde(default)]
    pub shaders: Vec<Shader>,
    #[serde(default)]
    pub fonts: Vec<Font>,
    #[serde(default)]
    pub timelines: Vec<Timeline>,
    #[serde(default)]
    pub objects: Vec<GmObject>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprite {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub shape: i32,
    #[serde(default)]
    pub alpha_tolerance: i32,
    #[serde(default)]
    pub separate_mask: bool,
    #[serde(default)]
    pub smooth_edges: bool,
    #[serde(default)]
    pub preload: bool,
    #[serde(default)]
    pub origin_x: i32,
    #[serde(default)]
    pub origin_y: i32,
    #[serde(default)]
    pub bbox_mode: i32,
    #[serde(default)]
    pub bbox_left: i32,
    #[serde(default)]
    pub bbox_right: i32,
    #[serde(default)]
    pub bbox_top: i32,
    #[serde(default)]
    pub bbox_bottom: i32,
    /// Image file paths, one per animation frame.
    #[serde(default)]
    pub subimages: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sound {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub kind: i32,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub pan: f64,
    #[serde(default)]
    pub preload: bool,
    /// Path of the audio file to buffer at flatten time.
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Background {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub smooth_edges: bool,
    #[serde(default)]
    pub preload: bool,
    #[serde(default)]
    pub use_as_tileset: bool,
    #[serde(default)]
    pub tile_width: i32,
    #[serde(default)]
    pub tile_height: i32,
    #[serde(default)]
    pub horizontal_offset: i32,
    #[serde(default)]
    pub vertical_offset: i32,
    #[serde(default)]
    pub horizontal_spacing: i32,
    #[serde(default)]
    pub vertical_spacing: i32,
    /// Path of the background image file.
    #[serde(default)]
    pub image: String,
}

/// Named `PathResource` to keep it from shadowing `std::path::Path` at use
/// sites.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathResource {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub precision: i32,
    #[serde(default)]
    pub snap_x: i32,
    #[serde(default)]
    pub snap_y: i32,
    #[serde(default)]
    pub points: Vec<PathPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathPoint {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub speed: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Shader {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub vertex_code: String,
    #[serde(default)]
    pub fragment_code: String,
    #[serde(default, rename = "type")]
    pub shader_type: String,
    #[serde(default)]
    pub precompile: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Font {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub font_name: String,
    #[serde(default)]
    pub size: i32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timeline {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub moments: Vec<Moment>,
}

/// One step of a timeline. Like an event it carries either an action list or
/// an already-compiled code body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Moment {
    #[serde(default)]
    pub number: i32,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GmObject {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub sprite_name: String,
    #[serde(default)]
    pub solid: bool,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub depth: i32,
    #[serde(default)]
    pub persistent: bool,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub mask_name: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// An event hook on an object, identified by its `(event_type, number)` pair.
/// Carries either an action sequence or a precompiled code body; after
/// flattening only the code form survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub event_type: i32,
    #[serde(default)]
    pub number: i32,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub code: String,
}

/// One drag-and-drop instruction. Which attributes are meaningful depends on
/// `kind` and `exe_type`; the compiler dispatches exhaustively over `kind`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub kind: ActionKind,
    #[serde(default)]
    pub exe_type: ExecutionType,
    #[serde(default)]
    pub is_question: bool,
    #[serde(default)]
    pub is_not: bool,
    #[serde(default)]
    pub relative: bool,
    #[serde(default)]
    pub use_apply_to: bool,
    #[serde(default = "default_who_name")]
    pub who_name: String,
    #[serde(default)]
    pub function_name: String,
    #[serde(default)]
    pub code_string: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

fn default_who_name() -> String {
    "self".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Begin,
    End,
    Else,
    Exit,
    Repeat,
    Variable,
    Code,
    #[default]
    Normal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionType {
    #[default]
    None,
    Function,
    Code,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub kind: ArgumentKind,
    #[serde(default)]
    pub value: String,
}

/// How an argument's raw value should be rendered into GML. The resource
/// kinds carry a resource name in `value`; see `render_argument` for the
/// rendering rules per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    #[default]
    String,
    Both,
    Boolean,
    Menu,
    Color,
    Sprite,
    Sound,
    Background,
    Path,
    Script,
    Object,
    Room,
    Font,
    Timeline,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub persistent: bool,
    #[serde(default)]
    pub show_color: bool,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub enable_views: bool,
    #[serde(default)]
    pub backgrounds: Vec<RoomBackground>,
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub id: i32,
    /// Name of the object this instance is placed from.
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tile {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub background_name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub xoffset: i32,
    #[serde(default)]
    pub yoffset: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub depth: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct View {
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub xview: i32,
    #[serde(default)]
    pub yview: i32,
    #[serde(default)]
    pub wview: i32,
    #[serde(default)]
    pub hview: i32,
    #[serde(default)]
    pub xport: i32,
    #[serde(default)]
    pub yport: i32,
    #[serde(default)]
    pub wport: i32,
    #[serde(default)]
    pub hport: i32,
    #[serde(default)]
    pub hborder: i32,
    #[serde(default)]
    pub vborder: i32,
    #[serde(default)]
    pub hspeed: i32,
    #[serde(default)]
    pub vspeed: i32,
    /// Name of the object the view follows, empty for none.
    #[serde(default)]
    pub object_following: String,
}

/// A background layer definition inside a room; `name` references a
/// background resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomBackground {
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub foreground: bool,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub htiled: bool,
    #[serde(default)]
    pub vtiled: bool,
    #[serde(default)]
    pub hspeed: i32,
    #[serde(default)]
    pub vspeed: i32,
    #[serde(default)]
    pub stretch: bool,
    #[serde(default)]
    pub name: String,
}

impl_resource!(
    Sprite,
    Sound,
    Background,
    PathResource,
    Script,
    Shader,
    Font,
    Timeline,
    GmObject,
    Room,
);

/// Load a project description from a JSON file.
pub fn load_project(path: &Path) -> Result<Project> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {}", path.display()))?;
    let project: Project = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse project file: {}", path.display()))?;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_deserializes_with_defaults() {
        let project: Project = serde_json::from_str(r#"{"name": "demo"}"#).unwrap();
        assert_eq!(project.name, "demo");
        assert!(project.sprites.is_empty());
        assert!(project.rooms.is_empty());
    }

    #[test]
    fn test_action_defaults() {
        let action: Action = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(action.kind, ActionKind::Normal);
        assert_eq!(action.exe_type, ExecutionType::None);
        assert_eq!(action.who_name, "self");
        assert!(action.arguments.is_empty());
    }

    #[test]
    fn test_resource_accessors() {
        let sprite: Sprite =
            serde_json::from_str(r#"{"name": "spr_player", "id": 3}"#).unwrap();
        assert_eq!(sprite.name(), "spr_player");
        assert_eq!(sprite.id(), 3);
    }

    #[test]
    fn test_event_with_actions() {
        let event: Event = serde_json::from_str(
            r#"{
                "event_type": 0,
                "number": 0,
                "actions": [
                    {
                        "kind": "variable",
                        "relative": true,
                        "arguments": [
                            {"kind": "string", "value": "score"},
                            {"kind": "string", "value": "10"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(event.actions.len(), 1);
        assert_eq!(event.actions[0].kind, ActionKind::Variable);
        assert!(event.actions[0].relative);
    }
}
