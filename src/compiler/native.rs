//! Flat record types handed across the build-backend boundary.
//!
//! One record per resource, nested collections linearized into owned
//! vectors. Every symbolic reference has already been resolved to an id (or
//! the -1 sentinel) and every event body is compiled GML text. Records are
//! never mutated after the graph is handed to a backend; the graph lives for
//! one build invocation.

/// Root of the flattened project.
#[derive(Debug, Clone, Default)]
pub struct NativeGraph {
    /// Target path of the build, set just before the backend call.
    pub filename: String,
    pub game_settings: GameSettings,
    pub game_info: GameInfo,
    pub sprites: Vec<Sprite>,
    pub sounds: Vec<Sound>,
    pub backgrounds: Vec<Background>,
    pub paths: Vec<Path>,
    pub scripts: Vec<Script>,
    pub shaders: Vec<Shader>,
    pub fonts: Vec<Font>,
    pub timelines: Vec<Timeline>,
    pub objects: Vec<GmObject>,
    pub rooms: Vec<Room>,
}

/// Global game settings block. The project description does not carry these
/// yet, so the flattener seeds the legacy defaults.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub game_icon: String,
    pub let_esc_end_game: bool,
    pub let_f4_switch_fullscreen: bool,
    pub treat_close_as_escape: bool,
    pub always_on_top: bool,
    pub game_id: i32,
    pub company: String,
    pub description: String,
    pub version: String,
    pub product: String,
    pub copyright: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_icon: String::new(),
            let_esc_end_game: true,
            let_f4_switch_fullscreen: true,
            treat_close_as_escape: true,
            always_on_top: true,
            game_id: 0,
            company: String::new(),
            description: String::new(),
            version: String::new(),
            product: String::new(),
            copyright: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameInfo {
    pub game_info_str: String,
    pub form_caption: String,
}

/// A decoded, padded, channel-reordered and zlib-compressed raster image.
/// `width`/`height` are the padded dimensions; `full_size` is the byte size
/// of the uncompressed padded bitmap.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub full_size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub name: String,
    pub id: i32,
    pub transparent: bool,
    pub shape: i32,
    pub alpha_tolerance: i32,
    pub separate_mask: bool,
    pub smooth_edges: bool,
    pub preload: bool,
    pub origin_x: i32,
    pub origin_y: i32,
    pub bb_mode: i32,
    pub bb_left: i32,
    pub bb_right: i32,
    pub bb_top: i32,
    pub bb_bottom: i32,
    pub subimages: Vec<SubImage>,
}

#[derive(Debug, Clone, Default)]
pub struct SubImage {
    pub image: Image,
}

#[derive(Debug, Clone, Default)]
pub struct Sound {
    pub name: String,
    pub id: i32,
    pub kind: i32,
    pub file_type: String,
    pub file_name: String,
    pub volume: f64,
    pub pan: f64,
    pub preload: bool,
    /// Raw audio bytes; empty when the source file was missing or unreadable.
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct Background {
    pub name: String,
    pub id: i32,
    pub transparent: bool,
    pub smooth_edges: bool,
    pub preload: bool,
    pub use_as_tileset: bool,
    pub tile_width: i32,
    pub tile_height: i32,
    pub h_offset: i32,
    pub v_offset: i32,
    pub h_sep: i32,
    pub v_sep: i32,
    pub background_image: Image,
}

#[derive(Debug, Clone, Default)]
pub struct Path {
    pub name: String,
    pub id: i32,
    pub smooth: bool,
    pub closed: bool,
    pub precision: i32,
    pub snap_x: i32,
    pub snap_y: i32,
    pub points: Vec<PathPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct PathPoint {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Script {
    pub name: String,
    pub id: i32,
    pub code: String,
}

#[derive(Debug, Clone, Default)]
pub struct Shader {
    pub name: String,
    pub id: i32,
    pub vertex: String,
    pub fragment: String,
    pub shader_type: String,
    pub precompile: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Font {
    pub name: String,
    pub id: i32,
    pub font_name: String,
    pub size: i32,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub name: String,
    pub id: i32,
    pub moments: Vec<Moment>,
}

#[derive(Debug, Clone, Default)]
pub struct Moment {
    pub number: i32,
    pub code: String,
}

#[derive(Debug, Clone, Default)]
pub struct GmObject {
    pub name: String,
    pub id: i32,
    pub sprite_id: i32,
    pub solid: bool,
    pub visible: bool,
    pub depth: i32,
    pub persistent: bool,
    pub parent_id: i32,
    pub mask_id: i32,
    pub main_events: Vec<MainEvent>,
}

/// Bucket of sub-events sharing one main event type, in first-seen order of
/// distinct types.
#[derive(Debug, Clone, Default)]
pub struct MainEvent {
    pub id: i32,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default)]
pub struct Event {
    pub id: i32,
    pub code: String,
}

#[derive(Debug, Clone, Default)]
pub struct Room {
    pub name: String,
    pub id: i32,
    pub caption: String,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub persistent: bool,
    pub background_color: u32,
    pub draw_background_color: bool,
    pub creation_code: String,
    pub enable_views: bool,
    pub background_defs: Vec<BackgroundDef>,
    pub views: Vec<View>,
    pub instances: Vec<Instance>,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub id: i32,
    pub object_id: i32,
    pub x: i32,
    pub y: i32,
    pub locked: bool,
    pub creation_code: String,
    pub pre_creation_code: String,
}

#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub id: i32,
    pub background_id: i32,
    pub room_x: i32,
    pub room_y: i32,
    pub locked: bool,
    pub bg_x: i32,
    pub bg_y: i32,
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

#[derive(Debug, Clone, Default)]
pub struct View {
    pub visible: bool,
    pub view_x: i32,
    pub view_y: i32,
    pub view_w: i32,
    pub view_h: i32,
    pub port_x: i32,
    pub port_y: i32,
    pub port_w: i32,
    pub port_h: i32,
    pub border_h: i32,
    pub border_v: i32,
    pub speed_h: i32,
    pub speed_v: i32,
    pub object_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct BackgroundDef {
    pub visible: bool,
    pub foreground: bool,
    pub x: i32,
    pub y: i32,
    pub tile_horiz: bool,
    pub tile_vert: bool,
    pub h_speed: i32,
    pub v_speed: i32,
    pub stretch: bool,
    pub background_id: i32,
}
