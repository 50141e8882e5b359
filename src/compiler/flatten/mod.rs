use crate::compiler::codegen::compile_event;
use crate::compiler::linker::resolve_id;
use crate::compiler::native;
use crate::project::{
    Background, Font, GmObject, Instance, Moment, PathPoint, PathResource, Project, Room,
    RoomBackground, Script, Shader, Sound, Sprite, Tile, Timeline, View,
};
use anyhow::{Context, Result};

pub mod media;

/// Legacy default room clear color (ABGR).
const ROOM_BACKGROUND_COLOR: u32 = 0x40C0_FFFF;

/// Linearize a whole project into the flat graph a build backend consumes.
///
/// One native record per resource, in collection order; every symbolic
/// reference resolved to an id at this point, every event and timeline
/// moment carrying compiled code. Each call allocates a fresh graph; no
/// state survives between invocations. The only hard failure is an
/// ill-formed action sequence; missing media degrades to empty records.
pub fn flatten(project: &Project) -> Result<native::NativeGraph> {
    Ok(native::NativeGraph {
        filename: String::new(),
        game_settings: native::GameSettings::default(),
        game_info: native::GameInfo::default(),
        sprites: project.sprites.iter().map(flatten_sprite).collect(),
        sounds: project.sounds.iter().map(flatten_sound).collect(),
        backgrounds: project.backgrounds.iter().map(flatten_background).collect(),
        paths: project.paths.iter().map(flatten_path).collect(),
        scripts: project.scripts.iter().map(flatten_script).collect(),
        shaders: project.shaders.iter().map(flatten_shader).collect(),
        fonts: project.fonts.iter().map(flatten_font).collect(),
        timelines: project
            .timelines
            .iter()
            .map(flatten_timeline)
            .collect::<Result<_>>()?,
        objects: project
            .objects
            .iter()
            .map(|object| flatten_object(object, project))
            .collect::<Result<_>>()?,
        rooms: project
            .rooms
            .iter()
            .map(|room| flatten_room(room, project))
            .collect(),
    })
}

fn flatten_sprite(sprite: &Sprite) -> native::Sprite {
    native::Sprite {
        name: sprite.name.clone(),
        id: sprite.id,
        transparent: sprite.transparent,
        shape: sprite.shape,
        alpha_tolerance: sprite.alpha_tolerance,
        separate_mask: sprite.separate_mask,
        smooth_edges: sprite.smooth_edges,
        preload: sprite.preload,
        origin_x: sprite.origin_x,
        origin_y: sprite.origin_y,
        bb_mode: sprite.bbox_mode,
        bb_left: sprite.bbox_left,
        bb_right: sprite.bbox_right,
        bb_top: sprite.bbox_top,
        bb_bottom: sprite.bbox_bottom,
        subimages: sprite
            .subimages
            .iter()
            .map(|path| native::SubImage {
                image: media::load_image(path),
            })
            .collect(),
    }
}

fn flatten_sound(sound: &Sound) -> native::Sound {
    native::Sound {
        name: sound.name.clone(),
        id: sound.id,
        kind: sound.kind,
        file_type: sound.file_extension.clone(),
        file_name: sound.file_name.clone(),
        volume: sound.volume,
        pan: sound.pan,
        preload: sound.preload,
        data: media::read_sound_data(&sound.data),
    }
}

fn flatten_background(background: &Background) -> native::Background {
    native::Background {
        name: background.name.clone(),
        id: background.id,
        transparent: background.transparent,
        smooth_edges: background.smooth_edges,
        preload: background.preload,
        use_as_tileset: background.use_as_tileset,
        tile_width: background.tile_width,
        tile_height: background.tile_height,
        h_offset: background.horizontal_offset,
        v_offset: background.vertical_offset,
        h_sep: background.horizontal_spacing,
        v_sep: background.vertical_spacing,
        background_image: media::load_image(&background.image),
    }
}

fn flatten_path(path: &PathResource) -> native::Path {
    native::Path {
        name: path.name.clone(),
        id: path.id,
        smooth: path.smooth,
        closed: path.closed,
        precision: path.precision,
        snap_x: path.snap_x,
        snap_y: path.snap_y,
        points: path.points.iter().map(flatten_path_point).collect(),
    }
}

fn flatten_path_point(point: &PathPoint) -> native::PathPoint {
    native::PathPoint {
        x: point.x,
        y: point.y,
        speed: point.speed,
    }
}

fn flatten_script(script: &Script) -> native::Script {
    native::Script {
        name: script.name.clone(),
        id: script.id,
        code: script.code.clone(),
    }
}

fn flatten_shader(shader: &Shader) -> native::Shader {
    native::Shader {
        name: shader.name.clone(),
        id: shader.id,
        vertex: shader.vertex_code.clone(),
        fragment: shader.fragment_code.clone(),
        shader_type: shader.shader_type.clone(),
        precompile: shader.precompile,
    }
}

fn flatten_font(font: &Font) -> native::Font {
    native::Font {
        name: font.name.clone(),
        id: font.id,
        font_name: font.font_name.clone(),
        size: font.size,
        bold: font.bold,
        italic: font.italic,
    }
}

fn flatten_timeline(timeline: &Timeline) -> Result<native::Timeline> {
    let moments = timeline
        .moments
        .iter()
        .map(|moment| flatten_moment(moment, &timeline.name))
        .collect::<Result<_>>()?;
    Ok(native::Timeline {
        name: timeline.name.clone(),
        id: timeline.id,
        moments,
    })
}

fn flatten_moment(moment: &Moment, timeline_name: &str) -> Result<native::Moment> {
    let code = if moment.actions.is_empty() {
        moment.code.clone()
    } else {
        compile_event(&moment.actions).with_context(|| {
            format!(
                "Failed to compile moment {} of timeline '{timeline_name}'",
                moment.number
            )
        })?
    };
    Ok(native::Moment {
        number: moment.number,
        code,
    })
}

fn flatten_object(object: &GmObject, project: &Project) -> Result<native::GmObject> {
    // Group sub-events into one bucket per main event type, first-seen
    // order, original relative order within a bucket.
    let mut main_events: Vec<native::MainEvent> = Vec::new();
    for event in &object.events {
        let code = if event.actions.is_empty() {
            event.code.clone()
        } else {
            compile_event(&event.actions).with_context(|| {
                format!(
                    "Failed to compile event ({}, {}) of object '{}'",
                    event.event_type, event.number, object.name
                )
            })?
        };
        let sub_event = native::Event {
            id: event.number,
            code,
        };
        match main_events
            .iter_mut()
            .find(|bucket| bucket.id == event.event_type)
        {
            Some(bucket) => bucket.events.push(sub_event),
            None => main_events.push(native::MainEvent {
                id: event.event_type,
                events: vec![sub_event],
            }),
        }
    }

    Ok(native::GmObject {
        name: object.name.clone(),
        id: object.id,
        sprite_id: resolve_id(&project.sprites, &object.sprite_name),
        solid: object.solid,
        visible: object.visible,
        depth: object.depth,
        persistent: object.persistent,
        parent_id: resolve_id(&project.objects, &object.parent_name),
        mask_id: resolve_id(&project.sprites, &object.mask_name),
        main_events,
    })
}

fn flatten_room(room: &Room, project: &Project) -> native::Room {
    native::Room {
        name: room.name.clone(),
        id: room.id,
        caption: room.caption.clone(),
        width: room.width,
        height: room.height,
        speed: room.speed,
        persistent: room.persistent,
        background_color: ROOM_BACKGROUND_COLOR,
        draw_background_color: room.show_color,
        creation_code: room.code.clone(),
        enable_views: room.enable_views,
        background_defs: room
            .backgrounds
            .iter()
            .map(|layer| flatten_room_background(layer, project))
            .collect(),
        views: room
            .views
            .iter()
            .map(|view| flatten_view(view, project))
            .collect(),
        instances: room
            .instances
            .iter()
            .map(|instance| flatten_instance(instance, project))
            .collect(),
        tiles: room
            .tiles
            .iter()
            .map(|tile| flatten_tile(tile, project))
            .collect(),
    }
}

fn flatten_instance(instance: &Instance, project: &Project) -> native::Instance {
    native::Instance {
        id: instance.id,
        object_id: resolve_id(&project.objects, &instance.object_type),
        x: instance.x,
        y: instance.y,
        locked: instance.locked,
        creation_code: instance.code.clone(),
        pre_creation_code: String::new(),
    }
}

fn flatten_tile(tile: &Tile, project: &Project) -> native::Tile {
    native::Tile {
        id: tile.id,
        background_id: resolve_id(&project.backgrounds, &tile.background_name),
        room_x: tile.x,
        room_y: tile.y,
        locked: tile.locked,
        bg_x: tile.xoffset,
        bg_y: tile.yoffset,
        width: tile.width,
        height: tile.height,
        depth: tile.depth,
    }
}

fn flatten_view(view: &View, project: &Project) -> native::View {
    native::View {
        visible: view.visible,
        view_x: view.xview,
        view_y: view.yview,
        view_w: view.wview,
        view_h: view.hview,
        port_x: view.xport,
        port_y: view.yport,
        port_w: view.wport,
        port_h: view.hport,
        border_h: view.hborder,
        border_v: view.vborder,
        speed_h: view.hspeed,
        speed_v: view.vspeed,
        object_id: resolve_id(&project.objects, &view.object_following),
    }
}

fn flatten_room_background(layer: &RoomBackground, project: &Project) -> native::BackgroundDef {
    native::BackgroundDef {
        visible: layer.visible,
        foreground: layer.foreground,
        x: layer.x,
        y: layer.y,
        tile_horiz: layer.htiled,
        tile_vert: layer.vtiled,
        h_speed: layer.hspeed,
        v_speed: layer.vspeed,
        stretch: layer.stretch,
        background_id: resolve_id(&project.backgrounds, &layer.name),
    }
}
