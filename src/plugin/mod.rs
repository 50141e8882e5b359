//! Build-backend capability boundary.
//!
//! The legacy toolchain bound a code-generation backend out of a dynamic
//! library by symbol name; here a backend is a trait object selected at
//! startup. A backend receives the flattened graph, a target path and a
//! build mode, and answers with an integer status. It must consume or copy
//! what it needs synchronously, the graph only lives for the one call.

use crate::compiler::native::NativeGraph;
use std::fs;
use std::path::Path;

/// What the backend should produce, mirroring the legacy mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Run,
    Debug,
    Design,
    Compile,
    Rebuild,
}

impl BuildMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "run" => Some(Self::Run),
            "debug" => Some(Self::Debug),
            "design" => Some(Self::Design),
            "compile" => Some(Self::Compile),
            "rebuild" => Some(Self::Rebuild),
            _ => None,
        }
    }
}

pub trait BuildBackend {
    fn name(&self) -> &str;

    /// Compile one flattened graph to `output`. Returns 0 on success, a
    /// backend-specific nonzero status otherwise.
    fn build(&self, graph: &NativeGraph, output: &Path, mode: BuildMode) -> i32;
}

/// Pick a backend implementation by name. `script-dump` is the only one
/// shipped with the compiler; engine backends register under their own
/// names.
pub fn select_backend(name: &str) -> Option<Box<dyn BuildBackend>> {
    match name {
        "script-dump" => Some(Box::new(ScriptDumpBackend)),
        _ => None,
    }
}

/// Reference backend: writes every compiled event body and a graph summary
/// into the output directory. Useful for inspecting what an engine backend
/// would receive.
pub struct ScriptDumpBackend;

impl BuildBackend for ScriptDumpBackend {
    fn name(&self) -> &str {
        "script-dump"
    }

    fn build(&self, graph: &NativeGraph, output: &Path, _mode: BuildMode) -> i32 {
        match dump_graph(graph, output) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("script-dump backend failed: {err}");
                1
            }
        }
    }
}

fn dump_graph(graph: &NativeGraph, output: &Path) -> std::io::Result<()> {
    fs::create_dir_all(output)?;

    let mut summary = String::new();
    summary.push_str(&format!("target: {}\n", graph.filename));
    summary.push_str(&format!("sprites: {}\n", graph.sprites.len()));
    summary.push_str(&format!("sounds: {}\n", graph.sounds.len()));
    summary.push_str(&format!("backgrounds: {}\n", graph.backgrounds.len()));
    summary.push_str(&format!("paths: {}\n", graph.paths.len()));
    summary.push_str(&format!("scripts: {}\n", graph.scripts.len()));
    summary.push_str(&format!("shaders: {}\n", graph.shaders.len()));
    summary.push_str(&format!("fonts: {}\n", graph.fonts.len()));
    summary.push_str(&format!("timelines: {}\n", graph.timelines.len()));
    summary.push_str(&format!("objects: {}\n", graph.objects.len()));
    summary.push_str(&format!("rooms: {}\n", graph.rooms.len()));
    fs::write(output.join("summary.txt"), summary)?;

    for script in &graph.scripts {
        fs::write(output.join(format!("script_{}.gml", script.name)), &script.code)?;
    }

    for object in &graph.objects {
        for main_event in &object.main_events {
            for event in &main_event.events {
                let file = format!(
                    "object_{}_ev{}_{}.gml",
                    object.name, main_event.id, event.id
                );
                fs::write(output.join(file), &event.code)?;
            }
        }
    }

    Ok(())
}
