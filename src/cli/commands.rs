use crate::cli::args::{Cli, Commands};
use crate::compiler::linker::{NO_RESOURCE, resolve_id};
use crate::compiler::{compile_event, flatten};
use crate::plugin::{BuildBackend, BuildMode, select_backend};
use crate::project::load_project;
use anyhow::{Result, anyhow};
use clap::Parser;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("gmx-compiler v{}", env!("CARGO_PKG_VERSION"));
    }

    match cli.command {
        Commands::Parse { input } => parse_command(&input, cli.verbose),
        Commands::Check { input } => check_command(&input, cli.verbose),
        Commands::Codegen { input, output_dir } => {
            codegen_command(&input, output_dir.as_deref(), cli.verbose)
        }
        Commands::Build {
            input,
            output,
            mode,
            backend,
        } => build_command(&input, &output, &mode, &backend, cli.verbose),
    }
}

fn parse_command(input: &Path, verbose: bool) -> Result<()> {
    if verbose {
        println!("🔍 Parsing project file: {}", input.display());
    }

    let project = load_project(input)?;

    println!("✅ Successfully parsed project '{}'", project.name);
    println!("🖼  Sprites: {}", project.sprites.len());
    println!("🔊 Sounds: {}", project.sounds.len());
    println!("🏞  Backgrounds: {}", project.backgrounds.len());
    println!("🧭 Paths: {}", project.paths.len());
    println!("📜 Scripts: {}", project.scripts.len());
    println!("🎨 Shaders: {}", project.shaders.len());
    println!("🔤 Fonts: {}", project.fonts.len());
    println!("⏱  Timelines: {}", project.timelines.len());
    println!("🎮 Objects: {}", project.objects.len());
    println!("🚪 Rooms: {}", project.rooms.len());

    Ok(())
}

fn check_command(input: &Path, verbose: bool) -> Result<()> {
    if verbose {
        println!("🔍 Checking symbolic references in {}", input.display());
    }

    let project = load_project(input)?;
    let mut dangling = 0usize;

    let mut report = |location: String, collection: &str, name: &str| {
        println!("⚠️  {location} references unknown {collection} '{name}'");
        dangling += 1;
    };

    for object in &project.objects {
        let location = format!("object '{}'", object.name);
        if !object.sprite_name.is_empty()
            && resolve_id(&project.sprites, &object.sprite_name) == NO_RESOURCE
        {
            report(location.clone(), "sprite", &object.sprite_name);
        }
        if !object.mask_name.is_empty()
            && resolve_id(&project.sprites, &object.mask_name) == NO_RESOURCE
        {
            report(location.clone(), "sprite", &object.mask_name);
        }
        if !object.parent_name.is_empty()
            && resolve_id(&project.objects, &object.parent_name) == NO_RESOURCE
        {
            report(location, "object", &object.parent_name);
        }
    }

    for room in &project.rooms {
        for instance in &room.instances {
            if !instance.object_type.is_empty()
                && resolve_id(&project.objects, &instance.object_type) == NO_RESOURCE
            {
                report(
                    format!("instance {} in room '{}'", instance.id, room.name),
                    "object",
                    &instance.object_type,
                );
            }
        }
        for tile in &room.tiles {
            if !tile.background_name.is_empty()
                && resolve_id(&project.backgrounds, &tile.background_name) == NO_RESOURCE
            {
                report(
                    format!("tile {} in room '{}'", tile.id, room.name),
                    "background",
                    &tile.background_name,
                );
            }
        }
        for (index, view) in room.views.iter().enumerate() {
            if !view.object_following.is_empty()
                && resolve_id(&project.objects, &view.object_following) == NO_RESOURCE
            {
                report(
                    format!("view {index} in room '{}'", room.name),
                    "object",
                    &view.object_following,
                );
            }
        }
        for (index, layer) in room.backgrounds.iter().enumerate() {
            if !layer.name.is_empty()
                && resolve_id(&project.backgrounds, &layer.name) == NO_RESOURCE
            {
                report(
                    format!("background layer {index} in room '{}'", room.name),
                    "background",
                    &layer.name,
                );
            }
        }
    }

    if dangling == 0 {
        println!("✅ No dangling references");
    } else {
        // Dangling references flatten to -1; the build still goes through.
        println!("⚠️  {dangling} dangling reference(s) will resolve to -1");
    }

    Ok(())
}

fn codegen_command(input: &Path, output_dir: Option<&Path>, verbose: bool) -> Result<()> {
    if verbose {
        println!("🔧 Generating event scripts from {}", input.display());
    }

    let project = load_project(input)?;
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut generated = 0usize;
    for object in &project.objects {
        for event in &object.events {
            let code = if event.actions.is_empty() {
                event.code.clone()
            } else {
                compile_event(&event.actions)?
            };
            emit_script(
                output_dir,
                &format!("object_{}_ev{}_{}", object.name, event.event_type, event.number),
                &code,
            )?;
            generated += 1;
        }
    }
    for timeline in &project.timelines {
        for moment in &timeline.moments {
            let code = if moment.actions.is_empty() {
                moment.code.clone()
            } else {
                compile_event(&moment.actions)?
            };
            emit_script(
                output_dir,
                &format!("timeline_{}_moment{}", timeline.name, moment.number),
                &code,
            )?;
            generated += 1;
        }
    }

    println!("✅ Generated {generated} script(s)");
    Ok(())
}

fn emit_script(output_dir: Option<&Path>, name: &str, code: &str) -> Result<()> {
    match output_dir {
        Some(dir) => {
            fs::write(dir.join(format!("{name}.gml")), code)?;
        }
        None => {
            println!("--- {name} ---");
            println!("{code}");
        }
    }
    Ok(())
}

fn build_command(
    input: &Path,
    output: &Path,
    mode: &str,
    backend_name: &str,
    verbose: bool,
) -> Result<()> {
    let mode = BuildMode::from_name(mode)
        .ok_or_else(|| anyhow!("Unknown build mode: {mode}"))?;
    let backend = select_backend(backend_name)
        .ok_or_else(|| anyhow!("Unknown backend: {backend_name}"))?;

    if verbose {
        println!(
            "🔧 Building {} -> {} ({:?} via {})",
            input.display(),
            output.display(),
            mode,
            backend.name()
        );
    }

    let project = load_project(input)?;
    let mut graph = flatten(&project)?;
    graph.filename = output.display().to_string();

    let status = backend.build(&graph, output, mode);
    if status != 0 {
        return Err(anyhow!(
            "Backend '{}' failed with status {status}",
            backend.name()
        ));
    }

    println!("✅ Build complete: {}", output.display());
    Ok(())
}
