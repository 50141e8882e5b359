use flate2::read::ZlibDecoder;
use gmx_compiler::compiler::flatten;
use gmx_compiler::project::Project;
use std::io::Read;

/// Write a small PNG with a single red top-left pixel, in the given source
/// layout.
fn write_test_png(
    path: &std::path::Path,
    width: u32,
    height: u32,
    color: png::ColorType,
) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();

    let channels = color.samples();
    let mut pixels = vec![0u8; (width * height) as usize * channels];
    pixels[0] = 255; // R (or gray)
    if color == png::ColorType::Rgba {
        pixels[3] = 255; // A
    }
    writer.write_image_data(&pixels).unwrap();
}

fn sprite_project(image_path: &std::path::Path) -> Project {
    serde_json::from_str(&format!(
        r#"{{
            "sprites": [
                {{"name": "spr_dot", "id": 0, "subimages": ["{}"]}}
            ]
        }}"#,
        image_path.display()
    ))
    .unwrap()
}

#[test]
fn test_sprite_image_is_padded_reordered_and_compressed() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("dot.png");
    write_test_png(&png_path, 3, 2, png::ColorType::Rgba);

    let graph = flatten(&sprite_project(&png_path)).unwrap();
    let image = &graph.sprites[0].subimages[0].image;

    // 3 pads to 4, 2 stays 2.
    assert_eq!(image.width, 4);
    assert_eq!(image.height, 2);
    assert_eq!(image.full_size, 4 * 2 * 4);
    assert!(!image.data.is_empty());

    let mut bitmap = Vec::new();
    ZlibDecoder::new(image.data.as_slice())
        .read_to_end(&mut bitmap)
        .unwrap();
    assert_eq!(bitmap.len(), image.full_size);

    // Red RGBA pixel lands as BGRA.
    assert_eq!(&bitmap[0..4], &[0, 0, 255, 255]);
    // Padding column stays zeroed.
    assert_eq!(&bitmap[12..16], &[0, 0, 0, 0]);
}

#[test]
fn test_rgb_source_is_normalized_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("dot_rgb.png");
    write_test_png(&png_path, 2, 2, png::ColorType::Rgb);

    let graph = flatten(&sprite_project(&png_path)).unwrap();
    let image = &graph.sprites[0].subimages[0].image;

    assert_eq!(image.width, 2);
    assert_eq!(image.height, 2);
    assert_eq!(image.full_size, 2 * 2 * 4);
    assert!(!image.data.is_empty());

    let mut bitmap = Vec::new();
    ZlibDecoder::new(image.data.as_slice())
        .read_to_end(&mut bitmap)
        .unwrap();
    // Red pixel gains an opaque alpha and lands as BGRA.
    assert_eq!(&bitmap[0..4], &[0, 0, 255, 255]);
}

#[test]
fn test_grayscale_source_is_normalized_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("dot_gray.png");
    write_test_png(&png_path, 2, 2, png::ColorType::Grayscale);

    let graph = flatten(&sprite_project(&png_path)).unwrap();
    let image = &graph.sprites[0].subimages[0].image;

    assert_eq!(image.full_size, 2 * 2 * 4);
    let mut bitmap = Vec::new();
    ZlibDecoder::new(image.data.as_slice())
        .read_to_end(&mut bitmap)
        .unwrap();
    // White gray value replicated across B, G, R with opaque alpha.
    assert_eq!(&bitmap[0..4], &[255, 255, 255, 255]);
}

#[test]
fn test_power_of_two_source_keeps_its_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("square.png");
    write_test_png(&png_path, 4, 4, png::ColorType::Rgba);

    let graph = flatten(&sprite_project(&png_path)).unwrap();
    let image = &graph.sprites[0].subimages[0].image;
    assert_eq!(image.width, 4);
    assert_eq!(image.height, 4);
}

#[test]
fn test_missing_image_leaves_empty_record_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.png");

    let project: Project = serde_json::from_str(&format!(
        r#"{{
            "sprites": [
                {{"name": "spr_gone", "id": 0, "subimages": ["{}"]}},
                {{"name": "spr_after", "id": 1}}
            ],
            "backgrounds": [
                {{"name": "bkg_gone", "id": 0, "image": "{}"}}
            ]
        }}"#,
        missing.display(),
        missing.display()
    ))
    .unwrap();

    let graph = flatten(&project).unwrap();
    assert_eq!(graph.sprites.len(), 2);
    assert!(graph.sprites[0].subimages[0].image.data.is_empty());
    assert_eq!(graph.sprites[0].subimages[0].image.width, 0);
    assert!(graph.backgrounds[0].background_image.data.is_empty());
}
