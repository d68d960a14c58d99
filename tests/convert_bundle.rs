//! End-to-end conversion tests: real files in, real bundle out.

use emote_forge::catalog::Catalog;
use emote_forge::config::FormatsConfig;
use emote_forge::convert::{ConversionRequest, ConvertError, Converter};
use image::{DynamicImage, Rgba, RgbaImage};
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;

/// The filenames a builtin-catalog run over `cat.<ext>` must produce.
const EXPECTED_FILES: &[&str] = &[
    "cat-Discord-Small-28x28.png",
    "cat-Discord-Medium-32x32.png",
    "cat-Discord-Large-48x48.png",
    "cat-Discord-Animated-128x128.png",
    "cat-Twitch-1.0-28x28.png",
    "cat-Twitch-2.0-56x56.png",
    "cat-Twitch-3.0-112x112.png",
    "cat-7TV-1x-32x32.png",
    "cat-7TV-2x-64x64.png",
    "cat-7TV-3x-96x96.png",
    "cat-7TV-4x-128x128.png",
];

fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

fn request(path: &Path, formats: &FormatsConfig) -> ConversionRequest {
    ConversionRequest::new(path, formats).unwrap()
}

fn bundle_filenames(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn png_input_produces_the_full_deterministic_bundle() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cat.png");
    DynamicImage::ImageRgba8(gradient_image(300, 200))
        .save(&input)
        .unwrap();

    let converter = Converter::new(Catalog::builtin());
    let outcome = converter
        .convert(&request(&input, &FormatsConfig::default()))
        .unwrap();

    assert_eq!(outcome.bundle_dir, tmp.path().join("cat_emote_bundle"));
    assert_eq!(outcome.written.len(), 11);

    let expected: BTreeSet<String> = EXPECTED_FILES.iter().map(|s| s.to_string()).collect();
    assert_eq!(bundle_filenames(&outcome.bundle_dir), expected);

    // Every output decodes as a PNG with exactly the advertised dimensions.
    for name in EXPECTED_FILES {
        let path = outcome.bundle_dir.join(name);
        let tail = name.rsplit('-').next().unwrap().trim_end_matches(".png");
        let (w, h) = tail.split_once('x').unwrap();
        let expected_dims = (w.parse::<u32>().unwrap(), h.parse::<u32>().unwrap());
        assert_eq!(image::image_dimensions(&path).unwrap(), expected_dims, "{name}");
    }
}

#[test]
fn jpeg_input_still_yields_png_outputs() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cat.jpg");
    DynamicImage::ImageRgba8(gradient_image(240, 180))
        .to_rgb8()
        .save(&input)
        .unwrap();

    let converter = Converter::new(Catalog::builtin());
    let outcome = converter
        .convert(&request(&input, &FormatsConfig::default()))
        .unwrap();

    for path in &outcome.written {
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        // Output must decode as PNG (not just be named .png).
        let reader = image::ImageReader::open(path)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(image::ImageFormat::Png));
    }
}

#[test]
fn second_run_overwrites_the_same_files() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cat.png");
    DynamicImage::ImageRgba8(gradient_image(120, 90))
        .save(&input)
        .unwrap();

    let converter = Converter::new(Catalog::builtin());
    let formats = FormatsConfig::default();
    let first = converter.convert(&request(&input, &formats)).unwrap();
    let before = bundle_filenames(&first.bundle_dir);

    let second = converter.convert(&request(&input, &formats)).unwrap();
    let after = bundle_filenames(&second.bundle_dir);

    assert_eq!(before, after);
    assert_eq!(first.written, second.written);
    assert_eq!(after.len(), 11);
}

#[test]
fn garbage_bytes_behind_png_extension_leave_nothing_behind() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cat.png");
    std::fs::write(&input, b"\x00\x01\x02 definitely not a png").unwrap();

    let converter = Converter::new(Catalog::builtin());
    let err = converter
        .convert(&request(&input, &FormatsConfig::default()))
        .unwrap_err();

    assert!(matches!(err, ConvertError::Decode(_)));
    assert!(!tmp.path().join("cat_emote_bundle").exists());
    // The input directory contains only the input itself.
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn transparency_survives_end_to_end() {
    // Opaque core, fully transparent 8px border, square source: after the
    // fill into any square target the border lands on the output edge.
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("ghost.png");
    let source = RgbaImage::from_fn(96, 96, |x, y| {
        let inside = (8..88).contains(&x) && (8..88).contains(&y);
        if inside {
            Rgba([200, 40, 40, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    DynamicImage::ImageRgba8(source).save(&input).unwrap();

    let converter = Converter::new(Catalog::builtin());
    let outcome = converter
        .convert(&request(&input, &FormatsConfig::default()))
        .unwrap();

    for path in &outcome.written {
        let decoded = image::open(path).unwrap().into_rgba8();
        let (w, h) = decoded.dimensions();
        assert!(
            decoded.get_pixel(0, 0).0[3] < 16,
            "corner of {} should stay transparent",
            path.display()
        );
        assert_eq!(decoded.get_pixel(w / 2, h / 2).0[3], 255);
    }
}

#[test]
fn webp_input_works_under_the_extended_policy() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cat.webp");
    DynamicImage::ImageRgba8(gradient_image(100, 100))
        .save(&input)
        .unwrap();

    let formats = FormatsConfig { extended: true };
    assert!(ConversionRequest::new(&input, &FormatsConfig::default()).is_err());

    let converter = Converter::new(Catalog::builtin());
    let outcome = converter.convert(&request(&input, &formats)).unwrap();
    assert_eq!(outcome.written.len(), 11);
    assert_eq!(outcome.bundle_dir, tmp.path().join("cat_emote_bundle"));
}

#[test]
fn minimal_injected_catalog_limits_the_bundle() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cat.png");
    DynamicImage::ImageRgba8(gradient_image(64, 64))
        .save(&input)
        .unwrap();

    let catalog = Catalog::new(vec![emote_forge::catalog::SizeSpec {
        platform: "Slack".to_string(),
        variant: "Standard".to_string(),
        width: 128,
        height: 128,
    }])
    .unwrap();

    let converter = Converter::new(catalog);
    let outcome = converter
        .convert(&request(&input, &FormatsConfig::default()))
        .unwrap();

    assert_eq!(outcome.written.len(), 1);
    assert_eq!(
        outcome.written[0].file_name().unwrap().to_string_lossy(),
        "cat-Slack-Standard-128x128.png"
    );
}
