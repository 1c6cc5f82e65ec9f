use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use store_assets::{AssetConfig, BatchRunner};
use tempfile::tempdir;

fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255])))
        .save(path)
        .unwrap();
}

#[test]
fn test_config_file_drives_batch() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("project");
    let config_path = dir.path().join("config.json");

    fs::write(
        &config_path,
        format!(
            r#"{{
                "base_dir": {},
                "input_dir": "shots",
                "output_dir": "out",
                "screenshot_size": {{ "width": 640, "height": 400 }},
                "locales": [{{ "name": "ja", "promo_source": "hero.png" }}]
            }}"#,
            serde_json::to_string(&base).unwrap()
        ),
    )
    .unwrap();

    write_png(&base.join("shots/ja/hero.png"), 1000, 1000);
    write_png(&base.join("shots/ja/list.PNG"), 300, 900);
    fs::write(base.join("shots/ja/README.md"), "ignored").unwrap();

    let config = AssetConfig::resolve(Some(&config_path)).unwrap();
    let report = BatchRunner::new(config).run().unwrap();

    let stats = report.get_stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.processed, 3);

    // Output keeps the source name; content is JPEG regardless of extension
    let shot = fs::read(base.join("out/screenshots/ja/list.PNG")).unwrap();
    assert_eq!(&shot[..2], &[0xFF, 0xD8]);
    let shot = image::load_from_memory(&shot).unwrap();
    assert_eq!((shot.width(), shot.height()), (640, 400));

    let promo = image::open(base.join("out/promo/promo_ja.jpg")).unwrap();
    assert_eq!((promo.width(), promo.height()), (440, 280));
    assert!(!base.join("out/screenshots/ja/README.md").exists());
}

#[test]
fn test_report_round_trips_to_disk() {
    let dir = tempdir().unwrap();
    let mut config = AssetConfig::default();
    config.base_dir = dir.path().to_path_buf();
    let source = dir.path().join("screenshots/en/en_pop1.jpg");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([9, 9, 9])))
        .save(&source)
        .unwrap();

    let report = BatchRunner::new(config).run().unwrap();
    assert!(report.has_failures());

    let path = dir.path().join("report.json");
    report.write_json(&path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(value["locale_failures"][0]["locale"], "zh_CN");
    assert_eq!(value["jobs"].as_array().unwrap().len(), 3);
}
