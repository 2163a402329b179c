use std::fs;
use std::path::PathBuf;

use rfpaint::rendering::raster::rasterize;
use rfpaint::{ClickableArea, DisplayList, LayoutTree, RenderConfig, Renderer};

const PAGE: &str = "tests/goldens/layouts/page1.json";

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn updating() -> bool {
    std::env::var("UPDATE_GOLDENS").is_ok()
}

fn read_golden<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = golden_path(name);
    let json = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing golden {:?} ({}); run with UPDATE_GOLDENS=1", path, e));
    serde_json::from_str(&json).unwrap_or_else(|e| panic!("bad golden {:?}: {}", path, e))
}

fn write_golden(name: &str, contents: &str) {
    fs::create_dir_all("tests/goldens/expected").expect("create goldens dir");
    fs::write(golden_path(name), contents).expect("write golden");
    println!("Updated golden {:?}", golden_path(name));
}

#[test]
fn golden_display_list_matches_fixture() {
    let tree = LayoutTree::from_path(PAGE).expect("read fixture");
    let renderer = Renderer::new(RenderConfig::default()).expect("renderer");
    let out = renderer.render_display_list(&tree).expect("render");

    if updating() {
        write_golden("page1.display.json", &serde_json::to_string_pretty(&out.canvas).unwrap());
        write_golden("page1.areas.json", &serde_json::to_string_pretty(&out.areas).unwrap());
        return;
    }

    let expected: DisplayList = read_golden("page1.display.json");
    assert_eq!(out.canvas, expected);
    let expected: Vec<ClickableArea> = read_golden("page1.areas.json");
    assert_eq!(out.areas, expected);
}

#[test]
fn golden_raster_matches_display_list_replay() {
    let tree = LayoutTree::from_path(PAGE).expect("read fixture");
    let renderer = Renderer::new(RenderConfig::default()).expect("renderer");
    let direct = renderer.render(&tree).expect("render").canvas;

    let list: DisplayList = read_golden("page1.display.json");
    let replayed = rasterize(&list, renderer.fonts().clone()).expect("rasterize");
    assert_eq!(direct.pixmap().data(), replayed.pixmap().data());

    // The PNG digest is only checked once recorded with UPDATE_GOLDENS=1.
    let shot = direct.into_screenshot().expect("encode");
    let digest_path = golden_path("page1.sha256");
    if updating() {
        write_golden("page1.sha256", &shot.digest());
    } else if let Ok(exp) = fs::read_to_string(&digest_path) {
        assert_eq!(shot.digest(), exp.trim());
    }
}
