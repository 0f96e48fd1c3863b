#![allow(dead_code)]

use std::path::{Path, PathBuf};

use cinerow_cli::{CatalogFile, Script};

/// One looping row of `n` movies with ids `1..=n`.
pub fn catalog_json(n: u64) -> String {
    let items: Vec<String> = (1..=n)
        .map(|id| {
            format!(r#"{{"id":{id},"media_type":"movie","title":"Movie {id}"}}"#)
        })
        .collect();
    format!(
        r#"{{"rows":[{{"id":0,"title":"Trending Now","items":[{}]}}]}}"#,
        items.join(",")
    )
}

pub fn catalog(n: u64) -> CatalogFile {
    CatalogFile::parse(&catalog_json(n)).expect("valid catalog")
}

pub const PAGE_FORWARD: &str = r#"{"steps":[
    {"message":{"type":"navigate","row":0,"direction":"next"}}
]}"#;

pub const HOVER_THEN_CLICK: &str = r#"{"settle_ms":100,"steps":[
    {"message":{"type":"pointer_enter","element":{"row":0,"key":"movie-2"}}},
    {"wait_ms":500,"message":{"type":"click","element":{"row":0,"key":"movie-4"}}}
]}"#;

pub fn script(raw: &str) -> Script {
    Script::parse(raw).expect("valid script")
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
