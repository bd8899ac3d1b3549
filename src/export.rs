//! Mission report export
//!
//! Writes every captured slot as a PNG file plus a `report.json` manifest
//! describing the agent, layouts, and answers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::capture::Snapshot;
use crate::domain::{Answer, ContextKey, PageLayout, Slot, SlotId};
use crate::session::SessionState;

pub const MANIFEST_NAME: &str = "report.json";

/// Captures shown on the debrief page
pub const PREVIEW_COUNT: usize = 4;

#[derive(Serialize)]
struct CaptureEntry<'a> {
    context: &'a ContextKey,
    slot: &'a SlotId,
    label: &'a str,
    file: String,
}

#[derive(Serialize)]
struct Report<'a> {
    agent: &'a str,
    verified: bool,
    collected: usize,
    exported_at: String,
    layouts: &'a BTreeMap<ContextKey, PageLayout>,
    answers: &'a BTreeMap<String, Answer>,
    captures: Vec<CaptureEntry<'a>>,
}

/// Timestamped folder under the user's pictures directory
pub fn default_export_dir() -> Option<PathBuf> {
    let mut path =
        dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))?;
    let name = chrono::Local::now()
        .format("Inkslot_%Y-%m-%d_%H-%M-%S")
        .to_string();
    path.push(name);
    Some(path)
}

/// File name for a slot's capture
fn capture_file_name(id: &SlotId) -> String {
    let stem: String = id
        .as_str()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}.png", stem)
}

/// First `n` captured slots in layout order
pub fn preview_captures(state: &SessionState, n: usize) -> Vec<(&Slot, &Snapshot)> {
    state
        .captured_slots()
        .into_iter()
        .take(n)
        .map(|(_, slot, snapshot)| (slot, snapshot))
        .collect()
}

/// Write the report into `dir`, creating it if needed; returns the manifest path
pub fn export_report(state: &SessionState, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export dir {}", dir.display()))?;

    let mut captures = Vec::new();
    for (context, slot, snapshot) in state.captured_slots() {
        let file = capture_file_name(&slot.id);
        let path = dir.join(&file);
        std::fs::write(&path, snapshot.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        captures.push(CaptureEntry {
            context,
            slot: &slot.id,
            label: &slot.label,
            file,
        });
    }

    let report = Report {
        agent: &state.agent_name,
        verified: state.verified,
        collected: state.collected_count(),
        exported_at: chrono::Local::now().to_rfc3339(),
        layouts: &state.layouts,
        answers: &state.answers,
        captures,
    };
    let manifest = dir.join(MANIFEST_NAME);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    std::fs::write(&manifest, json)
        .with_context(|| format!("Failed to write {}", manifest.display()))?;

    log::info!(
        "Exported {} captures to {}",
        report.captures.len(),
        dir.display()
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::drawn_snapshot;

    fn state() -> SessionState {
        let mut state = SessionState {
            agent_name: "Nova".into(),
            verified: true,
            ..Default::default()
        };
        state.layouts.insert(
            "page6".into(),
            vec![
                Slot::default_slot("宀", "宀", "护盾/屋顶"),
                Slot::default_slot("安全门", "门", "闸门/安全"),
                Slot::custom("page6/free_1".into(), "", "自由搜集"),
            ],
        );
        state
            .captures
            .insert("安全门".into(), Some(drawn_snapshot(40, 20)));
        state
            .captures
            .insert("page6/free_1".into(), Some(drawn_snapshot(40, 20)));
        state.captures.insert("宀".into(), None);
        state.answers.insert("page6_stars".into(), Answer::Rating(4));
        state
    }

    #[test]
    fn test_file_names_are_sanitized() {
        assert_eq!(capture_file_name(&"口".into()), "口.png");
        assert_eq!(capture_file_name(&"a/b:c".into()), "a_b_c.png");
    }

    #[test]
    fn test_preview_follows_layout_order() {
        let state = state();
        let preview = preview_captures(&state, PREVIEW_COUNT);
        let ids: Vec<&str> = preview.iter().map(|(slot, _)| slot.id.as_str()).collect();
        assert_eq!(ids, vec!["安全门", "page6/free_1"]);
        assert_eq!(preview_captures(&state, 1).len(), 1);
    }

    #[test]
    fn test_export_writes_pngs_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report");
        let manifest = export_report(&state(), &out).unwrap();

        assert_eq!(manifest, out.join(MANIFEST_NAME));
        let png = std::fs::read(out.join("安全门.png")).unwrap();
        assert!(Snapshot::from_png_bytes(png).decode().is_ok());
        assert!(out.join("page6_free_1.png").exists());
        assert!(!out.join("宀.png").exists());

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&manifest).unwrap()).unwrap();
        assert_eq!(json["agent"], "Nova");
        assert_eq!(json["collected"], 2);
        assert_eq!(json["answers"]["page6_stars"], 4);
        assert_eq!(json["layouts"]["page6"][1]["label"], "门");
        assert_eq!(json["captures"][0]["file"], "安全门.png");
    }
}
