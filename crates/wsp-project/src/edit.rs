//! Editing operations on the flat record list.
//!
//! Each operation takes the project explicitly; there is no selection or
//! counter state outside the records themselves.

use std::collections::HashMap;
use wsp_catalog::{FixtureCatalog, FixtureKey, Preset};
use wsp_network::NodeKind;

use crate::migrate::LATEST_VERSION;
use crate::schema::{PipeRecord, Project};
use crate::{ProjectError, ProjectResult};

pub const ROOT_ID: &str = "root";
const ROOT_NAME: &str = "ポンプ(始点)";

/// A project holding only the pump (root) record.
pub fn new_project(name: impl Into<String>) -> Project {
    let mut root = PipeRecord::new(ROOT_ID, ROOT_NAME, NodeKind::Branch, None);
    root.length = 0.0;
    root.dwelling_count = 0;
    Project {
        version: LATEST_VERSION,
        name: name.into(),
        pipes: vec![root],
        fixture_specs: FixtureCatalog::builtin(),
        settings: Default::default(),
    }
}

fn root_id(project: &Project) -> ProjectResult<String> {
    project
        .root()
        .map(|r| r.id.clone())
        .ok_or_else(|| edit_error("project has no single root"))
}

fn edit_error(what: impl Into<String>) -> ProjectError {
    ProjectError::Edit { what: what.into() }
}

fn ensure_exists(project: &Project, id: &str) -> ProjectResult<()> {
    match project.record(id) {
        Some(_) => Ok(()),
        None => Err(edit_error(format!("no record '{id}'"))),
    }
}

/// Branch and fixture nodes share one numbering sequence; systems have their
/// own.
fn counter_family(kind: NodeKind) -> &'static [NodeKind] {
    match kind {
        NodeKind::System => &[NodeKind::System],
        NodeKind::Branch | NodeKind::Fixture => &[NodeKind::Branch, NodeKind::Fixture],
    }
}

fn next_number(project: &Project, kind: NodeKind) -> u32 {
    project
        .pipes
        .iter()
        .filter_map(|p| {
            counter_family(kind).iter().find_map(|k| {
                p.id.strip_prefix(&format!("node_{}_", k.label()))
                    .and_then(|n| n.parse::<u32>().ok())
            })
        })
        .max()
        .unwrap_or(0)
        + 1
}

fn name_prefix(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Branch => "分岐",
        NodeKind::System => "系統",
        NodeKind::Fixture => "器具",
    }
}

/// Append a node under `parent` and return its generated id.
///
/// A preset only applies to system nodes: it seeds fixtures, dwellings and
/// persons, and is named in the node's display name.
pub fn add_node(
    project: &mut Project,
    kind: NodeKind,
    parent: &str,
    preset: Option<&Preset>,
) -> ProjectResult<String> {
    ensure_exists(project, parent)?;
    let n = next_number(project, kind);
    let id = format!("node_{}_{}", kind.label(), n);

    let mut record = PipeRecord::new(id.clone(), "", kind, Some(parent.to_string()));
    record.person_count = 1;
    let prefix = match (kind, preset) {
        (NodeKind::System, Some(preset)) => {
            record.fixtures = preset.fixture_map();
            record.dwelling_count = preset.dwellings;
            record.person_count = preset.persons;
            format!("{} ({})", name_prefix(kind), preset.name)
        }
        (NodeKind::Fixture, _) => {
            record.dwelling_count = 0;
            record.person_count = 0;
            record.fixture_type = Some(FixtureKey::private("洗面器"));
            name_prefix(kind).to_string()
        }
        _ => name_prefix(kind).to_string(),
    };
    record.name = format!("{prefix}-{n}");

    tracing::debug!(id = %id, parent, "add node");
    project.pipes.push(record);
    Ok(id)
}

/// Insert a new branch between `target` and its parent.
pub fn insert_node_before(project: &mut Project, target: &str) -> ProjectResult<String> {
    let parent = project
        .record(target)
        .ok_or_else(|| edit_error(format!("no record '{target}'")))?
        .parent
        .clone()
        .ok_or_else(|| edit_error("cannot insert above the root"))?;

    let n = next_number(project, NodeKind::Branch);
    let id = format!("node_branch_{n}");
    let mut record = PipeRecord::new(id.clone(), format!("分岐-{n}"), NodeKind::Branch, Some(parent));
    record.person_count = 1;
    project.pipes.push(record);

    if let Some(t) = project.record_mut(target) {
        t.parent = Some(id.clone());
    }
    Ok(id)
}

/// Remove a record; its children move under the root.
pub fn delete_node(project: &mut Project, id: &str) -> ProjectResult<()> {
    let root = root_id(project)?;
    if id == root {
        return Err(edit_error("the root cannot be deleted"));
    }
    ensure_exists(project, id)?;

    project.pipes.retain(|p| p.id != id);
    for p in &mut project.pipes {
        if p.parent.as_deref() == Some(id) {
            p.parent = Some(root.clone());
        }
    }
    Ok(())
}

/// Set or clear the manual-critical flag. Setting it clears every other
/// record's flag.
pub fn set_manual_critical(project: &mut Project, id: &str, flag: bool) -> ProjectResult<()> {
    ensure_exists(project, id)?;
    for p in &mut project.pipes {
        if p.id == id {
            p.is_manual_critical = flag;
        } else if flag {
            p.is_manual_critical = false;
        }
    }
    Ok(())
}

/// Rename branch nodes `分岐-1`, `分岐-2`, ... in depth-first order.
///
/// The root keeps its name. Returns the number of branches renamed.
pub fn renumber_branches(project: &mut Project) -> ProjectResult<u32> {
    let root = root_id(project)?;

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, p) in project.pipes.iter().enumerate() {
        if let Some(parent) = p.parent.as_deref() {
            children.entry(parent).or_default().push(idx);
        }
    }

    let mut order = Vec::with_capacity(project.pipes.len());
    let mut stack: Vec<usize> = children.get(root.as_str()).into_iter().flatten().rev().copied().collect();
    let mut seen = vec![false; project.pipes.len()];
    while let Some(idx) = stack.pop() {
        if std::mem::replace(&mut seen[idx], true) {
            continue;
        }
        order.push(idx);
        if let Some(kids) = children.get(project.pipes[idx].id.as_str()) {
            stack.extend(kids.iter().rev().copied());
        }
    }

    let mut count = 0;
    for idx in order {
        let record = &mut project.pipes[idx];
        if record.kind == NodeKind::Branch {
            count += 1;
            record.name = format!("分岐-{count}");
        }
    }
    Ok(count)
}
