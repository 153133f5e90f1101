//! Interactive terminal editor
//!
//! A dialoguer-driven walk over the config tree honoring the per-node
//! widget contract: toggles for bools, validated numeric input, an
//! external editor for long strings, and collapsible navigation for
//! containers. Raw-text mode falls back to editing the whole file.

use std::path::Path;

use colored::Colorize;
use dialoguer::{Confirm, Editor, Input, Select};
use modcfg_content::path::{join_index, join_key};
use modcfg_content::ConfigValue;
use modcfg_core::{EditorSession, FsConfigStore};
use modcfg_edit::{widget_for, EditOp, NodeWidget};

use crate::commands::preview;
use crate::error::Result;

enum Action {
    Open(String),
    AddItem,
    Delete,
    Save,
    Reset,
    Back,
}

pub fn run_editor(file: &Path) -> Result<()> {
    let mut session = EditorSession::open(FsConfigStore::new(), file)?;
    if !session.is_structured() {
        println!(
            "{} no structural editor for this file; editing raw text",
            "note:".yellow().bold()
        );
        return edit_raw(&mut session);
    }

    // Stack of container paths; top is where we are now.
    let mut stack: Vec<String> = vec![String::new()];

    while let Some(current_path) = stack.last().cloned() {
        let Some(node) = session
            .document()
            .and_then(|doc| doc.get_path(&current_path))
            .cloned()
        else {
            // Node vanished (deleted from under us): pop back out.
            stack.pop();
            continue;
        };

        let (labels, actions) = build_menu(&session, &current_path, &node);
        let title = if current_path.is_empty() {
            file.display().to_string()
        } else {
            current_path.clone()
        };
        let choice = Select::new()
            .with_prompt(format!(
                "{}{}",
                title,
                if session.is_dirty() { " (unsaved)" } else { "" }
            ))
            .items(&labels)
            .default(0)
            .interact()?;

        match &actions[choice] {
            Action::Open(child_path) => {
                let is_container = session
                    .document()
                    .and_then(|doc| doc.get_path(child_path))
                    .is_some_and(ConfigValue::is_container);
                if is_container {
                    stack.push(child_path.clone());
                } else {
                    edit_scalar(&mut session, child_path)?;
                }
            }
            Action::AddItem => {
                session.apply_edit(&current_path, EditOp::ArrayPush)?;
            }
            Action::Delete => delete_entry(&mut session, &current_path, &node)?,
            Action::Save => {
                session.save()?;
                println!("{} {}", "saved".green().bold(), file.display());
            }
            Action::Reset => {
                session.reset();
            }
            Action::Back => {
                stack.pop();
            }
        }
    }

    if session.is_dirty()
        && Confirm::new()
            .with_prompt("Save changes before leaving?")
            .default(true)
            .interact()?
    {
        session.save()?;
        println!("{} {}", "saved".green().bold(), file.display());
    }
    Ok(())
}

fn build_menu(
    session: &EditorSession<FsConfigStore>,
    current_path: &str,
    node: &ConfigValue,
) -> (Vec<String>, Vec<Action>) {
    let mut labels = Vec::new();
    let mut actions = Vec::new();
    let comments = session.comments();

    match node {
        ConfigValue::Map(map) => {
            for (key, child) in map {
                let child_path = join_key(current_path, key);
                let mut label = format!("{key} = {}", preview(child));
                if let Some(comment) = comments.and_then(|c| c.get(&child_path)) {
                    label.push_str(&format!("  {}", format!("# {comment}").dimmed()));
                }
                labels.push(label);
                actions.push(Action::Open(child_path));
            }
        }
        ConfigValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                labels.push(format!("[{i}] = {}", preview(item)));
                actions.push(Action::Open(join_index(current_path, i)));
            }
            labels.push("+ add item".to_string());
            actions.push(Action::AddItem);
        }
        _ => {}
    }

    if !node.is_empty() {
        labels.push("- delete an entry".to_string());
        actions.push(Action::Delete);
    }
    if session.is_dirty() {
        labels.push("save".to_string());
        actions.push(Action::Save);
        labels.push("reset (discard changes)".to_string());
        actions.push(Action::Reset);
    }
    labels.push(if current_path.is_empty() {
        "done".to_string()
    } else {
        "back".to_string()
    });
    actions.push(Action::Back);

    (labels, actions)
}

fn edit_scalar(session: &mut EditorSession<FsConfigStore>, path: &str) -> Result<()> {
    let Some(value) = session.document().and_then(|doc| doc.get_path(path)).cloned() else {
        return Ok(());
    };
    match widget_for(&value) {
        NodeWidget::Display => {
            if Confirm::new()
                .with_prompt(format!("{path} is null; delete this key?"))
                .default(false)
                .interact()?
            {
                session.apply_edit(path, EditOp::Remove)?;
            }
        }
        NodeWidget::Toggle { .. } => {
            session.apply_edit(path, EditOp::Toggle)?;
        }
        NodeWidget::NumberField { value, step, .. } => {
            let new: f64 = Input::new()
                .with_prompt(format!("{path} (step {step})"))
                .default(value)
                .interact_text()?;
            session.apply_edit(path, EditOp::Set(ConfigValue::Number(new)))?;
        }
        NodeWidget::TextInput { value } => {
            let new: String = Input::new()
                .with_prompt(path)
                .with_initial_text(value)
                .allow_empty(true)
                .interact_text()?;
            session.apply_edit(path, EditOp::Set(ConfigValue::String(new)))?;
        }
        NodeWidget::TextArea { value } => {
            if let Some(new) = Editor::new().edit(&value)? {
                session.apply_edit(path, EditOp::Set(ConfigValue::String(new)))?;
            }
        }
        // Containers are navigated, not edited in place
        NodeWidget::ArrayNode { .. } | NodeWidget::MapNode { .. } => {}
    }
    Ok(())
}

fn delete_entry(
    session: &mut EditorSession<FsConfigStore>,
    current_path: &str,
    node: &ConfigValue,
) -> Result<()> {
    let (labels, paths): (Vec<String>, Vec<String>) = match node {
        ConfigValue::Map(map) => map
            .keys()
            .map(|key| (key.clone(), join_key(current_path, key)))
            .unzip(),
        ConfigValue::Array(items) => (0..items.len())
            .map(|i| (format!("[{i}]"), join_index(current_path, i)))
            .unzip(),
        _ => return Ok(()),
    };
    let mut labels = labels;
    labels.push("cancel".to_string());
    let choice = Select::new()
        .with_prompt("Delete which entry?")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()?;
    if choice < paths.len() {
        session.apply_edit(&paths[choice], EditOp::Remove)?;
    }
    Ok(())
}

fn edit_raw(session: &mut EditorSession<FsConfigStore>) -> Result<()> {
    if let Some(new) = Editor::new().edit(session.current_text())? {
        session.set_raw_text(new);
    }
    if session.is_dirty()
        && Confirm::new()
            .with_prompt("Save changes?")
            .default(true)
            .interact()?
    {
        session.save()?;
        println!("{}", "saved".green().bold());
    }
    Ok(())
}
