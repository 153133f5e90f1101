//! Non-interactive command implementations

use std::path::Path;

use colored::Colorize;
use modcfg_content::handlers::scalar;
use modcfg_content::{CommentMap, ConfigValue};
use modcfg_core::{CandidateIndex, DirCandidateIndex, EditorSession, FsConfigStore};
use modcfg_edit::{filter_tree, EditOp};

use crate::error::{Error, Result};

/// One-line preview of a node for listings.
pub fn preview(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => "null".dimmed().to_string(),
        ConfigValue::Bool(b) => b.to_string().yellow().to_string(),
        ConfigValue::Number(n) => scalar::encode_number(*n).cyan().to_string(),
        ConfigValue::String(s) => {
            let mut shown = s.replace('\n', "\\n");
            if shown.len() > 40 {
                shown.truncate(37);
                shown.push_str("...");
            }
            format!("\"{shown}\"").green().to_string()
        }
        ConfigValue::Array(items) => format!("[{} items]", items.len()).dimmed().to_string(),
        ConfigValue::Map(map) => format!("{{{} entries}}", map.len()).dimmed().to_string(),
    }
}

fn print_tree(value: &ConfigValue, comments: &CommentMap, path: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        ConfigValue::Map(map) => {
            for (key, child) in map {
                let child_path = modcfg_content::path::join_key(path, key);
                if let Some(comment) = comments.get(&child_path) {
                    println!("{indent}{}", format!("# {comment}").dimmed());
                }
                if child.is_container() {
                    println!("{indent}{}:", key.bold());
                    print_tree(child, comments, &child_path, depth + 1);
                } else {
                    println!("{indent}{}: {}", key.bold(), preview(child));
                }
            }
        }
        ConfigValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let child_path = modcfg_content::path::join_index(path, i);
                if item.is_container() {
                    println!("{indent}[{i}]:");
                    print_tree(item, comments, &child_path, depth + 1);
                } else {
                    println!("{indent}[{i}]: {}", preview(item));
                }
            }
        }
        other => println!("{indent}{}", preview(other)),
    }
}

pub fn cmd_list(mod_name: &str, dir: &Path) -> Result<()> {
    let index = DirCandidateIndex::new(dir);
    let candidates = index.list_candidates(mod_name, mod_name);
    if candidates.is_empty() {
        println!("No config files matching {} under {}", mod_name.bold(), dir.display());
        return Ok(());
    }
    for (i, candidate) in candidates.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        println!("{marker} {}", candidate.path.display());
    }
    Ok(())
}

pub fn cmd_show(file: &Path, filter: Option<&str>) -> Result<()> {
    let session = EditorSession::open(FsConfigStore::new(), file)?;
    let Some(document) = session.document() else {
        // Unstructured: the raw text is all there is to show
        print!("{}", session.current_text());
        return Ok(());
    };
    let tree = match filter {
        Some(query) => match filter_tree(document.root(), query) {
            Some(tree) => tree,
            None => {
                println!("Nothing matches {}", query.bold());
                return Ok(());
            }
        },
        None => document.root().clone(),
    };
    println!("{} ({})", file.display().to_string().bold(), session.format());
    print_tree(&tree, document.comments(), "", 0);
    Ok(())
}

pub fn cmd_get(file: &Path, path: &str) -> Result<()> {
    let session = EditorSession::open(FsConfigStore::new(), file)?;
    let document = session.document().ok_or(modcfg_core::Error::NotStructured)?;
    let value = document
        .get_path(path)
        .ok_or_else(|| Error::NoSuchPath(path.to_string()))?;
    println!("{}", preview(value));
    if let Some(comment) = document.comment(path) {
        println!("{}", format!("# {comment}").dimmed());
    }
    Ok(())
}

pub fn cmd_set(file: &Path, path: &str, raw_value: &str) -> Result<()> {
    let mut session = EditorSession::open(FsConfigStore::new(), file)?;
    let value = scalar::decode_scalar(raw_value);
    session.apply_edit(path, EditOp::Set(value))?;
    session.save()?;
    println!("{} {} = {}", "set".green().bold(), path, raw_value);
    Ok(())
}

pub fn cmd_unset(file: &Path, path: &str) -> Result<()> {
    let mut session = EditorSession::open(FsConfigStore::new(), file)?;
    session.apply_edit(path, EditOp::Remove)?;
    session.save()?;
    println!("{} {}", "removed".green().bold(), path);
    Ok(())
}
