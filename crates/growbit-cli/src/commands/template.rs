//! Habit template catalog commands for CLI.

use clap::Subcommand;
use growbit_core::TemplateCatalog;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List templates
    List {
        /// Only templates in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
}

pub fn run(action: TemplateAction) -> CliResult {
    let catalog = TemplateCatalog::builtin();

    match action {
        TemplateAction::List { category } => match category {
            Some(category) => {
                let templates: Vec<_> = catalog.templates_in(&category).collect();
                if templates.is_empty() && !catalog.categories().iter().any(|c| c.id == category) {
                    return Err(format!("unknown category: {category}").into());
                }
                print_json(&templates)?;
            }
            None => print_json(&catalog.templates())?,
        },
        TemplateAction::Categories => print_json(&catalog.categories())?,
    }
    Ok(())
}
