//! Equipment catalog listing command.

use clap::Args;
use patchbay_core::SignalType;
use patchbay_registry::{EquipmentCategory, EquipmentTemplate};

use super::common::Context;

#[derive(Args)]
pub struct CatalogArgs {
    /// Show details for a specific template
    #[arg(value_name = "ID")]
    id: Option<String>,

    /// Only list one category (console, switcher, display, adapter, upscaler)
    #[arg(short, long)]
    category: Option<String>,

    /// Only list templates whose name or ID contains this text
    #[arg(short, long)]
    search: Option<String>,
}

pub fn run(ctx: &Context, args: CatalogArgs) -> anyhow::Result<()> {
    let registry = ctx.settings.load_registry()?;

    if let Some(id) = &args.id {
        let template = registry.get(id).ok_or_else(|| {
            anyhow::anyhow!("Unknown template: {}. Use 'patchbay catalog' to list them.", id)
        })?;
        show_template(template);
        return Ok(());
    }

    let category = args
        .category
        .as_deref()
        .map(|name| {
            EquipmentCategory::parse(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", name))
        })
        .transpose()?;

    let mut shown = 0;
    for cat in EquipmentCategory::ALL {
        if category.is_some_and(|c| c != cat) {
            continue;
        }
        let templates: Vec<&EquipmentTemplate> = registry
            .in_category(cat)
            .into_iter()
            .filter(|t| args.search.as_deref().is_none_or(|q| t.matches(q)))
            .collect();
        if templates.is_empty() {
            continue;
        }

        println!("{} - {}", cat.name(), cat.description());
        println!("{}", "=".repeat(cat.name().len()));
        for template in templates {
            println!("  {:20} {}", template.id, template.name);
            shown += 1;
        }
        println!();
    }

    if shown == 0 {
        println!("No matching templates.");
    }

    Ok(())
}

fn show_template(template: &EquipmentTemplate) {
    let specs = &template.specs;

    println!("{}", template.name);
    println!("{}", "=".repeat(template.name.len()));
    println!();
    println!("ID:       {}", template.id);
    println!("Category: {}", template.category);

    if specs.is_svs {
        println!("Scalable: yes");
        if let Some(max) = specs.max_inputs {
            println!("Max inputs:  {}", max);
        }
        if let Some(max) = specs.max_outputs {
            println!("Max outputs: {}", max);
        }
    }

    println!("Inputs:   {}", join(&specs.inputs));
    println!("Outputs:  {}", join(&specs.outputs));
    if !specs.signals.is_empty() {
        println!("Signals:  {}", join(&specs.signals));
    }
}

fn join(signals: &[SignalType]) -> String {
    if signals.is_empty() {
        return "(none)".to_string();
    }
    signals
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
